// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-core: mediator-based event coordination
//!
//! This crate provides:
//! - `Registry` - owns components and dispatches events between them
//! - `Component` - the capability participants implement
//! - `DispatchPolicy` - pluggable recipient selection (`Broadcast`, `Topics`)
//! - `Cascade` - the handle recipients use to emit follow-up events
//! - `DispatchObserver` - where per-recipient failures are reported

pub mod cascade;
pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod observer;
pub mod pattern;
pub mod policy;
pub mod registry;

pub use cascade::Cascade;
pub use component::Component;
pub use config::{DispatchMode, RegistryConfig, DEFAULT_MAX_CASCADE_DEPTH};
pub use error::{DispatchError, DispatchFailure, ReceiveError, RegistryError};
pub use event::{Event, EventSummary, Payload};
pub use id::{ComponentId, EventId};
pub use observer::{DispatchObserver, TracingObserver};
pub use pattern::EventPattern;
pub use policy::{Broadcast, DispatchPolicy, Topics};
pub use registry::{Dispatched, Registry, RegistryBuilder};

#[cfg(any(test, feature = "test-support"))]
pub use observer::RecordingObserver;
