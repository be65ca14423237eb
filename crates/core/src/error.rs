// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for registration, dispatch and delivery

use crate::event::EventSummary;
use crate::id::ComponentId;
use thiserror::Error;

/// Errors from membership changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("component id already registered: {0}")]
    DuplicateId(ComponentId),
}

/// Errors that stop a dispatch before any recipient is invoked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("cascade depth {depth} exceeds limit {limit}")]
    CascadeTooDeep { depth: u32, limit: u32 },
    #[error("async dispatch requires a tokio runtime")]
    NoRuntime,
    #[error("registry has been shut down")]
    ShutDown,
}

/// Errors a recipient reports from `receive`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiveError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("cascade failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("receiver panicked: {0}")]
    Panicked(String),
}

impl ReceiveError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        ReceiveError::Rejected(reason.into())
    }
}

/// A per-recipient problem observed during dispatch.
///
/// These never reach the sender; the registry hands them to its
/// [`DispatchObserver`](crate::observer::DispatchObserver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchFailure {
    #[error("{recipient} failed handling {event}: {error}")]
    Recipient {
        recipient: ComponentId,
        event: EventSummary,
        error: ReceiveError,
    },
    #[error("policy selected unregistered recipient {recipient} for {event}")]
    UnknownRecipient {
        recipient: ComponentId,
        event: EventSummary,
    },
}

impl DispatchFailure {
    pub fn recipient(&self) -> &ComponentId {
        match self {
            DispatchFailure::Recipient { recipient, .. }
            | DispatchFailure::UnknownRecipient { recipient, .. } => recipient,
        }
    }

    pub fn event(&self) -> &EventSummary {
        match self {
            DispatchFailure::Recipient { event, .. }
            | DispatchFailure::UnknownRecipient { event, .. } => event,
        }
    }
}
