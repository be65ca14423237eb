// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The capability every participant provides to the registry

use crate::cascade::Cascade;
use crate::error::ReceiveError;
use crate::event::{Event, Payload};
use crate::id::ComponentId;

/// A unit that can be registered and notified.
///
/// Components never reference each other. `receive` is their only input
/// from the outside world; follow-up events go out through the cascade
/// handle, which sends them on the component's behalf.
pub trait Component<P: Payload>: Send + Sync {
    fn id(&self) -> &ComponentId;

    /// React to an event sent by another component.
    ///
    /// May run concurrently with `receive` on other components, and under
    /// async dispatch with other `receive` calls on this same component.
    fn receive(&self, event: &Event<P>, cascade: &Cascade<P>) -> Result<(), ReceiveError>;
}
