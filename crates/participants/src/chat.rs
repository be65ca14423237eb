// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat room participants
//!
//! Every message a user sends is broadcast to the other users of the room.

use sb_core::{Cascade, Component, ComponentId, DispatchError, Dispatched, Event, Payload, ReceiveError, Registry};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A chat line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Payload for ChatMessage {
    fn name(&self) -> &str {
        "message"
    }
}

/// A message as a user received it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Received {
    pub from: ComponentId,
    pub text: String,
}

/// A chat user; the component id is the user's name
pub struct User {
    name: ComponentId,
    inbox: Mutex<Vec<Received>>,
}

impl User {
    pub fn new(name: impl Into<ComponentId>) -> Self {
        Self {
            name: name.into(),
            inbox: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &ComponentId {
        &self.name
    }

    /// Broadcast `text` to everyone else in the room
    pub fn send(
        &self,
        room: &Registry<ChatMessage>,
        text: impl Into<String>,
    ) -> Result<Dispatched, DispatchError> {
        let message = ChatMessage::new(text);
        tracing::info!(user = %self.name, text = %message.text, "sent");
        room.notify(&self.name, message)
    }

    /// Messages received so far, oldest first
    pub fn inbox(&self) -> Vec<Received> {
        self.inbox.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain the inbox
    pub fn take_inbox(&self) -> Vec<Received> {
        std::mem::take(&mut *self.inbox.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Component<ChatMessage> for User {
    fn id(&self) -> &ComponentId {
        &self.name
    }

    fn receive(
        &self,
        event: &Event<ChatMessage>,
        _cascade: &Cascade<ChatMessage>,
    ) -> Result<(), ReceiveError> {
        let text = event.payload().text.clone();
        tracing::info!(user = %self.name, from = %event.sender(), %text, "received");
        self.inbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Received {
                from: event.sender().clone(),
                text,
            });
        Ok(())
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
