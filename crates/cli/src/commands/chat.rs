// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sb chat` - Broadcast messages between users

use crate::output::{self, OutputFormat};
use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::Args;
use sb_core::{DispatchMode, Registry};
use sb_participants::{ChatMessage, User};
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Users in the room, in join order
    #[arg(short, long = "user", required = true)]
    pub users: Vec<String>,

    /// Message to send (FROM=TEXT), in order
    #[arg(short, long = "message", value_parser = parse_key_val)]
    pub messages: Vec<(String, String)>,

    /// Dispatch mode (sync or async)
    #[arg(long)]
    pub mode: Option<DispatchMode>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid FROM=TEXT: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// One message as one user received it
#[derive(Debug, Serialize)]
pub struct Delivery {
    pub to: String,
    pub from: String,
    pub text: String,
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} received from {}: {}", self.to, self.from, self.text)
    }
}

pub async fn handle(args: ChatArgs, settings: &Settings) -> Result<()> {
    let mut config = settings.registry.clone();
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    let room: Registry<ChatMessage> = Registry::new(config);
    let mut users = Vec::with_capacity(args.users.len());
    for name in &args.users {
        let user = Arc::new(User::new(name.as_str()));
        room.register(user.clone())
            .with_context(|| format!("cannot join user {name}"))?;
        users.push(user);
    }

    // Resolve every sender before anything is sent
    let mut outbox = Vec::with_capacity(args.messages.len());
    for (from, text) in args.messages {
        let sender = users
            .iter()
            .find(|u| u.name() == from.as_str())
            .with_context(|| format!("unknown user: {from}"))?;
        outbox.push((Arc::clone(sender), text));
    }

    let mut deliveries = Vec::new();
    for (sender, text) in outbox {
        sender.send(&room, text)?;
        room.wait_idle().await;
        for user in &users {
            deliveries.extend(user.take_inbox().into_iter().map(|received| Delivery {
                to: user.name().to_string(),
                from: received.from.to_string(),
                text: received.text,
            }));
        }
    }
    room.unregister_all();

    output::print_list(&deliveries, args.format)
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
