// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default bound on nested cascades (an event emitted while handling an event)
pub const DEFAULT_MAX_CASCADE_DEPTH: u32 = 64;

/// How `notify` runs recipients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Recipients run in order on the caller's thread before `notify` returns
    #[default]
    Sync,
    /// One tokio task per recipient; `notify` returns after spawning
    Async,
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchMode::Sync => write!(f, "sync"),
            DispatchMode::Async => write!(f, "async"),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(DispatchMode::Sync),
            "async" => Ok(DispatchMode::Async),
            other => Err(format!("unknown dispatch mode: {} (expected sync or async)", other)),
        }
    }
}

/// Per-registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub mode: DispatchMode,
    pub max_cascade_depth: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::Sync,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}

impl RegistryConfig {
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_cascade_depth(mut self, depth: u32) -> Self {
        self.max_cascade_depth = depth;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
