// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name patterns for topic subscriptions

/// Pattern for matching event names
/// Supports:
///   - Exact: "payment_confirmed"
///   - Single wildcard: "order:*" matches "order:paid", "order:shipped"
///   - Tail wildcard: "order:**" matches "order:item:added"
///   - "*" or "**" alone match every name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    /// Whether `event_name` matches, comparing `:`-separated segments
    pub fn matches(&self, event_name: &str) -> bool {
        match self.0.as_str() {
            "" => false,
            "*" | "**" => true,
            pattern => {
                let mut names = event_name.split(':');
                for segment in pattern.split(':') {
                    let name = names.next();
                    match segment {
                        "**" => return true,
                        "*" if name.is_some() => {}
                        exact if name == Some(exact) => {}
                        _ => return false,
                    }
                }
                names.next().is_none()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventPattern {
    fn from(pattern: &str) -> Self {
        EventPattern::new(pattern)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
