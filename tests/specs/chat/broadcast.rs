//! Chat broadcast specs
//!
//! Verify every message reaches every other user and never its sender.

use crate::prelude::*;

#[test]
fn two_messages_among_three_users() {
    Project::empty()
        .sb()
        .args(&[
            "chat",
            "--user",
            "Alice",
            "--user",
            "Bob",
            "--user",
            "Charlie",
            "--message",
            "Alice=Hello, everyone!",
            "--message",
            "Bob=Hi, Alice!",
        ])
        .passes()
        .stdout_eq(
            "Bob received from Alice: Hello, everyone!\n\
             Charlie received from Alice: Hello, everyone!\n\
             Alice received from Bob: Hi, Alice!\n\
             Charlie received from Bob: Hi, Alice!\n",
        );
}

#[test]
fn async_room_prints_the_same_deliveries() {
    Project::empty()
        .sb()
        .args(&[
            "chat",
            "--mode",
            "async",
            "-u",
            "Alice",
            "-u",
            "Bob",
            "-m",
            "Alice=ping",
            "-m",
            "Bob=pong",
        ])
        .passes()
        .stdout_eq("Bob received from Alice: ping\nAlice received from Bob: pong\n");
}

#[test]
fn room_without_messages_prints_nothing() {
    Project::empty()
        .sb()
        .args(&["chat", "--user", "Alice"])
        .passes()
        .stdout_eq("");
}

#[test]
fn deliveries_as_json() {
    Project::empty()
        .sb()
        .args(&[
            "chat", "-u", "Alice", "-u", "Bob", "-m", "Alice=hi", "--format", "json",
        ])
        .passes()
        .stdout_has("\"to\": \"Bob\"")
        .stdout_has("\"from\": \"Alice\"")
        .stdout_has("\"text\": \"hi\"");
}
