//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_mode_is_rejected() {
    Project::empty()
        .sb()
        .args(&["order", "--mode", "parallel"])
        .fails()
        .stderr_has("unknown dispatch mode");
}

#[test]
fn missing_config_file_is_reported() {
    Project::empty()
        .sb()
        .args(&["--config", "nope.toml", "order"])
        .fails()
        .stderr_has("cannot read config");
}

#[test]
fn malformed_user_config_is_reported() {
    let project = Project::empty();
    project.user_config("[registry]\nmode = 3\n");

    project
        .sb()
        .args(&["order"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn chat_message_needs_a_sender() {
    Project::empty()
        .sb()
        .args(&["chat", "--user", "Alice", "--message", "hello"])
        .fails()
        .stderr_has("FROM=TEXT");
}

#[test]
fn chat_sender_must_be_in_the_room() {
    Project::empty()
        .sb()
        .args(&["chat", "--user", "Alice", "--message", "Mallory=hi"])
        .fails()
        .stderr_has("unknown user: Mallory");
}

#[test]
fn chat_rejects_duplicate_users() {
    Project::empty()
        .sb()
        .args(&["chat", "--user", "Alice", "--user", "Alice"])
        .fails()
        .stderr_has("component id already registered: Alice");
}
