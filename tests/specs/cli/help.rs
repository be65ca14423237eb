//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .sb()
        .args(&["--help"])
        .passes()
        .stdout_has("order")
        .stdout_has("chat")
        .stdout_has("completions");
}

#[test]
fn order_help_lists_flags() {
    Project::empty()
        .sb()
        .args(&["order", "--help"])
        .passes()
        .stdout_has("--payment-latency-ms")
        .stdout_has("--reservation-latency-ms")
        .stdout_has("--deadline-ms");
}

#[test]
fn version_prints() {
    Project::empty()
        .sb()
        .args(&["--version"])
        .passes()
        .stdout_has("sb ");
}

#[test]
fn completions_generate_for_bash() {
    Project::empty()
        .sb()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_sb");
}
