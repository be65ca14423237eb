//! Order settings specs
//!
//! Verify settings files feed `sb order` and flags override them.

use crate::prelude::*;

const EMPTY_SHELF: &str = r#"
[order]
stock = 0
"#;

#[test]
fn explicit_config_is_used() {
    let project = Project::empty();
    project.file("sb.toml", EMPTY_SHELF);

    project
        .sb()
        .args(&["--config", "sb.toml", "order"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: pending\n");
}

#[test]
fn flags_override_config() {
    let project = Project::empty();
    project.file("sb.toml", EMPTY_SHELF);

    project
        .sb()
        .args(&["--config", "sb.toml", "order", "--stock", "2"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: ready_to_ship\n");
}

#[test]
fn user_config_is_found_without_flag() {
    let project = Project::empty();
    project.user_config(EMPTY_SHELF);

    project
        .sb()
        .args(&["order"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: pending\n");
}

#[test]
fn registry_mode_comes_from_config() {
    let project = Project::empty();
    project.file(
        "sb.toml",
        r#"
[registry]
mode = "async"

[order]
payment_latency_ms = 10
"#,
    );

    project
        .sb()
        .args(&["--config", "sb.toml", "order", "--format", "json"])
        .passes()
        .stdout_has("\"mode\": \"async\"")
        .stdout_has("\"final_status\": \"ready_to_ship\"");
}
