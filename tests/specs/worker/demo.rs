//! `wh demo` specs
//!
//! The demo reports before starting, while draining, after pausing and on quit.

use crate::prelude::*;

#[test]
fn demo_prints_lifecycle_statuses_in_order() {
    let out = wh().args(&["demo"]).passes();
    assert_eq!(out.stdout_lines(), ["Idle", "Busy", "Idle", "Terminated"]);
}

#[test]
fn demo_with_no_tasks_still_walks_the_lifecycle() {
    let out = wh().args(&["demo", "--tasks", "0"]).passes();
    assert_eq!(out.stdout_lines(), ["Idle", "Busy", "Idle", "Terminated"]);
}

#[test]
fn demo_logs_to_stderr_when_asked() {
    wh().args(&["demo", "--tasks", "10"])
        .env("WH_LOG", "info")
        .passes()
        .stderr_has("worker started")
        .stderr_has("worker terminated");
}
