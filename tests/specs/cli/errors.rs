//! CLI error specs

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    wh().args(&["frobnicate"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn missing_config_file_fails() {
    let project = Project::empty();
    project
        .wh()
        .args(&["config", "--config", "nope.toml"])
        .fails()
        .stderr_has("nope.toml");
}

#[test]
fn unknown_config_key_fails() {
    let project = Project::empty();
    let path = project.file("worker.toml", "colour = \"blue\"\n");
    project
        .wh()
        .args(&["config", "--config"])
        .args(&[path])
        .fails()
        .stderr_has("colour");
}

#[test]
fn zero_capacity_is_rejected_before_spawning() {
    let project = Project::empty();
    let path = project.file("worker.toml", "task_capacity = 0\n");
    project
        .wh()
        .args(&["run", "--tasks", "1", "--config"])
        .args(&[path])
        .fails()
        .stderr_has("task_capacity");
}
