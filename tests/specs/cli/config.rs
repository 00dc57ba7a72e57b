//! `wh config` specs

use crate::prelude::*;

#[test]
fn defaults_are_shown_without_a_file() {
    wh().args(&["config"])
        .passes()
        .stdout_has("name:             worker")
        .stdout_has("task_capacity:    1024")
        .stdout_has("fault_policy:     continue")
        .stdout_has("signal_timeout:   250ms");
}

#[test]
fn file_overrides_defaults() {
    let project = Project::empty();
    let path = project.file(
        "worker.toml",
        r#"
id = 7
name = "night-shift"
fault_policy = "pause"
signal_timeout = "2s"
"#,
    );
    project
        .wh()
        .args(&["config", "--config"])
        .args(&[path])
        .passes()
        .stdout_has("id:               7")
        .stdout_has("name:             night-shift")
        .stdout_has("fault_policy:     pause")
        .stdout_has("signal_timeout:   2s")
        .stdout_has("control_capacity: 8");
}

#[test]
fn json_format_uses_config_keys() {
    let project = Project::empty();
    let path = project.file("worker.toml", "fault_capacity = 3\n");
    let json = project
        .wh()
        .args(&["config", "--format", "json", "--config"])
        .args(&[path])
        .passes()
        .json();
    assert_eq!(json["fault_capacity"], 3);
    assert_eq!(json["fault_policy"], "continue");
    assert_eq!(json["signal_timeout"], "250ms");
}
