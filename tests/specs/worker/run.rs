//! `wh run` specs

use crate::prelude::*;

#[test]
fn run_drains_every_task() {
    wh().args(&["run", "--tasks", "25", "--task-ms", "0"])
        .passes()
        .stdout_has("work: idle -> busy")
        .stdout_has("pause: busy -> idle")
        .stdout_has("quit: idle -> terminated (completed: 26, faulted: 0)")
        .stdout_has("25 tasks and a barrier submitted, 26 completed, 0 faulted")
        .stdout_lacks("fault:");
}

#[test]
fn run_with_small_queue_still_drains() {
    let project = Project::empty();
    let path = project.file("worker.toml", "name = \"tiny\"\ntask_capacity = 2\n");
    project
        .wh()
        .args(&["run", "--tasks", "40", "--task-ms", "0", "--config"])
        .args(&[path])
        .passes()
        .stdout_has("worker 0 (tiny)")
        .stdout_has("41 completed, 0 faulted");
}

#[test]
fn run_without_config_uses_default_worker_id() {
    wh().args(&["run", "--tasks", "3", "--task-ms", "0"])
        .passes()
        .stdout_has("worker 0 (runner): 3 tasks and a barrier submitted");
}

#[test]
fn run_json_reports_transitions_and_stats() {
    let json = wh()
        .args(&["run", "--tasks", "5", "--task-ms", "0", "--format", "json"])
        .passes()
        .json();

    assert_eq!(json["submitted"], 5);
    assert_eq!(json["stats"]["completed"], 6);
    assert_eq!(json["stats"]["faulted"], 0);

    let transitions = json["transitions"].as_array().unwrap();
    let first = &transitions[0];
    assert_eq!(first["signal"], "work");
    assert_eq!(first["to"], "busy");
    let last = transitions.last().unwrap();
    assert_eq!(last["signal"], "quit");
    assert_eq!(last["to"], "terminated");
}
