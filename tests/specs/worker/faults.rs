//! Fault reporting specs
//!
//! Failing tasks are reported on the fault stream; the worker outlives them.

use crate::prelude::*;

#[test]
fn every_failing_task_is_reported_once() {
    let out = wh()
        .args(&["run", "--tasks", "20", "--fail-every", "5", "--task-ms", "0"])
        .passes()
        .stdout_has("fault: task task-5 [job-5] panicked: job 5 gave up")
        .stdout_has("fault: task task-20 [job-20] panicked: job 20 gave up")
        .stdout_has("17 completed, 4 faulted");

    let faults = out
        .stdout_lines()
        .into_iter()
        .filter(|line| line.starts_with("fault:"))
        .count();
    assert_eq!(faults, 4);
}

#[test]
fn task_panics_stay_off_stderr() {
    let out = wh()
        .args(&["run", "--tasks", "3", "--fail-every", "1", "--task-ms", "0"])
        .passes();
    assert!(!out.stderr.contains("panicked at"), "stderr:\n{}", out.stderr);
}

#[test]
fn pause_policy_rests_after_each_fault_and_is_resumed() {
    let project = Project::empty();
    let path = project.file(
        "worker.toml",
        "fault_policy = \"pause\"\nsignal_timeout = \"20ms\"\n",
    );
    let out = project
        .wh()
        .args(&["run", "--tasks", "12", "--fail-every", "4", "--task-ms", "0", "--config"])
        .args(&[path])
        .passes()
        .stdout_has("report: idle -> idle")
        .stdout_has("10 completed, 3 faulted");

    let resumes = out
        .stdout_lines()
        .into_iter()
        .filter(|line| line.starts_with("work: idle -> busy"))
        .count();
    assert_eq!(resumes, 4);
}

#[test]
fn faults_appear_in_json_output() {
    let json = wh()
        .args(&[
            "run", "--tasks", "6", "--fail-every", "3", "--task-ms", "0", "--format", "json",
        ])
        .passes()
        .json();

    let faults = json["faults"].as_array().unwrap();
    assert_eq!(faults.len(), 2);
    assert_eq!(faults[0]["task_id"], "task-3");
    assert_eq!(faults[0]["label"], "job-3");
    assert_eq!(faults[0]["kind"], "panicked");
    assert_eq!(faults[1]["message"], "job 6 gave up");
}
