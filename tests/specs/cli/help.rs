//! Help and completions specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    wh().args(&["--help"])
        .passes()
        .stdout_has("demo")
        .stdout_has("run")
        .stdout_has("config")
        .stdout_has("completions");
}

#[test]
fn run_help_lists_options() {
    wh().args(&["run", "--help"])
        .passes()
        .stdout_has("--tasks")
        .stdout_has("--fail-every")
        .stdout_has("--task-ms")
        .stdout_has("--format");
}

#[test]
fn version_prints_name() {
    wh().args(&["--version"]).passes().stdout_has("wh");
}

#[test]
fn completions_generate_for_bash() {
    wh().args(&["completions", "bash"])
        .passes()
        .stdout_has("_wh");
}
