//! Error reporting specs

use crate::prelude::*;

#[test]
fn unwritable_log_path_fails() {
    let temp = Project::empty();
    temp.strand()
        .args(&["banner", "--log", "missing/dir/out.log", "hi"])
        .fails()
        .stderr_has("cannot log to missing/dir/out.log");
}

#[test]
fn missing_log_flag_fails() {
    let temp = Project::empty();
    temp.strand()
        .args(&["banner", "hi"])
        .fails()
        .stderr_has("--log");
}

#[test]
fn invalid_config_fails() {
    let temp = Project::empty();
    temp.file("sink.toml", "drain_interval = \"whenever\"\n");
    temp.strand()
        .args(&["--config", "sink.toml", "banner", "--log", "out.log", "hi"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn missing_config_file_fails() {
    let temp = Project::empty();
    temp.strand()
        .args(&["--config", "nope.toml", "banner", "--log", "out.log", "hi"])
        .fails()
        .stderr_has("nope.toml");
}
