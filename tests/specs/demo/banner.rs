//! Banner specs

use crate::prelude::*;

#[test]
fn banner_frames_message_in_log() {
    let temp = Project::empty();
    temp.strand()
        .args(&["banner", "--log", "out.log", "disk full"])
        .passes();

    let log = temp.read("out.log");
    assert!(
        log.contains(&format!("!{ERROR_BAR}\ndisk full\n{ERROR_BAR}!\n")),
        "log: {log}"
    );
}

#[test]
fn banner_truncates_previous_log() {
    let temp = Project::empty();
    temp.file("out.log", "from an earlier run\n");
    temp.strand()
        .args(&["banner", "--log", "out.log", "fresh"])
        .passes();

    assert!(!temp.read("out.log").contains("earlier run"));
}

#[test]
fn append_config_keeps_previous_log() {
    let temp = Project::empty();
    temp.file("out.log", "from an earlier run\n");
    temp.file("sink.toml", "append = true\n");
    temp.strand()
        .args(&["--config", "sink.toml", "banner", "--log", "out.log", "again"])
        .passes();

    let log = temp.read("out.log");
    assert!(log.starts_with("from an earlier run\n"), "log: {log}");
    assert!(log.contains("\nagain\n"), "log: {log}");
}
