//! Counter specs

use crate::prelude::*;

fn patient_project() -> Project {
    let temp = Project::empty();
    temp.file("sink.toml", "write_timeout = \"5s\"\n");
    temp
}

#[test]
fn count_stops_at_limit() {
    let temp = patient_project();
    let out = temp
        .strand()
        .args(&[
            "--config", "sink.toml", "count", "--log", "out.log", "--limit", "5", "--interval", "0",
        ])
        .passes()
        .stdout_has("count: 5");

    assert_eq!(reported(&out.stdout_text(), "count"), 5);
    let log = temp.read("out.log");
    let ticks: Vec<_> = log.lines().filter(|l| l.starts_with("tick ")).collect();
    assert_eq!(ticks, ["tick count=1", "tick count=2", "tick count=3", "tick count=4", "tick count=5"]);
    assert!(!log.contains("wind-down"), "log: {log}");
    assert!(log.contains("counter stopped"), "log: {log}");
}

#[test]
fn count_for_duration_winds_down() {
    let temp = patient_project();
    let out = temp
        .strand()
        .args(&["--config", "sink.toml", "count", "--log", "out.log", "--for", "50"])
        .passes();

    let total = reported(&out.stdout_text(), "count");
    assert!(total > 0);

    let log = temp.read("out.log");
    assert!(
        log.contains(&format!("wind-down count={total}\n")),
        "log: {log}"
    );
    assert!(log.contains("received stop request"), "log: {log}");
}

#[test]
fn limit_reached_before_deadline_still_exits() {
    let temp = Project::empty();
    temp.strand()
        .args(&["count", "--log", "out.log", "--limit", "2", "--for", "50", "--interval", "0"])
        .passes()
        .stdout_has("count: 2");

    // The stop arrives after the run already ended.
    assert!(temp.read("out.log").contains("not running"));
}

#[test]
fn debug_filter_includes_loop_events() {
    let temp = Project::empty();
    temp.strand()
        .env("RUST_LOG", "debug")
        .args(&["count", "--log", "out.log", "--limit", "1"])
        .passes();

    assert!(temp.read("out.log").contains("loop start"));
}
