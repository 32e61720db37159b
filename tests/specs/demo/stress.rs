//! Stress specs

use crate::prelude::*;

#[test]
fn every_chunk_is_accepted_or_dropped() {
    let temp = Project::empty();
    let out = temp
        .strand()
        .args(&["stress", "--log", "out.log", "--writers", "4", "--chunks", "250"])
        .passes();

    let stdout = out.stdout_text();
    let accepted = reported(&stdout, "accepted");
    let dropped = reported(&stdout, "dropped");
    assert_eq!(accepted + dropped, 1000);

    let log = temp.read("out.log");
    let chunks = log.lines().filter(|l| l.starts_with("writer ")).count() as u64;
    assert_eq!(chunks, accepted);
}

#[test]
fn patient_writers_lose_nothing() {
    let temp = Project::empty();
    temp.file("sink.toml", "write_timeout = \"10s\"\n");
    temp.strand()
        .args(&[
            "--config", "sink.toml", "stress", "--log", "out.log", "--writers", "3", "--chunks",
            "100",
        ])
        .passes()
        .stdout_has("accepted: 300")
        .stdout_has("dropped: 0");

    let log = temp.read("out.log");
    for writer in 0..3 {
        for chunk in [0, 50, 99] {
            assert!(log.contains(&format!("writer {writer} chunk {chunk}\n")));
        }
    }
}
