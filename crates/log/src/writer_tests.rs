// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::SinkConfig;
use std::io::Write;
use std::time::Duration;

fn open(path: &std::path::Path) -> Arc<BufferedSink> {
    let config = SinkConfig::default().with_write_timeout(Duration::from_secs(5));
    Arc::new(BufferedSink::open(path, config).unwrap())
}

#[test]
fn io_write_becomes_one_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.log");
    let sink = open(&path);

    let mut writer = SinkWriter::new(Arc::clone(&sink));
    writer.write_all(b"hello\n").unwrap();
    writer.flush().unwrap();
    sink.shutdown().unwrap();

    assert_eq!(sink.stats().accepted_writes, 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
}

#[test]
fn closed_sink_still_reports_bytes_written() {
    let dir = tempfile::tempdir().unwrap();
    let sink = open(&dir.path().join("out.log"));
    sink.shutdown().unwrap();

    let mut writer = SinkWriter::new(Arc::clone(&sink));
    assert_eq!(writer.write(b"late").unwrap(), 4);
    assert_eq!(sink.stats().dropped_writes, 1);
}

#[test]
fn tracing_events_land_in_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.log");
    let sink = open(&path);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(SinkWriter::new(Arc::clone(&sink)))
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(count = 3, "counter stopped");
        tracing::warn!("second event");
    });
    sink.shutdown().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2, "text: {text}");
    assert!(lines[0].contains("INFO"), "text: {text}");
    assert!(lines[0].contains("counter stopped count=3"), "text: {text}");
    assert!(lines[1].contains("WARN"), "text: {text}");
}

#[test]
fn sink_lifecycle_events_route_into_the_same_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.log");
    let sink = open(&path);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(SinkWriter::new(Arc::clone(&sink)))
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        sink.set_target(dir.path().join("next.log")).unwrap();
        sink.shutdown().unwrap();
    });

    let next = std::fs::read_to_string(dir.path().join("next.log")).unwrap();
    assert!(next.contains("log target changed"), "next: {next}");
}

#[test]
fn nested_write_on_same_thread_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let sink = open(&dir.path().join("out.log"));
    let mut writer = SinkWriter::new(Arc::clone(&sink));

    IN_SINK.with(|flag| flag.set(true));
    assert_eq!(writer.write(b"nested").unwrap(), 6);
    IN_SINK.with(|flag| flag.set(false));
    assert_eq!(writer.write(b"outer").unwrap(), 5);

    assert_eq!(sink.stats().accepted_writes, 1);
    assert_eq!(sink.stats().dropped_writes, 0);
}
