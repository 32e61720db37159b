// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand stress` - Concurrent best-effort writers

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use strand_log::BufferedSink;
use strand_sync::{Signal, Timeout, Worker};

#[derive(Args)]
pub struct StressArgs {
    /// Log file
    #[arg(long)]
    pub log: PathBuf,

    /// Number of writer threads
    #[arg(long, default_value_t = 4)]
    pub writers: usize,

    /// Chunks written by each writer
    #[arg(long, default_value_t = 1000)]
    pub chunks: usize,
}

struct WriterJob {
    id: usize,
    chunks: usize,
    sink: Arc<BufferedSink>,
    start: Arc<Signal>,
}

fn write_chunks(job: WriterJob) {
    job.start.wait(Timeout::Forever);
    for chunk in 0..job.chunks {
        job.sink.write(&format!("writer {} chunk {chunk}\n", job.id));
    }
}

pub fn stress(args: StressArgs, sink: &Arc<BufferedSink>) -> Result<()> {
    let before = sink.stats();
    let start = Arc::new(Signal::new());

    let mut workers = Vec::with_capacity(args.writers);
    for id in 0..args.writers {
        let job = WriterJob {
            id,
            chunks: args.chunks,
            sink: Arc::clone(sink),
            start: Arc::clone(&start),
        };
        workers.push(Worker::spawn(format!("writer-{id}"), write_chunks, job)?);
    }

    start.set();
    for worker in workers {
        worker.join()?;
    }

    let after = sink.stats();
    let accepted = after.accepted_writes - before.accepted_writes;
    let dropped = after.dropped_writes - before.dropped_writes;
    tracing::info!(writers = args.writers, accepted, dropped, "stress finished");
    println!("accepted: {accepted}");
    println!("dropped: {dropped}");
    Ok(())
}
