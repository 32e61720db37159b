// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand count` - Run a counter on a coordinated worker

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use strand_coord::{RunOutcome, ThreadCoordinator, WorkStep};
use strand_log::BufferedSink;

#[derive(Args)]
pub struct CountArgs {
    /// Log file
    #[arg(long)]
    pub log: PathBuf,

    /// Stop the counter after this many milliseconds
    #[arg(long = "for", value_name = "MS")]
    pub for_ms: Option<u64>,

    /// Let the counter finish on its own after this many ticks
    #[arg(long)]
    pub limit: Option<u64>,

    /// Pause between ticks in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1)]
    pub interval: u64,
}

/// Default run length when neither `--for` nor `--limit` is given
const DEFAULT_RUN_MS: u64 = 100;

struct Counter {
    count: u64,
    limit: Option<u64>,
    pause: Duration,
    sink: Arc<BufferedSink>,
}

impl WorkStep for Counter {
    fn step(&mut self, keep_going: &mut bool) -> bool {
        if !*keep_going {
            self.sink
                .record()
                .append("wind-down")
                .field("count", self.count)
                .line();
            return false;
        }

        self.count += 1;
        self.sink
            .record()
            .append("tick")
            .field("count", self.count)
            .line();
        if self.limit.is_some_and(|limit| self.count >= limit) {
            return false;
        }
        thread::sleep(self.pause);
        true
    }
}

pub fn count(args: CountArgs, sink: &Arc<BufferedSink>) -> Result<()> {
    let coord = ThreadCoordinator::with_name(
        "counter",
        Counter {
            count: 0,
            limit: args.limit,
            pause: Duration::from_millis(args.interval),
            sink: Arc::clone(sink),
        },
    );

    if let RunOutcome::Started { generation } = coord.run()? {
        tracing::info!(generation, "counter started");
    }

    let run_for = match (args.for_ms, args.limit) {
        (Some(ms), _) => Some(ms),
        (None, Some(_)) => None,
        (None, None) => Some(DEFAULT_RUN_MS),
    };
    if let Some(ms) = run_for {
        thread::sleep(Duration::from_millis(ms));
        coord.signal_stop();
    }
    coord.wait_for_stop();

    let total = coord.with_step(|counter| counter.count);
    tracing::info!(count = total, iterations = coord.iterations(), "counter stopped");
    println!("count: {total}");
    Ok(())
}
