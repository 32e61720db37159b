// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! strand - thread coordination and buffered logging demos

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{banner, count, stress};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strand_log::{BufferedSink, SinkConfig, SinkWriter};

#[derive(Parser)]
#[command(
    name = "strand",
    version,
    about = "Strand - coordinated worker threads and a best-effort log sink"
)]
struct Cli {
    /// Sink settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a counter on a coordinated worker
    Count(count::CountArgs),
    /// Hammer the sink from concurrent writers
    Stress(stress::StressArgs),
    /// Write an error banner
    Banner(banner::BannerArgs),
}

impl Commands {
    fn log_path(&self) -> &Path {
        match self {
            Commands::Count(args) => &args.log,
            Commands::Stress(args) => &args.log,
            Commands::Banner(args) => &args.log,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SinkConfig::load(path)?,
        None => SinkConfig::default(),
    };

    let log_path = cli.command.log_path();
    let sink = Arc::new(
        BufferedSink::open(log_path, config)
            .with_context(|| format!("cannot log to {}", log_path.display()))?,
    );
    setup_logging(&sink)?;

    let result = match cli.command {
        Commands::Count(args) => count::count(args, &sink),
        Commands::Stress(args) => stress::stress(args, &sink),
        Commands::Banner(args) => banner::banner(args, &sink),
    };

    sink.shutdown()?;
    result
}

fn setup_logging(sink: &Arc<BufferedSink>) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(SinkWriter::new(Arc::clone(sink))),
        )
        .try_init()?;

    Ok(())
}
