// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `strand banner <message>` - Write a framed error message

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use strand_log::BufferedSink;

#[derive(Args)]
pub struct BannerArgs {
    /// Log file
    #[arg(long)]
    pub log: PathBuf,

    /// Message to frame
    pub message: String,
}

pub fn banner(args: BannerArgs, sink: &Arc<BufferedSink>) -> Result<()> {
    if !sink.print_error(&args.message) {
        bail!("log sink busy, banner dropped");
    }
    Ok(())
}
