// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zfsh: run zfs and zpool operations on this host or over SSH

mod cmd;
mod color;
mod config;
mod exit_error;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::cmd::Commands;
use crate::config::{FileConfig, Overrides, Settings};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "zfsh", version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"), about = "Run zfs and zpool operations locally or over SSH")]
#[command(styles = color::styles())]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct GlobalArgs {
    /// Run on this host over SSH instead of locally
    #[arg(long, global = true)]
    host: Option<String>,
    /// SSH port (default: 22)
    #[arg(long, global = true)]
    port: Option<u16>,
    /// SSH user (default: $USER)
    #[arg(long, global = true)]
    user: Option<String>,
    /// SSH private key (default: ~/.ssh/id_dsa)
    #[arg(long, global = true)]
    identity: Option<PathBuf>,
    /// Config file (default: $ZFSH_CONFIG, then <config dir>/zfsh/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path of the zfs tool on the target
    #[arg(long, global = true)]
    zfs: Option<String>,
    /// Path of the zpool tool on the target
    #[arg(long, global = true)]
    zpool: Option<String>,
    /// Kill a command that runs longer than this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
    output: OutputFormat,
}

impl GlobalArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            identity: self.identity.clone(),
            zfs: self.zfs.clone(),
            zpool: self.zpool.clone(),
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("error: {}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let file = FileConfig::load(cli.global.config.as_deref())?;
    let zfs = Settings::resolve(cli.global.overrides(), file).handle();

    let result = cmd::run(&zfs, command, cli.global.output).await;
    if let Err(e) = zfs.close().await {
        tracing::warn!(error = %e, "closing connection failed");
    }
    result
}
