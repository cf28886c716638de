// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod dataset;
pub mod diff;
pub mod pool;
pub mod prop;

use anyhow::Result;
use clap::Subcommand;
use zfsh::Zfs;

use crate::output::OutputFormat;

#[derive(Subcommand)]
pub enum Commands {
    /// List datasets
    List(dataset::ListArgs),
    /// Show one dataset
    Get {
        /// Dataset name
        name: String,
    },
    /// List descendants of a dataset
    Children(dataset::ChildrenArgs),
    /// Show changes between a snapshot and a dataset
    Diff(diff::DiffArgs),
    /// Create a snapshot
    Snapshot(dataset::SnapshotArgs),
    /// Destroy a dataset
    Destroy(dataset::DestroyArgs),
    /// Read or change dataset properties
    Prop(prop::PropArgs),
    /// List pools
    Pools,
    /// Show one pool
    Pool {
        /// Pool name
        name: String,
    },
}

pub async fn run(zfs: &Zfs, command: Commands, format: OutputFormat) -> Result<()> {
    match command {
        Commands::List(args) => dataset::list(zfs, args, format).await,
        Commands::Get { name } => dataset::get(zfs, &name, format).await,
        Commands::Children(args) => dataset::children(zfs, args, format).await,
        Commands::Diff(args) => diff::handle(zfs, args, format).await,
        Commands::Snapshot(args) => dataset::snapshot(zfs, args, format).await,
        Commands::Destroy(args) => dataset::destroy(zfs, args).await,
        Commands::Prop(args) => prop::handle(zfs, args.command, format).await,
        Commands::Pools => pool::list(zfs, format).await,
        Commands::Pool { name } => pool::get(zfs, &name, format).await,
    }
}
