// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zfsh diff`

use std::io::Write;

use anyhow::Result;
use clap::Args;
use zfsh::{ChangeType, InodeChange, Zfs};

use crate::exit_error::ExitError;
use crate::output::{handle_list, OutputFormat};

#[derive(Args)]
pub struct DiffArgs {
    /// Full snapshot name, e.g. `tank/home@monday`
    pub snapshot: String,
    /// Dataset to compare against the snapshot
    pub dataset: String,
}

pub async fn handle(zfs: &Zfs, args: DiffArgs, format: OutputFormat) -> Result<()> {
    let dataset = zfs.get_dataset(&args.dataset).await.map_err(ExitError::from)?;
    let changes = zfs
        .diff(&dataset, &args.snapshot)
        .await
        .map_err(ExitError::from)?;
    handle_list(format, &changes, "No changes", render_changes)
}

/// One line per change, in the tool's own `-F` notation.
pub(crate) fn render_changes(changes: &[InodeChange], out: &mut dyn Write) -> std::io::Result<()> {
    for change in changes {
        write!(out, "{}\t{}\t{}", change.change.code(), change.inode.code(), change.path)?;
        if let Some(target) = &change.new_path {
            write!(out, " -> {target}")?;
        }
        if change.change == ChangeType::Modified && change.reference_delta != 0 {
            write!(out, " ({:+})", change.reference_delta)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
