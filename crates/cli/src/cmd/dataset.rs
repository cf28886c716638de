// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset command handlers

use std::io::Write;

use anyhow::Result;
use clap::Args;
use zfsh::{DatasetKind, DatasetRecord, DestroyFlags, Zfs};

use crate::exit_error::ExitError;
use crate::output::{format_or_json, handle_list, OutputFormat, Table};

#[derive(Args)]
pub struct ListArgs {
    /// Dataset type: filesystem, snapshot, volume, bookmark or all
    #[arg(short = 't', long = "type", default_value = "filesystem")]
    pub kind: DatasetKind,
    /// Descend at most this many levels below the filter
    #[arg(short = 'd', long)]
    pub depth: Option<u32>,
    /// Include all descendants
    #[arg(short = 'r', long)]
    pub recursive: bool,
    /// Dataset to start from (default: all)
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ChildrenArgs {
    /// Parent dataset
    pub name: String,
    /// Descend at most this many levels (default: unlimited)
    #[arg(short = 'd', long)]
    pub depth: Option<u32>,
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Dataset to snapshot
    pub dataset: String,
    /// Snapshot name (the part after `@`)
    pub name: String,
    /// Also snapshot every descendant, atomically
    #[arg(short = 'r', long)]
    pub recursive: bool,
}

#[derive(Args)]
pub struct DestroyArgs {
    /// Dataset, snapshot or bookmark to destroy
    pub name: String,
    /// Destroy descendants
    #[arg(short = 'r', long)]
    pub recursive: bool,
    /// Destroy dependent clones too
    #[arg(short = 'R', long)]
    pub recursive_clones: bool,
    /// Defer snapshot deletion until it is unreferenced
    #[arg(short = 'd', long)]
    pub defer: bool,
    /// Force unmount
    #[arg(short = 'f', long)]
    pub force: bool,
}

impl DestroyArgs {
    pub fn flags(&self) -> DestroyFlags {
        let mut flags = DestroyFlags::empty();
        for (set, flag) in [
            (self.recursive, DestroyFlags::RECURSIVE),
            (self.recursive_clones, DestroyFlags::RECURSIVE_CLONES),
            (self.defer, DestroyFlags::DEFER_DELETION),
            (self.force, DestroyFlags::FORCE_UNMOUNT),
        ] {
            if set {
                flags |= flag;
            }
        }
        flags
    }
}

pub async fn list(zfs: &Zfs, args: ListArgs, format: OutputFormat) -> Result<()> {
    let datasets = zfs
        .datasets(args.kind, args.filter.as_deref(), args.depth, args.recursive)
        .await
        .map_err(ExitError::from)?;
    handle_list(format, &datasets, "No datasets found", render_datasets)
}

pub async fn get(zfs: &Zfs, name: &str, format: OutputFormat) -> Result<()> {
    let dataset = zfs.get_dataset(name).await.map_err(ExitError::from)?;
    show(&dataset, format)
}

pub async fn children(zfs: &Zfs, args: ChildrenArgs, format: OutputFormat) -> Result<()> {
    let parent = zfs.get_dataset(&args.name).await.map_err(ExitError::from)?;
    let children = zfs
        .children(&parent, args.depth)
        .await
        .map_err(ExitError::from)?;
    handle_list(format, &children, "No children", render_datasets)
}

pub async fn snapshot(zfs: &Zfs, args: SnapshotArgs, format: OutputFormat) -> Result<()> {
    let dataset = zfs.get_dataset(&args.dataset).await.map_err(ExitError::from)?;
    let snapshot = zfs
        .snapshot(&dataset, &args.name, args.recursive)
        .await
        .map_err(ExitError::from)?;
    format_or_json(format, &snapshot, || println!("Created {}", snapshot.name))
}

pub async fn destroy(zfs: &Zfs, args: DestroyArgs) -> Result<()> {
    let dataset = zfs.get_dataset(&args.name).await.map_err(ExitError::from)?;
    zfs.destroy(&dataset, args.flags())
        .await
        .map_err(ExitError::from)?;
    println!("Destroyed {}", dataset.name);
    Ok(())
}

fn show(dataset: &DatasetRecord, format: OutputFormat) -> Result<()> {
    format_or_json(format, dataset, || {
        let fields = [
            ("name", &dataset.name),
            ("type", &dataset.kind),
            ("origin", &dataset.origin),
            ("used", &dataset.used),
            ("available", &dataset.available),
            ("mountpoint", &dataset.mountpoint),
            ("compression", &dataset.compression),
            ("volsize", &dataset.volsize),
            ("quota", &dataset.quota),
            ("written", &dataset.written),
            ("logicalused", &dataset.logicalused),
            ("receive_resume_token", &dataset.receive_resume_token),
        ];
        for (key, value) in fields {
            let value = if value.is_empty() { "-" } else { value.as_str() };
            println!("{key:<21} {value}");
        }
    })
}

pub(crate) fn render_datasets(datasets: &[DatasetRecord], out: &mut dyn Write) -> std::io::Result<()> {
    let mut table = Table::new(&["NAME", "TYPE", "USED", "AVAIL", "MOUNTPOINT"]);
    for dataset in datasets {
        table.row(vec![
            dataset.name.clone(),
            dataset.kind.clone(),
            dataset.used.clone(),
            dataset.available.clone(),
            dataset.mountpoint.clone(),
        ]);
    }
    table.render(out)
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
