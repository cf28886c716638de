// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool command handlers

use std::io::Write;

use anyhow::Result;
use zfsh::{PoolRecord, Zfs};

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, handle_list, OutputFormat, Table};

pub async fn list(zfs: &Zfs, format: OutputFormat) -> Result<()> {
    let pools = zfs.list_zpools().await.map_err(ExitError::from)?;
    handle_list(format, &pools, "No pools available", render_pools)
}

pub async fn get(zfs: &Zfs, name: &str, format: OutputFormat) -> Result<()> {
    let pool = zfs.get_zpool(name).await.map_err(ExitError::from)?;
    format_or_json(format, &pool, || {
        println!("name       {}", pool.name);
        println!("health     {}", color::pool_health(&pool.health));
        println!("allocated  {}", pool.allocated);
        println!("size       {}", pool.size);
        println!("free       {}", pool.free);
    })
}

pub(crate) fn render_pools(pools: &[PoolRecord], out: &mut dyn Write) -> std::io::Result<()> {
    let mut table = Table::new(&["NAME", "HEALTH", "ALLOC", "SIZE", "FREE"]);
    for pool in pools {
        table.row(vec![
            pool.name.clone(),
            pool.health.clone(),
            pool.allocated.clone(),
            pool.size.clone(),
            pool.free.clone(),
        ]);
    }
    table.render(out)
}
