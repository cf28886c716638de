// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool queries and lifecycle.

use indexmap::IndexMap;
use zfsh_core::{column_list, encode_properties, map_grouped, PoolRecord};

use crate::error::ZfsError;
use crate::handle::Zfs;

impl Zfs {
    pub async fn get_zpool(&self, name: &str) -> Result<PoolRecord, ZfsError> {
        let spec = self.zpool().args([
            "list".to_string(),
            "-H".to_string(),
            "-o".to_string(),
            column_list::<PoolRecord>(self.platform()),
            name.to_string(),
        ]);
        self.query_one(spec, name).await
    }

    /// Every pool visible on the target.
    pub async fn list_zpools(&self) -> Result<Vec<PoolRecord>, ZfsError> {
        let spec = self.zpool().args([
            "list".to_string(),
            "-H".to_string(),
            "-o".to_string(),
            column_list::<PoolRecord>(self.platform()),
        ]);
        let rows = self.run(spec).await?;
        Ok(map_grouped(&rows, self.platform())?)
    }

    /// Create a pool from `vdevs`, e.g. `["mirror", "/dev/sda", "/dev/sdb"]`.
    pub async fn create_zpool(
        &self,
        name: &str,
        properties: &IndexMap<String, String>,
        vdevs: &[&str],
    ) -> Result<PoolRecord, ZfsError> {
        let spec = self
            .zpool()
            .arg("create")
            .args(encode_properties(properties))
            .arg(name)
            .args(vdevs.iter().copied());
        self.run(spec).await?;
        tracing::info!(pool = name, "created pool");
        self.get_zpool(name).await
    }

    pub async fn destroy_zpool(&self, pool: &PoolRecord) -> Result<(), ZfsError> {
        self.run(self.zpool().args(["destroy", pool.name.as_str()]))
            .await?;
        tracing::info!(pool = %pool.name, "destroyed pool");
        Ok(())
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
