// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool records from `zpool list`.

use serde::Serialize;

use crate::record::{Column, PlatformFamily, Record};

/// Health states reported in the `health` column.
pub mod health {
    pub const ONLINE: &str = "ONLINE";
    pub const DEGRADED: &str = "DEGRADED";
    pub const FAULTED: &str = "FAULTED";
    pub const OFFLINE: &str = "OFFLINE";
    pub const UNAVAIL: &str = "UNAVAIL";
    pub const REMOVED: &str = "REMOVED";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolColumn {
    Name,
    Health,
    Allocated,
    Size,
    Free,
}

const POOL_COLUMNS: &[PoolColumn] = &[
    PoolColumn::Name,
    PoolColumn::Health,
    PoolColumn::Allocated,
    PoolColumn::Size,
    PoolColumn::Free,
];

impl Column for PoolColumn {
    fn name(self) -> &'static str {
        match self {
            PoolColumn::Name => "name",
            PoolColumn::Health => "health",
            PoolColumn::Allocated => "allocated",
            PoolColumn::Size => "size",
            PoolColumn::Free => "free",
        }
    }
}

/// A top-level storage pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolRecord {
    pub name: String,
    pub health: String,
    pub allocated: String,
    pub size: String,
    pub free: String,
}

impl PoolRecord {
    pub fn is_online(&self) -> bool {
        self.health == health::ONLINE
    }
}

impl Record for PoolRecord {
    type Column = PoolColumn;

    fn columns(_platform: PlatformFamily) -> &'static [PoolColumn] {
        POOL_COLUMNS
    }

    fn assign(&mut self, column: PoolColumn, value: String) {
        match column {
            PoolColumn::Name => self.name = value,
            PoolColumn::Health => self.health = value,
            PoolColumn::Allocated => self.allocated = value,
            PoolColumn::Size => self.size = value,
            PoolColumn::Free => self.free = value,
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
