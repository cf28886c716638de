// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use zfsh_core::PlatformFamily;
use zfsh_exec::ExecConfig;

/// Settings for a [`Zfs`](crate::Zfs) handle.
#[derive(Debug, Clone)]
pub struct ZfsConfig {
    /// Dataset tool, resolved on the target's `PATH` unless absolute.
    pub zfs_program: String,
    /// Pool tool.
    pub zpool_program: String,
    /// Selects the column layout of list queries.
    pub platform: PlatformFamily,
    pub exec: ExecConfig,
}

impl Default for ZfsConfig {
    fn default() -> Self {
        Self {
            zfs_program: "zfs".to_string(),
            zpool_program: "zpool".to_string(),
            platform: PlatformFamily::host(),
            exec: ExecConfig::default(),
        }
    }
}

impl ZfsConfig {
    zfsh_core::setters! {
        into {
            zfs_program: String,
            zpool_program: String,
        }
        set {
            platform: PlatformFamily,
            exec: ExecConfig,
        }
    }
}
