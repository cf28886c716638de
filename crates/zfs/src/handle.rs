// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Zfs`] handle and the plumbing shared by its operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;

use regex::Regex;
use zfsh_core::{map_row, PlatformFamily, Record, Row};
use zfsh_exec::{CommandSpec, ExecError, ExecutionTarget, Executor, SshConfig};

use crate::config::ZfsConfig;
use crate::error::ZfsError;

/// Usage text of a `zfs send` that accepts `-c` before the incremental options.
#[allow(clippy::expect_used)]
static LZ4_SEND_USAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"send \[-.*c.*\] \[-\[i").expect("constant regex pattern is valid")
});

/// Handle for running dataset and pool operations on one host.
///
/// Remote handles dial lazily and keep the connection open until
/// [`Zfs::close`].
#[derive(Debug)]
pub struct Zfs {
    executor: Executor,
    config: ZfsConfig,
    lz4_send: AtomicBool,
}

impl Zfs {
    pub fn new(target: ExecutionTarget, config: ZfsConfig) -> Self {
        Self {
            executor: Executor::new(target, config.exec.clone()),
            config,
            lz4_send: AtomicBool::new(false),
        }
    }

    pub fn local(config: ZfsConfig) -> Self {
        Self::new(ExecutionTarget::local(), config)
    }

    pub fn ssh(ssh: SshConfig, config: ZfsConfig) -> Self {
        Self::new(ExecutionTarget::ssh(ssh), config)
    }

    pub fn config(&self) -> &ZfsConfig {
        &self.config
    }

    pub fn platform(&self) -> PlatformFamily {
        self.config.platform
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Release the remote connection, if any.
    pub async fn close(&self) -> Result<(), ZfsError> {
        Ok(self.executor.close().await?)
    }

    /// Whether the last probe found compressed send support.
    pub fn lz4_send(&self) -> bool {
        self.lz4_send.load(Ordering::Relaxed)
    }

    /// Probe `zfs send` for `-c` support and remember the answer.
    ///
    /// The tool prints its usage to stderr and exits non-zero, so a
    /// failed run is the expected outcome here.
    pub async fn test_lz4_send_support(&self) -> Result<bool, ZfsError> {
        let usage = match self.run(self.zfs().args(["send", "--help"])).await {
            Ok(_) => String::new(),
            Err(ExecError::Failed { stderr, .. }) => stderr,
            Err(e) => return Err(e.into()),
        };
        let supported = LZ4_SEND_USAGE.is_match(&usage);
        tracing::debug!(supported, "probed compressed send");
        self.lz4_send.store(supported, Ordering::Relaxed);
        Ok(supported)
    }

    pub(crate) fn zfs<'a>(&self) -> CommandSpec<'a> {
        CommandSpec::new(&self.config.zfs_program)
    }

    pub(crate) fn zpool<'a>(&self) -> CommandSpec<'a> {
        CommandSpec::new(&self.config.zpool_program)
    }

    pub(crate) async fn run(&self, spec: CommandSpec<'_>) -> Result<Vec<Row>, ExecError> {
        self.executor.rows(spec).await
    }

    /// Run a single-object query and map its rows, the last row winning.
    pub(crate) async fn query_one<R: Record>(
        &self,
        spec: CommandSpec<'_>,
        name: &str,
    ) -> Result<R, ZfsError> {
        let rows = self.run(spec).await?;
        let mut found = None;
        for row in &rows {
            found = Some(map_row::<R>(row, self.config.platform)?);
        }
        found.ok_or_else(|| ZfsError::NotFound {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
