// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file and its merge with command-line flags.
//!
//! The file is looked up in order: `--config`, `$ZFSH_CONFIG`, then
//! `<config dir>/zfsh/config.toml`. The first two must exist; the last is
//! optional. Flags given on the command line win over the file.
//!
//! ```toml
//! timeout_secs = 30
//!
//! [remote]
//! host = "nas.example"
//! user = "backup"
//! identity = "~/.ssh/id_ed25519"
//! ssh = "/usr/bin/ssh"
//! options = ["StrictHostKeyChecking=accept-new"]
//!
//! [tools]
//! zfs = "/sbin/zfs"
//! platform = "solaris"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use zfsh::{ExecConfig, PlatformFamily, SshConfig, TracingLogger, Zfs, ZfsConfig};

pub const CONFIG_ENV: &str = "ZFSH_CONFIG";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub timeout_secs: Option<u64>,
    pub remote: Option<RemoteSection>,
    pub tools: ToolsSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub identity: Option<PathBuf>,
    /// The ssh client binary.
    pub ssh: Option<PathBuf>,
    pub options: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    pub zfs: Option<String>,
    pub zpool: Option<String>,
    pub platform: Option<PlatformFamily>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load the first config file found; an absent default file is empty.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::read(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/zfsh/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zfsh").join("config.toml"))
}

/// Connection and tool settings taken from the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub identity: Option<PathBuf>,
    pub zfs: Option<String>,
    pub zpool: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Where and how to run, after merging flags over the file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ssh: Option<SshConfig>,
    pub zfs: ZfsConfig,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        let remote = file.remote.unwrap_or_default();
        let mut exec = ExecConfig::default().logger(std::sync::Arc::new(TracingLogger));
        if let Some(secs) = overrides.timeout_secs.or(file.timeout_secs) {
            exec = exec.timeout(Duration::from_secs(secs));
        }

        let mut zfs = ZfsConfig::default().exec(exec);
        if let Some(program) = overrides.zfs.or(file.tools.zfs) {
            zfs = zfs.zfs_program(program);
        }
        if let Some(program) = overrides.zpool.or(file.tools.zpool) {
            zfs = zfs.zpool_program(program);
        }
        if let Some(platform) = file.tools.platform {
            zfs = zfs.platform(platform);
        }

        let ssh = overrides.host.or(remote.host).map(|host| {
            let user = overrides
                .user
                .or(remote.user)
                .unwrap_or_else(current_user);
            let mut ssh = SshConfig::new(host, user);
            if let Some(port) = overrides.port.or(remote.port) {
                ssh = ssh.port(port);
            }
            if let Some(identity) = overrides.identity.or(remote.identity) {
                ssh = ssh.identity(expand_home(&identity));
            }
            if let Some(program) = remote.ssh {
                ssh = ssh.program(expand_home(&program));
            }
            for option in remote.options {
                ssh = ssh.option(option);
            }
            ssh
        });

        Self { ssh, zfs }
    }

    pub fn handle(self) -> Zfs {
        match self.ssh {
            Some(ssh) => Zfs::ssh(ssh, self.zfs),
            None => Zfs::local(self.zfs),
        }
    }
}

fn current_user() -> String {
    std::env::var("USER").unwrap_or_else(|_| "root".to_string())
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
