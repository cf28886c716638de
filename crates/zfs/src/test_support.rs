// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted stand-ins for the storage tools.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;
use zfsh_core::PlatformFamily;

use crate::{Zfs, ZfsConfig};

/// A directory of fake `zfs`/`zpool` scripts that log their arguments.
pub(crate) struct FakeHost {
    dir: TempDir,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Install `name`; every run appends its arguments to `<name>.calls`
    /// before `body` executes.
    pub(crate) fn tool(&self, name: &str, body: &str) {
        let path = self.path(name);
        let script = format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"$0.calls\"\n{body}");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub(crate) fn calls(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.path(&format!("{name}.calls")))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap_or_default()
    }

    pub(crate) fn config(&self) -> ZfsConfig {
        ZfsConfig::default()
            .zfs_program(self.path("zfs").display().to_string())
            .zpool_program(self.path("zpool").display().to_string())
            .platform(PlatformFamily::OpenZfs)
    }

    pub(crate) fn handle(&self) -> Zfs {
        Zfs::local(self.config())
    }
}

/// Shell `case` on the subcommand; each arm prints its lines verbatim.
pub(crate) fn respond(arms: &[(&str, &[String])]) -> String {
    let mut body = String::from("case \"$1\" in\n");
    for (subcommand, lines) in arms {
        body.push_str(&format!("{subcommand})\ncat <<'OUT'\n"));
        for line in lines.iter() {
            body.push_str(line);
            body.push('\n');
        }
        body.push_str("OUT\n;;\n");
    }
    body.push_str("esac\n");
    body
}

/// A script body that fails with `message` on stderr.
pub(crate) fn failing(message: &str, code: i32) -> String {
    format!("echo \"{message}\" >&2\nexit {code}\n")
}

/// One `zfs list` line in the OpenZFS column layout.
pub(crate) fn dataset_line(name: &str, kind: &str) -> String {
    [
        name, "-", "96K", "1.2G", "/mnt", "lz4", kind, "-", "none", "96K", "42K", "-",
    ]
    .join("\t")
}

/// Columns of [`dataset_line`] joined for `-o`.
pub(crate) const DATASET_COLUMNS: &str = "name,origin,used,available,mountpoint,compression,type,volsize,quota,written,logicalused,receive_resume_token";

pub(crate) fn pool_line(name: &str, health: &str) -> String {
    [name, health, "1.5G", "2G", "500M"].join("\t")
}
