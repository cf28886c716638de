// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake binaries for exercising the executor without a real SSH server.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Stand-in for `ssh`: records each invocation in `ssh.log` next to
/// itself, creates the control socket for a master, succeeds for control
/// commands, and runs the final argument through `sh` for sessions.
const FAKE_SSH: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/ssh.log"
for last; do
  case "$last" in
    ControlPath=*) socket="${last#ControlPath=}" ;;
  esac
done
case " $* " in
  *" -M "*) : > "$socket"; exit 0 ;;
  *" -O "*) exit 0 ;;
esac
exec sh -c "$last"
"#;

/// Stand-in for `ssh` whose master comes up but whose sessions are
/// refused by the multiplexer.
const DROPPING_SSH: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/ssh.log"
for arg; do
  case "$arg" in
    ControlPath=*) : > "${arg#ControlPath=}"; exit 0 ;;
  esac
done
case " $* " in
  *" -O "*) exit 0 ;;
esac
echo "mux_client_request_session: session request failed: Session open refused by peer" >&2
exit 255
"#;

/// Stand-in for `ssh` whose master fails to authenticate.
const REFUSING_SSH: &str = r#"#!/bin/sh
echo "Permission denied (publickey)." >&2
exit 255
"#;

pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub(crate) fn fake_ssh(dir: &Path) -> PathBuf {
    write_script(dir, "ssh", FAKE_SSH)
}

pub(crate) fn dropping_ssh(dir: &Path) -> PathBuf {
    write_script(dir, "ssh", DROPPING_SSH)
}

pub(crate) fn refusing_ssh(dir: &Path) -> PathBuf {
    write_script(dir, "ssh", REFUSING_SSH)
}

/// Lines recorded by [`fake_ssh`].
pub(crate) fn ssh_calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("ssh.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
