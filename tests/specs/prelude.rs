//! Helpers shared by every spec: a fake host with scripted tools and a
//! fluent wrapper around the `zfsh` binary.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;

pub use similar_asserts::assert_eq;
use tempfile::TempDir;

/// `zfsh` with an isolated home and no config file.
pub fn cli() -> Run {
    let home = tempfile::tempdir().unwrap();
    let run = Run::new(home.path());
    // Keep the directory alive for the duration of the run.
    Run {
        _home: Some(home),
        ..run
    }
}

/// A directory holding fake `zfs`, `zpool` and `ssh` scripts.
///
/// Each script appends its arguments to `<name>.calls` before running
/// its body.
pub struct Host {
    dir: TempDir,
}

impl Host {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn tool(&self, name: &str, body: &str) -> &Self {
        let path = self.path(name);
        let script = format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"$0.calls\"\n{body}");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    /// `ssh` that runs the session's command line locally.
    pub fn ssh(&self) -> &Self {
        self.tool(
            "ssh",
            "for last; do\n\
             case \"$last\" in ControlPath=*) socket=\"${last#ControlPath=}\" ;; esac\n\
             done\n\
             case \" $* \" in\n\
             *\" -M \"*) : > \"$socket\"; exit 0 ;;\n\
             *\" -O \"*) exit 0 ;;\n\
             esac\n\
             exec sh -c \"$last\"\n",
        )
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn calls(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.path(&format!("{name}.calls")))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// `zfsh` wired to this host's fake tools.
    pub fn zfsh(&self) -> Run {
        let mut run = Run::new(self.dir.path());
        run.cmd.arg("--zfs").arg(self.path("zfs"));
        run.cmd.arg("--zpool").arg(self.path("zpool"));
        run
    }
}

/// Shell `case` on the subcommand; each arm prints its lines verbatim.
pub fn respond(arms: &[(&str, &[&str])]) -> String {
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

pub fn dataset_line(name: &str, kind: &str) -> String {
    [
        name, "-", "96K", "1.2G", "/mnt", "lz4", kind, "-", "none", "96K", "42K", "-",
    ]
    .join("\t")
}

pub struct Run {
    cmd: assert_cmd::Command,
    _home: Option<TempDir>,
}

impl Run {
    fn new(home: &Path) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("zfsh").unwrap();
        cmd.env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("ZFSH_CONFIG")
            .env_remove("ZFSH_LOG");
        Self { cmd, _home: None }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome { output };
        assert!(
            outcome.output.status.success(),
            "expected success\nstdout: {}\nstderr: {}",
            outcome.stdout(),
            outcome.stderr()
        );
        outcome
    }

    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome { output };
        assert!(
            !outcome.output.status.success(),
            "expected failure\nstdout: {}",
            outcome.stdout()
        );
        outcome
    }
}

pub struct Outcome {
    output: Output,
}

impl Outcome {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }
}
