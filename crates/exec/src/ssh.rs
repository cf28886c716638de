// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote execution over a multiplexed OpenSSH connection.
//!
//! Dialing starts a control master that authenticates once and then stays
//! in the background. Each command opens its own session through the
//! master's control socket, so concurrent callers can share one
//! connection. Releasing the connection asks the master to exit.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use uuid::Uuid;

use crate::error::ConnectionError;

/// How to reach a remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Private key file; `None` defers to the client's own configuration.
    pub identity: Option<PathBuf>,
    /// The ssh client binary.
    pub program: PathBuf,
    /// Extra `-o` options, e.g. `StrictHostKeyChecking=accept-new`.
    pub options: Vec<String>,
}

impl SshConfig {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            user: user.into(),
            identity: default_identity(),
            program: PathBuf::from("ssh"),
            options: Vec::new(),
        }
    }

    zfsh_core::setters! {
        into { program: PathBuf }
        set { port: u16 }
        option { identity: PathBuf }
    }

    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// `user@host`
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Arguments that start the control master.
    pub(crate) fn master_args(&self, control_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-M".to_string(),
            "-N".to_string(),
            "-f".to_string(),
            "-o".to_string(),
            format!("ControlPath={}", control_path.display()),
            "-o".to_string(),
            "ControlPersist=yes".to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
        ];
        if let Some(identity) = &self.identity {
            args.push("-i".to_string());
            args.push(identity.display().to_string());
        }
        args.extend(self.common_args());
        args
    }

    /// Arguments that run `line` as one session through the master.
    pub(crate) fn session_args(
        &self,
        control_path: &Path,
        line: &str,
        env: &[(String, String)],
    ) -> Vec<String> {
        // A dead master must not fall back to an interactive login.
        let mut args = vec![
            "-S".to_string(),
            control_path.display().to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
        ];
        if !env.is_empty() {
            let vars: Vec<String> = env.iter().map(|(k, v)| format!("{k}={v}")).collect();
            args.push("-o".to_string());
            args.push(format!("SetEnv={}", vars.join(" ")));
        }
        args.extend(self.common_args());
        args.push("--".to_string());
        args.push(line.to_string());
        args
    }

    /// Arguments that ask the master to exit.
    pub(crate) fn exit_args(&self, control_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            control_path.display().to_string(),
            "-O".to_string(),
            "exit".to_string(),
        ];
        args.extend(self.common_args());
        args
    }

    fn common_args(&self) -> Vec<String> {
        let mut args = vec!["-p".to_string(), self.port.to_string()];
        for option in &self.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }
        args.push(self.destination());
        args
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// `~/.ssh/id_dsa`, when a home directory is known.
pub fn default_identity() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("id_dsa"))
}

/// An authenticated control master.
#[derive(Debug)]
pub struct SshConnection {
    config: SshConfig,
    control_path: PathBuf,
}

impl SshConnection {
    /// Start a control master and wait until it has authenticated.
    pub async fn dial(config: &SshConfig) -> Result<Self, ConnectionError> {
        let control_path =
            std::env::temp_dir().join(format!("zfsh-{}.sock", Uuid::new_v4().simple()));
        let log_path = control_path.with_extension("log");

        // The backgrounded master keeps its stderr open, so it goes to a
        // file rather than a pipe we would have to drain.
        let log = std::fs::File::create(&log_path).map_err(|source| ConnectionError::Spawn {
            program: config.program_name(),
            source,
        })?;

        tracing::debug!(destination = %config.destination(), control = %control_path.display(), "dialing");
        let status = Command::new(&config.program)
            .args(config.master_args(&control_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(log))
            .status()
            .await;

        let diagnostic = tokio::fs::read_to_string(&log_path).await.unwrap_or_default();
        let _ = tokio::fs::remove_file(&log_path).await;

        let status = status.map_err(|source| ConnectionError::Spawn {
            program: config.program_name(),
            source,
        })?;
        if !status.success() {
            tracing::warn!(destination = %config.destination(), %status, "dial failed");
            return Err(ConnectionError::Dial {
                destination: config.destination(),
                diagnostic,
            });
        }

        Ok(Self {
            config: config.clone(),
            control_path,
        })
    }

    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    pub fn control_path(&self) -> &Path {
        &self.control_path
    }

    /// Fail fast when the master's control socket has disappeared.
    pub(crate) async fn ensure_alive(&self) -> Result<(), ConnectionError> {
        match tokio::fs::try_exists(&self.control_path).await {
            Ok(true) => Ok(()),
            _ => {
                tracing::warn!(destination = %self.config.destination(), "control socket is gone");
                Err(ConnectionError::Lost {
                    destination: self.config.destination(),
                    diagnostic: format!("control socket {} is gone", self.control_path.display()),
                })
            }
        }
    }

    /// A not-yet-spawned session that will run `line` remotely.
    pub(crate) fn session_command(&self, line: &str, env: &[(String, String)]) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(self.config.session_args(&self.control_path, line, env))
            .kill_on_drop(true);
        command
    }

    /// Ask the master to exit and remove its socket.
    pub async fn release(&self) -> Result<(), ConnectionError> {
        tracing::debug!(destination = %self.config.destination(), "releasing connection");
        let output = Command::new(&self.config.program)
            .args(self.config.exit_args(&self.control_path))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConnectionError::Spawn {
                program: self.config.program_name(),
                source,
            })?;
        let _ = tokio::fs::remove_file(&self.control_path).await;

        if !output.status.success() {
            return Err(ConnectionError::Release {
                destination: self.config.destination(),
                diagnostic: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// One remote command running through the master.
///
/// Opened per call and always closed afterwards, whatever the outcome.
#[derive(Debug)]
pub(crate) struct RemoteSession {
    child: Child,
}

impl RemoteSession {
    pub(crate) fn new(child: Child) -> Self {
        Self { child }
    }

    pub(crate) fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    /// Tear the session down, killing it if it is still running.
    pub(crate) async fn close(mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill().await;
        }
    }
}

#[cfg(test)]
#[path = "ssh_tests.rs"]
mod tests;
