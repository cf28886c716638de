// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.
//!
//! Every execution failure carries the attempted command line and the
//! tool's stderr verbatim, so the underlying cause is never lost.

use std::time::Duration;

/// Failure to establish or tear down a remote connection.
///
/// Fatal for the call that triggered it; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The transport program could not be run at all.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Authentication or the network handshake failed.
    #[error("failed to dial {destination}: {}", .diagnostic.trim())]
    Dial {
        destination: String,
        diagnostic: String,
    },

    /// The control connection went away after it was established.
    #[error("lost connection to {destination}: {}", .diagnostic.trim())]
    Lost {
        destination: String,
        diagnostic: String,
    },

    /// The control connection could not be shut down cleanly.
    #[error("failed to release connection to {destination}: {}", .diagnostic.trim())]
    Release {
        destination: String,
        diagnostic: String,
    },
}

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Command not found or could not be spawned.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
        stderr: String,
    },

    /// Feeding stdin or relaying stdout failed.
    #[error("stream error while running `{command}`: {source}")]
    Io {
        command: String,
        source: std::io::Error,
        stderr: String,
    },

    /// The command ran and reported failure.
    #[error("`{command}` failed with exit code {exit_code}: {}", .stderr.trim())]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The configured deadline expired; the command was killed.
    #[error("`{command}` timed out after {after:?}")]
    TimedOut {
        command: String,
        after: Duration,
        stderr: String,
    },
}

impl ExecError {
    /// The command line that was attempted, if one was built.
    pub fn command(&self) -> Option<&str> {
        match self {
            ExecError::Connection(_) => None,
            ExecError::Spawn { command, .. }
            | ExecError::Io { command, .. }
            | ExecError::Failed { command, .. }
            | ExecError::TimedOut { command, .. } => Some(command),
        }
    }

    /// Captured stderr of the command (empty for connection failures).
    pub fn stderr(&self) -> &str {
        match self {
            ExecError::Connection(_) => "",
            ExecError::Spawn { stderr, .. }
            | ExecError::Io { stderr, .. }
            | ExecError::Failed { stderr, .. }
            | ExecError::TimedOut { stderr, .. } => stderr,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Failed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
