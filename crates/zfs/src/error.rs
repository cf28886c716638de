// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use zfsh_core::{GrammarError, SchemaMismatch};
use zfsh_exec::{ConnectionError, ExecError};

/// Errors from dataset and pool operations
#[derive(Debug, Error)]
pub enum ZfsError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("unexpected output layout: {0}")]
    Schema(#[from] SchemaMismatch),

    #[error("bad diff output: {0}")]
    Grammar(#[from] GrammarError),

    #[error("cannot {operation} {name}: not supported for a {kind}")]
    UnsupportedKind {
        operation: &'static str,
        name: String,
        kind: String,
    },

    #[error("cannot send {name}: not a snapshot")]
    NotASnapshot { name: String },

    #[error("incremental send of {name} needs a source snapshot")]
    MissingSource { name: String },

    #[error("{name} not found")]
    NotFound { name: String },

    #[error("no value for property {property} of {name}")]
    MissingProperty { name: String, property: String },
}

impl From<ConnectionError> for ZfsError {
    fn from(e: ConnectionError) -> Self {
        ZfsError::Exec(ExecError::Connection(e))
    }
}

impl ZfsError {
    /// The tool's stderr when the failure came from a command.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ZfsError::Exec(e) => Some(e.stderr()),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ZfsError::Exec(e) => e.exit_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
