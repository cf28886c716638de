// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse error types.
//!
//! Every error is raised eagerly for the first bad row or field and aborts
//! the whole batch, so callers never see a partially typed result set.

use crate::diff::ChangeType;

/// A row's field count does not match the column layout for the platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "output does not match the layout expected on this platform: \
     expected {expected} fields, got {actual} in `{row}`"
)]
pub struct SchemaMismatch {
    pub expected: usize,
    pub actual: usize,
    /// The offending row, fields joined by a single space.
    pub row: String,
}

/// An octal escape in a path field is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("invalid octal code at byte {offset}: too short")]
    Truncated { offset: usize },

    #[error("invalid octal code `\\{digits}` at byte {offset}")]
    InvalidDigits { offset: usize, digits: String },
}

/// A diff-stream row violates the change grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("empty line")]
    EmptyRow,

    #[error("unknown change type `{0}`")]
    UnknownChangeType(String),

    #[error(
        "mismatching number of fields for {change}: expected {expected}, got {actual} in `{line}`"
    )]
    FieldCount {
        change: ChangeType,
        expected: &'static str,
        actual: usize,
        line: String,
    },

    #[error("unknown inode type `{0}`")]
    UnknownInodeType(String),

    #[error("failed to parse file name `{field}`: {source}")]
    BadPath {
        field: String,
        #[source]
        source: EscapeError,
    },

    #[error("rename without a target path")]
    EmptyRenameTarget,

    #[error("failed to parse reference count `{0}`")]
    BadReferenceCount(String),

    /// Batch wrapper naming the line that failed.
    #[error("failed to parse line {index} of diff output `{line}`: {source}")]
    AtLine {
        index: usize,
        line: String,
        #[source]
        source: Box<GrammarError>,
    },
}

impl GrammarError {
    /// The innermost error, skipping any [`GrammarError::AtLine`] wrapper.
    pub fn root(&self) -> &GrammarError {
        match self {
            GrammarError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}
