// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use zfsh::ZfsError;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ZfsError> for ExitError {
    /// A failed tool run reports the tool's own stderr and exit code;
    /// anything else exits with 1.
    fn from(e: ZfsError) -> Self {
        match (e.exit_code(), e.stderr().map(str::trim)) {
            (Some(code), Some(stderr)) if !stderr.is_empty() => {
                Self::new(code.max(1), stderr.to_string())
            }
            (Some(code), _) => Self::new(code.max(1), e.to_string()),
            (None, _) => Self::new(1, e.to_string()),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
