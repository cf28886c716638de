// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostics go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `ZFSH_LOG=zfsh=debug`.
pub const LOG_ENV: &str = "ZFSH_LOG";

pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
