// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command audit logging.
//!
//! The executor reports every invocation twice: before it starts
//! (`["LOCAL:<id>" | "REMOTE:<id>", "START", <command line>]`) and after it
//! completes (`["ID:<id>", "DONE"]`). Implementations must return quickly;
//! the executor waits on them inline.

/// Receives one event per call as a sequence of strings.
pub trait CommandLogger: Send + Sync {
    fn log(&self, event: &[&str]);
}

/// Discards every event. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl CommandLogger for NoopLogger {
    fn log(&self, _event: &[&str]) {}
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl CommandLogger for TracingLogger {
    fn log(&self, event: &[&str]) {
        tracing::info!(target: "zfsh::command", "{}", event.join(" "));
    }
}

impl<F> CommandLogger for F
where
    F: Fn(&[&str]) + Send + Sync,
{
    fn log(&self, event: &[&str]) {
        self(event)
    }
}

/// Keeps every event in memory.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: parking_lot::Mutex<Vec<Vec<String>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Vec<String>> {
        self.events.lock().clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CommandLogger for RecordingLogger {
    fn log(&self, event: &[&str]) {
        self.events
            .lock()
            .push(event.iter().map(|s| s.to_string()).collect());
    }
}
