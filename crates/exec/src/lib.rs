// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zfsh-exec: run the storage tools on this host or over SSH
//!
//! Build a [`CommandSpec`], pick an [`ExecutionTarget`], and hand both to an
//! [`Executor`]. Local and remote runs share one contract: captured stdout
//! comes back as rows, and failures carry the command line and stderr.

mod command;
mod engine;
mod error;
mod logger;
mod ssh;
mod target;

pub use command::{CommandSpec, Input, Sink};
pub use engine::{default_env, CommandOutput, ExecConfig, Executor};
pub use error::{ConnectionError, ExecError};
#[cfg(any(test, feature = "test-support"))]
pub use logger::RecordingLogger;
pub use logger::{CommandLogger, NoopLogger, TracingLogger};
pub use ssh::{default_identity, SshConfig, SshConnection};
pub use target::{ExecutionTarget, RemoteHost};

#[cfg(all(test, unix))]
mod test_support;
