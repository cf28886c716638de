// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zfsh: typed wrappers around the `zfs` and `zpool` tools
//!
//! A [`Zfs`] handle runs every operation through one
//! [`Executor`](zfsh_exec::Executor), on this host or over SSH, and maps
//! the tool's tab-separated output onto [`DatasetRecord`] and
//! [`PoolRecord`] values.

mod config;
mod dataset;
mod error;
mod flags;
mod handle;
mod pool;
mod stream;

pub use config::ZfsConfig;
pub use error::ZfsError;
pub use flags::{DestroyFlags, SendFlags};
pub use handle::Zfs;

pub use zfsh_core::{
    health, ChangeType, DatasetKind, DatasetRecord, InodeChange, InodeType, PlatformFamily,
    PoolRecord, RawPath,
};
pub use zfsh_exec::{
    CommandLogger, ExecConfig, ExecError, Input, NoopLogger, Sink, SshConfig, TracingLogger,
};

#[cfg(all(test, unix))]
mod test_support;
