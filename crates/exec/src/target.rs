// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where commands run: this host, or a remote host over SSH.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::ConnectionError;
use crate::ssh::{SshConfig, SshConnection};

/// Execution context for every command of a handle.
///
/// The remote variant dials lazily on first use and keeps the connection
/// until [`ExecutionTarget::close`]; the owner is responsible for calling it.
#[derive(Debug)]
pub enum ExecutionTarget {
    Local,
    Remote(RemoteHost),
}

impl ExecutionTarget {
    pub fn local() -> Self {
        ExecutionTarget::Local
    }

    pub fn ssh(config: SshConfig) -> Self {
        ExecutionTarget::Remote(RemoteHost::new(config))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ExecutionTarget::Local)
    }

    /// Prefix used in audit log events.
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            ExecutionTarget::Local => "LOCAL",
            ExecutionTarget::Remote(_) => "REMOTE",
        }
    }

    /// Release the remote connection, if one is open. A later command
    /// dials again.
    pub async fn close(&self) -> Result<(), ConnectionError> {
        match self {
            ExecutionTarget::Local => Ok(()),
            ExecutionTarget::Remote(remote) => remote.close().await,
        }
    }
}

/// A remote host and its lazily established connection.
#[derive(Debug)]
pub struct RemoteHost {
    config: SshConfig,
    // Held across the dial so concurrent first calls share one connection.
    connection: Mutex<Option<Arc<SshConnection>>>,
}

impl RemoteHost {
    pub fn new(config: SshConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    /// The open connection, dialing first if there is none.
    pub async fn connection(&self) -> Result<Arc<SshConnection>, ConnectionError> {
        let mut slot = self.connection.lock().await;
        if let Some(connection) = slot.as_ref() {
            return Ok(Arc::clone(connection));
        }
        let connection = Arc::new(SshConnection::dial(&self.config).await?);
        *slot = Some(Arc::clone(&connection));
        Ok(connection)
    }

    pub async fn close(&self) -> Result<(), ConnectionError> {
        let connection = self.connection.lock().await.take();
        match connection {
            Some(connection) => connection.release().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
