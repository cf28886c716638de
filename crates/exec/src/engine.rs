// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running a [`CommandSpec`] against an [`ExecutionTarget`].
//!
//! A call spawns the command (locally, or as a session on the remote
//! connection), feeds stdin, relays or captures stdout, always captures
//! stderr, and waits for completion. Stream relays and the wait run
//! concurrently, so large streams cannot stall on a full pipe. The caller
//! is suspended until everything has finished. Nothing is retried.

use std::fmt;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;
use zfsh_core::{tokenize, Row};

use crate::command::{CommandSpec, Input, Invocation, Sink};
use crate::error::{ConnectionError, ExecError};
use crate::logger::{CommandLogger, NoopLogger};
use crate::ssh::RemoteSession;
use crate::target::ExecutionTarget;

/// How long a killed command's stderr may take to reach end of file.
const STDERR_GRACE: Duration = Duration::from_millis(100);

/// Exit status ssh reports when the session itself could not run.
const TRANSPORT_FAILURE: i32 = 255;

/// Environment every command starts with, so output is locale-independent.
pub fn default_env() -> Vec<(String, String)> {
    vec![
        ("LC_CTYPE".to_string(), "C".to_string()),
        ("LANG".to_string(), "en_US.UTF-8".to_string()),
    ]
}

/// Executor settings fixed at construction.
#[derive(Clone)]
pub struct ExecConfig {
    pub logger: Arc<dyn CommandLogger>,
    /// Base environment; a spec's own variables are applied after these.
    pub env: Vec<(String, String)>,
    /// Kill the command if it has not finished within this long.
    pub timeout: Option<Duration>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            logger: Arc::new(NoopLogger),
            env: default_env(),
            timeout: None,
        }
    }
}

impl fmt::Debug for ExecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecConfig")
            .field("env", &self.env)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ExecConfig {
    zfsh_core::setters! {
        option { timeout: Duration }
    }

    pub fn logger(mut self, logger: Arc<dyn CommandLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// What a successful call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Captured stdout, split into rows.
    Rows(Vec<Row>),
    /// Stdout went to the caller's sink.
    Streamed,
}

impl CommandOutput {
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            CommandOutput::Rows(rows) => rows,
            CommandOutput::Streamed => Vec::new(),
        }
    }
}

/// A running command, local or remote.
enum Completion {
    Local(Child),
    Remote(RemoteSession),
}

impl Completion {
    fn child(&mut self) -> &mut Child {
        match self {
            Completion::Local(child) => child,
            Completion::Remote(session) => session.child_mut(),
        }
    }

    async fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child().wait().await
    }

    async fn kill(&mut self) {
        let _ = self.child().kill().await;
    }

    async fn close(self) {
        match self {
            Completion::Local(_) => {}
            Completion::Remote(session) => session.close().await,
        }
    }
}

/// Everything collected from a finished command.
struct Finished {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    streams: io::Result<()>,
}

/// Runs commands against one target.
#[derive(Debug)]
pub struct Executor {
    target: Arc<ExecutionTarget>,
    config: ExecConfig,
}

impl Executor {
    pub fn new(target: impl Into<Arc<ExecutionTarget>>, config: ExecConfig) -> Self {
        Self {
            target: target.into(),
            config,
        }
    }

    pub fn local() -> Self {
        Self::new(ExecutionTarget::Local, ExecConfig::default())
    }

    pub fn target(&self) -> &ExecutionTarget {
        &self.target
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Release the target's remote connection, if any.
    pub async fn close(&self) -> Result<(), ConnectionError> {
        self.target.close().await
    }

    /// Run `spec` to completion.
    ///
    /// Returns rows when stdout was captured, or [`CommandOutput::Streamed`]
    /// when the spec supplied its own sink.
    pub async fn execute(&self, spec: CommandSpec<'_>) -> Result<CommandOutput, ExecError> {
        let (invocation, input, sink) = spec.into_parts();
        let id = Uuid::new_v4().to_string();
        let tag = format!("{}:{}", self.target.tag(), id);
        self.config.logger.log(&[&tag, "START", &invocation.line]);

        let span = tracing::info_span!(
            "zfsh.exec",
            id = %id,
            target = self.target.tag(),
            cmd = %invocation.line,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        let start = Instant::now();
        let result = self
            .run(&invocation, input, sink)
            .instrument(span.clone())
            .await;

        span.record("duration_ms", start.elapsed().as_millis() as u64);
        match &result {
            Ok(_) => {
                span.record("exit_code", 0);
            }
            Err(ExecError::Failed { exit_code, .. }) => {
                span.record("exit_code", *exit_code);
            }
            Err(e) => {
                tracing::debug!(parent: &span, error = %e, "command did not complete");
            }
        }

        let done = format!("ID:{id}");
        self.config.logger.log(&[&done, "DONE"]);
        result
    }

    /// Run `spec` and return its rows.
    pub async fn rows(&self, spec: CommandSpec<'_>) -> Result<Vec<Row>, ExecError> {
        Ok(self.execute(spec).await?.into_rows())
    }

    async fn run(
        &self,
        invocation: &Invocation,
        input: Option<Input<'_>>,
        sink: Option<Sink<'_>>,
    ) -> Result<CommandOutput, ExecError> {
        let env: Vec<(String, String)> = self
            .config
            .env
            .iter()
            .chain(&invocation.env)
            .cloned()
            .collect();

        let mut destination = None;
        let mut command = match &*self.target {
            ExecutionTarget::Local => local_command(invocation, &env),
            ExecutionTarget::Remote(remote) => {
                let connection = remote.connection().await?;
                connection.ensure_alive().await?;
                destination = Some(remote.config().destination());
                connection.session_command(&invocation.line, &env)
            }
        };
        command
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|source| ExecError::Spawn {
            command: invocation.line.clone(),
            source,
            stderr: String::new(),
        })?;
        let mut completion = match &*self.target {
            ExecutionTarget::Local => Completion::Local(child),
            ExecutionTarget::Remote(_) => Completion::Remote(RemoteSession::new(child)),
        };

        let streamed = sink.is_some();
        let outcome = self.drive(&mut completion, input, sink, &invocation.line).await;
        completion.close().await;
        let finished = outcome?;

        let stderr = String::from_utf8_lossy(&finished.stderr).into_owned();
        if !finished.status.success() {
            let exit_code = finished.status.code().unwrap_or(-1);
            if let (TRANSPORT_FAILURE, Some(destination)) = (exit_code, destination) {
                return Err(ConnectionError::Lost {
                    destination,
                    diagnostic: stderr,
                }
                .into());
            }
            return Err(ExecError::Failed {
                command: invocation.line.clone(),
                exit_code,
                stderr,
            });
        }
        if let Err(source) = finished.streams {
            return Err(ExecError::Io {
                command: invocation.line.clone(),
                source,
                stderr,
            });
        }

        if streamed {
            return Ok(CommandOutput::Streamed);
        }
        if !finished.stdout.is_empty() && !finished.stdout.ends_with(b"\n") {
            tracing::warn!(cmd = %invocation.line, "output lacks a trailing newline; the last row may be truncated");
        }
        let stdout = String::from_utf8_lossy(&finished.stdout);
        Ok(CommandOutput::Rows(tokenize(&stdout)))
    }

    /// Relay streams and wait, honoring the configured deadline.
    async fn drive(
        &self,
        completion: &mut Completion,
        input: Option<Input<'_>>,
        sink: Option<Sink<'_>>,
        line: &str,
    ) -> Result<Finished, ExecError> {
        let child = completion.child();
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = StderrCapture::start(child.stderr.take());

        let joined = async {
            tokio::join!(
                completion.wait(),
                feed_stdin(input, stdin),
                relay_stdout(stdout, sink),
            )
        };

        let (status, fed, relayed) = match self.config.timeout {
            None => joined.await,
            Some(limit) => {
                let timed = tokio::time::timeout(limit, joined).await;
                match timed {
                    Ok(done) => done,
                    Err(_) => {
                        completion.kill().await;
                        let stderr = stderr.drain(STDERR_GRACE).await;
                        return Err(ExecError::TimedOut {
                            command: line.to_string(),
                            after: limit,
                            stderr: String::from_utf8_lossy(&stderr).into_owned(),
                        });
                    }
                }
            }
        };
        let stderr = stderr.finish().await;

        let status = status.map_err(|source| ExecError::Io {
            command: line.to_string(),
            source,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })?;
        let (stdout, streams) = match (fed, relayed) {
            (Ok(()), Ok(stdout)) => (stdout, Ok(())),
            (Err(e), Ok(stdout)) => (stdout, Err(e)),
            (_, Err(e)) => (Vec::new(), Err(e)),
        };

        Ok(Finished {
            status,
            stdout,
            stderr,
            streams,
        })
    }
}

/// Direct argv execution, or `sh -c` when the spec is piped.
fn local_command(invocation: &Invocation, env: &[(String, String)]) -> Command {
    let mut command = if invocation.piped {
        let mut command = Command::new("sh");
        command.arg("-c").arg(&invocation.line);
        command
    } else {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command
    };
    command
        .envs(env.iter().map(|(k, v)| (k, v)))
        .kill_on_drop(true);
    command
}

async fn feed_stdin(input: Option<Input<'_>>, pipe: Option<ChildStdin>) -> io::Result<()> {
    let (Some(input), Some(mut pipe)) = (input, pipe) else {
        return Ok(());
    };
    match tokio::io::copy(input, &mut pipe).await {
        Ok(_) => Ok(()),
        // The command stopped reading; its exit status explains why.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e),
    }
    // Dropping the pipe closes it, signalling EOF.
}

async fn relay_stdout(pipe: Option<ChildStdout>, sink: Option<Sink<'_>>) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let Some(mut pipe) = pipe else {
        return Ok(captured);
    };
    match sink {
        Some(sink) => {
            tokio::io::copy(&mut pipe, &mut *sink).await?;
            sink.flush().await?;
        }
        None => {
            pipe.read_to_end(&mut captured).await?;
        }
    }
    Ok(captured)
}

/// Stderr collected by a background reader, so it survives a timeout.
struct StderrCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    reader: JoinHandle<()>,
}

impl StderrCapture {
    fn start(pipe: Option<ChildStderr>) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let collected = Arc::clone(&buffer);
        let reader = tokio::spawn(async move {
            let Some(mut pipe) = pipe else {
                return;
            };
            let mut chunk = [0u8; 4096];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => collected.lock().extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        tracing::debug!(error = %e, "stderr read failed; diagnostic may be truncated");
                        break;
                    }
                }
            }
        });
        Self { buffer, reader }
    }

    /// Everything written before the pipe closed.
    async fn finish(self) -> Vec<u8> {
        let StderrCapture { buffer, reader } = self;
        let _ = reader.await;
        let mut buffer = buffer.lock();
        std::mem::take(&mut *buffer)
    }

    /// What arrived so far, waiting at most `grace` for end of file.
    ///
    /// A killed command's children may still hold the pipe open.
    async fn drain(mut self, grace: Duration) -> Vec<u8> {
        if tokio::time::timeout(grace, &mut self.reader).await.is_err() {
            self.reader.abort();
        }
        let mut buffer = self.buffer.lock();
        std::mem::take(&mut *buffer)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
