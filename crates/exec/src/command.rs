// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Description of one command invocation.
//!
//! A spec runs in one of two ways:
//!
//! - **Direct** (the default): the program is executed with an argv array.
//!   Arguments are passed through untouched; nothing re-parses them.
//! - **Shell** (when [`CommandSpec::pipe_to`] or [`CommandSpec::pipe_from`]
//!   is set): program, arguments and filters are joined with spaces into
//!   one line and handed to a shell. Quoting is then the caller's job.
//!
//! Remote targets always receive the joined line, since the session runs
//! it through the remote login shell.

use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite};

/// Borrowed byte source for a command's stdin.
pub type Input<'a> = &'a mut (dyn AsyncRead + Send + Unpin);

/// Borrowed byte sink that receives a command's stdout verbatim.
pub type Sink<'a> = &'a mut (dyn AsyncWrite + Send + Unpin);

/// Program, arguments, filters, stream bindings and environment for one call.
pub struct CommandSpec<'a> {
    program: String,
    args: Vec<String>,
    pipe_from: Option<String>,
    pipe_to: Option<String>,
    stdin: Option<Input<'a>>,
    stdout: Option<Sink<'a>>,
    env: Vec<(String, String)>,
}

impl<'a> CommandSpec<'a> {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            pipe_from: None,
            pipe_to: None,
            stdin: None,
            stdout: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Pipe stdout into `filter` (e.g. `lz4`). Switches to shell execution.
    pub fn pipe_to(mut self, filter: impl Into<String>) -> Self {
        self.pipe_to = Some(filter.into());
        self
    }

    /// Run `filter` first and pipe its stdout into the program
    /// (e.g. `lz4 -d`). Stdin feeds the filter. Switches to shell execution.
    pub fn pipe_from(mut self, filter: impl Into<String>) -> Self {
        self.pipe_from = Some(filter.into());
        self
    }

    /// Feed stdin from `input`; without it stdin is not connected.
    pub fn stdin(mut self, input: Input<'a>) -> Self {
        self.stdin = Some(input);
        self
    }

    /// Send stdout to `sink` instead of capturing it as rows.
    pub fn stdout(mut self, sink: Sink<'a>) -> Self {
        self.stdout = Some(sink);
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn environment(&self) -> &[(String, String)] {
        &self.env
    }

    /// True when the spec must be run through a shell.
    pub fn is_piped(&self) -> bool {
        self.pipe_from.is_some() || self.pipe_to.is_some()
    }

    pub fn has_sink(&self) -> bool {
        self.stdout.is_some()
    }

    /// The whole invocation as one space-joined line.
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        if let Some(filter) = &self.pipe_from {
            line.push_str(filter);
            line.push_str(" | ");
        }
        line.push_str(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        if let Some(filter) = &self.pipe_to {
            line.push_str(" | ");
            line.push_str(filter);
        }
        line
    }

    /// Split off the stream bindings, leaving a plain description.
    pub(crate) fn into_parts(self) -> (Invocation, Option<Input<'a>>, Option<Sink<'a>>) {
        let invocation = Invocation {
            line: self.command_line(),
            piped: self.is_piped(),
            program: self.program,
            args: self.args,
            env: self.env,
        };
        (invocation, self.stdin, self.stdout)
    }
}

impl fmt::Debug for CommandSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("line", &self.command_line())
            .field("env", &self.env)
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .finish()
    }
}

/// What to run, without the borrowed streams.
#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) env: Vec<(String, String)>,
    pub(crate) line: String,
    pub(crate) piped: bool,
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
