// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg(unix)]

use std::sync::Arc;

use yare::parameterized;

use super::*;
use crate::test_support::{dropping_ssh, fake_ssh, refusing_ssh, ssh_calls};
use crate::{CommandSpec, ExecConfig, ExecError, Executor, RecordingLogger};

fn remote(program: std::path::PathBuf) -> ExecutionTarget {
    ExecutionTarget::ssh(SshConfig::new("storage.example", "root").program(program))
}

fn masters(calls: &[String]) -> usize {
    calls.iter().filter(|c| c.starts_with("-M ")).count()
}

#[parameterized(
    local = { ExecutionTarget::local(), "LOCAL", true },
    remote = { ExecutionTarget::ssh(SshConfig::new("h", "u")), "REMOTE", false },
)]
fn tags(target: ExecutionTarget, tag: &str, local: bool) {
    assert_eq!(target.tag(), tag);
    assert_eq!(target.is_local(), local);
}

#[tokio::test]
async fn local_close_is_a_no_op() {
    ExecutionTarget::local().close().await.unwrap();
}

#[tokio::test]
async fn remote_runs_return_rows() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Executor::new(remote(fake_ssh(dir.path())), ExecConfig::default());

    let rows = executor
        .rows(CommandSpec::new("printf").arg("'tank 1G\\n'"))
        .await
        .unwrap();
    assert_eq!(rows, vec![vec!["tank".to_string(), "1G".to_string()]]);

    let calls = ssh_calls(dir.path());
    assert_eq!(masters(&calls), 1);
    assert!(calls[1].ends_with("root@storage.example -- printf 'tank 1G\\n'"), "{calls:?}");
    executor.close().await.unwrap();
}

#[tokio::test]
async fn remote_failure_is_reported_like_local() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Executor::new(remote(fake_ssh(dir.path())), ExecConfig::default());

    let err = executor
        .execute(CommandSpec::new("sh").args(["-c", "'echo gone >&2; exit 2'"]))
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), Some(2));
    assert_eq!(err.stderr(), "gone\n");
    executor.close().await.unwrap();
}

#[tokio::test]
async fn connection_is_dialed_once() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Arc::new(Executor::new(
        remote(fake_ssh(dir.path())),
        ExecConfig::default(),
    ));

    executor.rows(CommandSpec::new("true")).await.unwrap();
    let (a, b) = tokio::join!(
        executor.rows(CommandSpec::new("echo").arg("a")),
        executor.rows(CommandSpec::new("echo").arg("b")),
    );
    assert_eq!(a.unwrap(), vec![vec!["a".to_string()]]);
    assert_eq!(b.unwrap(), vec![vec!["b".to_string()]]);

    assert_eq!(masters(&ssh_calls(dir.path())), 1);
    executor.close().await.unwrap();
}

#[tokio::test]
async fn close_releases_and_next_call_redials() {
    let dir = tempfile::tempdir().unwrap();
    let target = remote(fake_ssh(dir.path()));
    let ExecutionTarget::Remote(host) = &target else {
        unreachable!()
    };
    assert!(!host.is_connected().await);
    host.connection().await.unwrap();
    assert!(host.is_connected().await);

    target.close().await.unwrap();
    let ExecutionTarget::Remote(host) = &target else {
        unreachable!()
    };
    assert!(!host.is_connected().await);
    let calls = ssh_calls(dir.path());
    assert!(calls.last().unwrap().contains("-O exit"), "{calls:?}");

    host.connection().await.unwrap();
    assert_eq!(masters(&ssh_calls(dir.path())), 2);
    target.close().await.unwrap();
}

#[tokio::test]
async fn closing_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let target = remote(fake_ssh(dir.path()));
    target.close().await.unwrap();
    target.close().await.unwrap();
    assert!(ssh_calls(dir.path()).is_empty());
}

#[tokio::test]
async fn refused_dial_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Arc::new(RecordingLogger::new());
    let executor = Executor::new(
        remote(refusing_ssh(dir.path())),
        ExecConfig::default().logger(logger.clone()),
    );

    let err = executor
        .execute(CommandSpec::new("zfs").arg("list"))
        .await
        .unwrap_err();
    match err {
        ExecError::Connection(ConnectionError::Dial {
            destination,
            diagnostic,
        }) => {
            assert_eq!(destination, "root@storage.example");
            assert!(diagnostic.contains("Permission denied"), "{diagnostic}");
        }
        other => panic!("expected dial failure, got {other:?}"),
    }

    let events = logger.events();
    assert!(events[0][0].starts_with("REMOTE:"));
    assert_eq!(events[1][1], "DONE");
}

#[tokio::test]
async fn vanished_control_socket_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = Arc::new(remote(fake_ssh(dir.path())));
    let executor = Executor::new(Arc::clone(&target), ExecConfig::default());
    executor.rows(CommandSpec::new("true")).await.unwrap();

    let ExecutionTarget::Remote(host) = &*target else {
        unreachable!()
    };
    let socket = host.connection().await.unwrap().control_path().to_path_buf();
    std::fs::remove_file(&socket).unwrap();
    let before = ssh_calls(dir.path()).len();

    let err = executor
        .execute(CommandSpec::new("zfs").arg("list"))
        .await
        .unwrap_err();
    match err {
        ExecError::Connection(ConnectionError::Lost {
            destination,
            diagnostic,
        }) => {
            assert_eq!(destination, "root@storage.example");
            assert!(diagnostic.contains("control socket"), "{diagnostic}");
        }
        other => panic!("expected lost connection, got {other:?}"),
    }
    // No session was attempted, so no direct login either.
    assert_eq!(ssh_calls(dir.path()).len(), before);
}

#[tokio::test]
async fn refused_session_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Executor::new(remote(dropping_ssh(dir.path())), ExecConfig::default());

    let err = executor
        .execute(CommandSpec::new("zfs").arg("list"))
        .await
        .unwrap_err();
    match err {
        ExecError::Connection(ConnectionError::Lost { diagnostic, .. }) => {
            assert!(diagnostic.contains("session request failed"), "{diagnostic}");
        }
        other => panic!("expected lost connection, got {other:?}"),
    }
    executor.close().await.unwrap();
}

#[test]
fn sessions_never_prompt() {
    let config = SshConfig::new("storage.example", "root");
    let args = config.session_args(std::path::Path::new("/tmp/c.sock"), "zfs list", &[]);
    let batch = args.iter().position(|a| a == "BatchMode=yes");
    assert!(batch.is_some_and(|i| args[i - 1] == "-o"), "{args:?}");
}
