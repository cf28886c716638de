// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replication streams and snapshot diffs.

use zfsh_core::{parse_changes, DatasetRecord, InodeChange};
use zfsh_exec::{Input, Sink};

use crate::error::ZfsError;
use crate::flags::SendFlags;
use crate::handle::Zfs;

impl Zfs {
    /// Write a replication stream of `snapshot` to `sink`.
    ///
    /// With [`SendFlags::INCREMENTAL`], `source` names the earlier
    /// snapshot the delta starts from. With [`SendFlags::WITH_TOKEN`],
    /// `snapshot` is a resume token instead. `compress` names a filter
    /// the stream is piped through on the target, e.g. `lz4`.
    pub async fn send_snapshot(
        &self,
        snapshot: &str,
        source: Option<&str>,
        sink: Sink<'_>,
        flags: SendFlags,
        compress: Option<&str>,
    ) -> Result<(), ZfsError> {
        if !flags.contains(SendFlags::WITH_TOKEN) && !snapshot.contains('@') {
            return Err(ZfsError::NotASnapshot {
                name: snapshot.to_string(),
            });
        }

        let mut spec = self.zfs().arg("send").args(flags.tokens());
        if flags.contains(SendFlags::INCREMENTAL) {
            let source = source.filter(|s| !s.is_empty()).ok_or_else(|| {
                ZfsError::MissingSource {
                    name: snapshot.to_string(),
                }
            })?;
            let option = if flags.contains(SendFlags::INTERMEDIATE) {
                "-I"
            } else {
                "-i"
            };
            spec = spec.args([option, source]);
        }
        spec = spec.arg(snapshot).stdout(sink);
        if let Some(filter) = compress.filter(|f| !f.is_empty()) {
            spec = spec.pipe_to(filter);
        }

        self.run(spec).await?;
        tracing::info!(snapshot, flags = flags.bits(), "sent snapshot");
        Ok(())
    }

    /// Receive a stream from `input` into `name`.
    ///
    /// The receive is resumable (`-s`). `uncompress` names a filter the
    /// stream passes through first, e.g. `lz4 -d`. Only `key=value`
    /// entries of `properties` are forwarded; anything else is ignored.
    pub async fn receive_snapshot(
        &self,
        input: Input<'_>,
        name: &str,
        uncompress: Option<&str>,
        properties: &[&str],
    ) -> Result<DatasetRecord, ZfsError> {
        let mut spec = self.zfs().arg("receive");
        for property in properties.iter().copied().filter(|p| p.contains('=')) {
            spec = spec.args(["-o", property]);
        }
        spec = spec.args(["-s", name]).stdin(input);
        if let Some(filter) = uncompress.filter(|f| !f.is_empty()) {
            spec = spec.pipe_from(filter);
        }

        self.run(spec).await?;
        tracing::info!(dataset = name, "received snapshot");
        self.get_dataset(name).await
    }

    /// Changes between `snapshot` and the current state of `dataset`.
    ///
    /// `snapshot` must be a full name; it may belong to another dataset,
    /// such as the origin of a clone.
    pub async fn diff(&self, dataset: &DatasetRecord, snapshot: &str) -> Result<Vec<InodeChange>, ZfsError> {
        let spec = self
            .zfs()
            .args(["diff", "-FH", snapshot, dataset.name.as_str()]);
        let rows = self.run(spec).await?;
        Ok(parse_changes(&rows)?)
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
