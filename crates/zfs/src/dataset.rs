// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset queries and mutations.

use indexmap::IndexMap;
use zfsh_core::{column_list, encode_properties, map_grouped, DatasetKind, DatasetRecord};

use crate::error::ZfsError;
use crate::flags::DestroyFlags;
use crate::handle::Zfs;

/// Reject datasets of `kind` for `operation`.
fn reject(dataset: &DatasetRecord, kind: DatasetKind, operation: &'static str) -> Result<(), ZfsError> {
    if dataset.is(kind) {
        return Err(unsupported(dataset, operation));
    }
    Ok(())
}

/// Require a dataset of `kind` for `operation`.
fn require(dataset: &DatasetRecord, kind: DatasetKind, operation: &'static str) -> Result<(), ZfsError> {
    if !dataset.is(kind) {
        return Err(unsupported(dataset, operation));
    }
    Ok(())
}

fn unsupported(dataset: &DatasetRecord, operation: &'static str) -> ZfsError {
    ZfsError::UnsupportedKind {
        operation,
        name: dataset.name.clone(),
        kind: dataset.kind.clone(),
    }
}

impl Zfs {
    /// List datasets of `kind`, optionally limited to `filter` and its
    /// descendants down to `depth`.
    pub async fn datasets(
        &self,
        kind: DatasetKind,
        filter: Option<&str>,
        depth: Option<u32>,
        recurse: bool,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        let mut spec = self.zfs().args([
            "list".to_string(),
            "-H".to_string(),
            "-t".to_string(),
            kind.to_string(),
            "-o".to_string(),
            column_list::<DatasetRecord>(self.platform()),
        ]);
        if let Some(depth) = depth {
            spec = spec.args(["-d".to_string(), depth.to_string()]);
        }
        if recurse {
            spec = spec.arg("-r");
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            spec = spec.arg(filter);
        }

        let rows = self.run(spec).await?;
        Ok(map_grouped(&rows, self.platform())?)
    }

    pub async fn filesystems(
        &self,
        filter: Option<&str>,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.datasets(DatasetKind::Filesystem, filter, depth, false).await
    }

    pub async fn volumes(
        &self,
        filter: Option<&str>,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.datasets(DatasetKind::Volume, filter, depth, false).await
    }

    pub async fn snapshots_by_name(
        &self,
        filter: Option<&str>,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.datasets(DatasetKind::Snapshot, filter, depth, true).await
    }

    pub async fn bookmarks_by_name(
        &self,
        filter: Option<&str>,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.datasets(DatasetKind::Bookmark, filter, depth, true).await
    }

    /// Snapshots of `dataset` and, down to `depth`, of its descendants.
    pub async fn snapshots(
        &self,
        dataset: &DatasetRecord,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.snapshots_by_name(Some(&dataset.name), depth).await
    }

    pub async fn bookmarks(
        &self,
        dataset: &DatasetRecord,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        self.bookmarks_by_name(Some(&dataset.name), depth).await
    }

    /// Look up one dataset of any kind.
    pub async fn get_dataset(&self, name: &str) -> Result<DatasetRecord, ZfsError> {
        let spec = self.zfs().args([
            "list".to_string(),
            "-Hp".to_string(),
            "-o".to_string(),
            column_list::<DatasetRecord>(self.platform()),
            name.to_string(),
        ]);
        self.query_one(spec, name).await
    }

    /// Descendants of `dataset` of every kind, down to `depth` (unlimited
    /// when `None`). The dataset itself is not included.
    pub async fn children(
        &self,
        dataset: &DatasetRecord,
        depth: Option<u32>,
    ) -> Result<Vec<DatasetRecord>, ZfsError> {
        let mut spec = self.zfs().arg("list");
        spec = match depth {
            Some(depth) => spec.args(["-d".to_string(), depth.to_string()]),
            None => spec.arg("-r"),
        };
        spec = spec.args([
            "-t".to_string(),
            DatasetKind::All.to_string(),
            "-Hp".to_string(),
            "-o".to_string(),
            column_list::<DatasetRecord>(self.platform()),
            dataset.name.clone(),
        ]);

        let rows = self.run(spec).await?;
        let records: Vec<DatasetRecord> = map_grouped(&rows, self.platform())?;
        Ok(records
            .into_iter()
            .filter(|child| child.name != dataset.name)
            .collect())
    }

    /// Current parsable value of one property.
    pub async fn get_property(&self, dataset: &DatasetRecord, key: &str) -> Result<String, ZfsError> {
        let spec = self.zfs().args(["get", "-Hp", key, dataset.name.as_str()]);
        let rows = self.run(spec).await?;
        // name, property, value, source
        rows.first()
            .and_then(|row| row.get(2))
            .cloned()
            .ok_or_else(|| ZfsError::MissingProperty {
                name: dataset.name.clone(),
                property: key.to_string(),
            })
    }

    pub async fn set_property(
        &self,
        dataset: &DatasetRecord,
        key: &str,
        value: &str,
    ) -> Result<(), ZfsError> {
        let spec = self
            .zfs()
            .args(["set".to_string(), format!("{key}={value}"), dataset.name.clone()]);
        self.run(spec).await?;
        Ok(())
    }

    pub async fn create_filesystem(
        &self,
        name: &str,
        properties: &IndexMap<String, String>,
    ) -> Result<DatasetRecord, ZfsError> {
        let spec = self
            .zfs()
            .arg("create")
            .args(encode_properties(properties))
            .arg(name);
        self.run(spec).await?;
        tracing::info!(dataset = name, "created filesystem");
        self.get_dataset(name).await
    }

    /// Create a volume of `size` bytes, creating missing parents.
    pub async fn create_volume(
        &self,
        name: &str,
        size: u64,
        properties: &IndexMap<String, String>,
    ) -> Result<DatasetRecord, ZfsError> {
        let spec = self
            .zfs()
            .args(["create".to_string(), "-p".to_string(), "-V".to_string(), size.to_string()])
            .args(encode_properties(properties))
            .arg(name);
        self.run(spec).await?;
        tracing::info!(dataset = name, size, "created volume");
        self.get_dataset(name).await
    }

    /// Clone a snapshot into `dest`.
    pub async fn clone(
        &self,
        snapshot: &DatasetRecord,
        dest: &str,
        properties: &IndexMap<String, String>,
    ) -> Result<DatasetRecord, ZfsError> {
        require(snapshot, DatasetKind::Snapshot, "clone")?;
        let spec = self
            .zfs()
            .args(["clone", "-p"])
            .args(encode_properties(properties))
            .args([snapshot.name.as_str(), dest]);
        self.run(spec).await?;
        self.get_dataset(dest).await
    }

    /// Snapshot `dataset` as `dataset@name`; `recursive` snapshots all
    /// descendants atomically.
    pub async fn snapshot(
        &self,
        dataset: &DatasetRecord,
        name: &str,
        recursive: bool,
    ) -> Result<DatasetRecord, ZfsError> {
        let snapshot = format!("{}@{}", dataset.name, name);
        let mut spec = self.zfs().arg("snapshot");
        if recursive {
            spec = spec.arg("-r");
        }
        self.run(spec.arg(&snapshot)).await?;
        tracing::info!(snapshot = %snapshot, recursive, "created snapshot");
        self.get_dataset(&snapshot).await
    }

    /// Bookmark `dataset@name` as `dataset#name`.
    pub async fn bookmark(&self, dataset: &DatasetRecord, name: &str) -> Result<DatasetRecord, ZfsError> {
        let snapshot = format!("{}@{}", dataset.name, name);
        let bookmark = format!("{}#{}", dataset.name, name);
        self.run(self.zfs().args(["bookmark", snapshot.as_str(), bookmark.as_str()]))
            .await?;
        self.get_dataset(&bookmark).await
    }

    pub async fn rename(
        &self,
        dataset: &DatasetRecord,
        name: &str,
        create_parent: bool,
        recursive: bool,
    ) -> Result<DatasetRecord, ZfsError> {
        let mut spec = self.zfs().arg("rename");
        if create_parent {
            spec = spec.arg("-p");
        }
        if recursive {
            spec = spec.arg("-r");
        }
        self.run(spec.args([dataset.name.as_str(), name])).await?;
        self.get_dataset(name).await
    }

    /// Roll the parent dataset back to `snapshot`. `destroy_more_recent`
    /// destroys later snapshots, which the tool otherwise refuses to.
    pub async fn rollback(&self, snapshot: &DatasetRecord, destroy_more_recent: bool) -> Result<(), ZfsError> {
        require(snapshot, DatasetKind::Snapshot, "rollback")?;
        let mut spec = self.zfs().arg("rollback");
        if destroy_more_recent {
            spec = spec.arg("-r");
        }
        self.run(spec.arg(&snapshot.name)).await?;
        Ok(())
    }

    pub async fn destroy(&self, dataset: &DatasetRecord, flags: DestroyFlags) -> Result<(), ZfsError> {
        let spec = self
            .zfs()
            .arg("destroy")
            .args(flags.tokens())
            .arg(&dataset.name);
        self.run(spec).await?;
        tracing::info!(dataset = %dataset.name, flags = flags.bits(), "destroyed");
        Ok(())
    }

    pub async fn mount(
        &self,
        dataset: &DatasetRecord,
        overlay: bool,
        options: &[&str],
    ) -> Result<DatasetRecord, ZfsError> {
        reject(dataset, DatasetKind::Snapshot, "mount")?;
        let mut spec = self.zfs().arg("mount");
        if overlay {
            spec = spec.arg("-O");
        }
        if !options.is_empty() {
            spec = spec.args(["-o".to_string(), options.join(",")]);
        }
        self.run(spec.arg(&dataset.name)).await?;
        self.get_dataset(&dataset.name).await
    }

    pub async fn unmount(&self, dataset: &DatasetRecord, force: bool) -> Result<DatasetRecord, ZfsError> {
        reject(dataset, DatasetKind::Snapshot, "unmount")?;
        let mut spec = self.zfs().arg("umount");
        if force {
            spec = spec.arg("-f");
        }
        self.run(spec.arg(&dataset.name)).await?;
        self.get_dataset(&dataset.name).await
    }

    /// Discard the saved state of an interrupted resumable receive.
    pub async fn abort_receive(&self, name: &str) -> Result<DatasetRecord, ZfsError> {
        self.run(self.zfs().args(["receive", "-A", name])).await?;
        self.get_dataset(name).await
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
