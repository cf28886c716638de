// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset records from `zfs list` / `zfs get`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{Column, PlatformFamily, Record};

/// Kind of dataset, as used with `-t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Filesystem,
    Snapshot,
    Volume,
    Bookmark,
    All,
}

impl DatasetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Filesystem => "filesystem",
            DatasetKind::Snapshot => "snapshot",
            DatasetKind::Volume => "volume",
            DatasetKind::Bookmark => "bookmark",
            DatasetKind::All => "all",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset kind `{0}`")]
pub struct UnknownDatasetKind(pub String);

impl FromStr for DatasetKind {
    type Err = UnknownDatasetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filesystem" => Ok(DatasetKind::Filesystem),
            "snapshot" => Ok(DatasetKind::Snapshot),
            "volume" => Ok(DatasetKind::Volume),
            "bookmark" => Ok(DatasetKind::Bookmark),
            "all" => Ok(DatasetKind::All),
            _ => Err(UnknownDatasetKind(s.to_string())),
        }
    }
}

/// Columns queried for every dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetColumn {
    Name,
    Origin,
    Used,
    Available,
    Mountpoint,
    Compression,
    Type,
    Volsize,
    Quota,
    Written,
    Logicalused,
    ReceiveResumeToken,
}

const OPENZFS_COLUMNS: &[DatasetColumn] = &[
    DatasetColumn::Name,
    DatasetColumn::Origin,
    DatasetColumn::Used,
    DatasetColumn::Available,
    DatasetColumn::Mountpoint,
    DatasetColumn::Compression,
    DatasetColumn::Type,
    DatasetColumn::Volsize,
    DatasetColumn::Quota,
    DatasetColumn::Written,
    DatasetColumn::Logicalused,
    DatasetColumn::ReceiveResumeToken,
];

// Solaris has no written, logicalused or receive_resume_token.
const SOLARIS_COLUMNS: &[DatasetColumn] = &[
    DatasetColumn::Name,
    DatasetColumn::Origin,
    DatasetColumn::Used,
    DatasetColumn::Available,
    DatasetColumn::Mountpoint,
    DatasetColumn::Compression,
    DatasetColumn::Type,
    DatasetColumn::Volsize,
    DatasetColumn::Quota,
];

impl Column for DatasetColumn {
    fn name(self) -> &'static str {
        match self {
            DatasetColumn::Name => "name",
            DatasetColumn::Origin => "origin",
            DatasetColumn::Used => "used",
            DatasetColumn::Available => "available",
            DatasetColumn::Mountpoint => "mountpoint",
            DatasetColumn::Compression => "compression",
            DatasetColumn::Type => "type",
            DatasetColumn::Volsize => "volsize",
            DatasetColumn::Quota => "quota",
            DatasetColumn::Written => "written",
            DatasetColumn::Logicalused => "logicalused",
            DatasetColumn::ReceiveResumeToken => "receive_resume_token",
        }
    }
}

/// A filesystem, snapshot, volume or bookmark.
///
/// Every field is the tool's text verbatim; absent values are empty.
/// Numeric fields stay strings until a caller parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetRecord {
    pub name: String,
    pub origin: String,
    pub used: String,
    pub available: String,
    pub mountpoint: String,
    pub compression: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub volsize: String,
    pub quota: String,
    pub written: String,
    pub logicalused: String,
    pub receive_resume_token: String,
}

impl DatasetRecord {
    pub fn is(&self, kind: DatasetKind) -> bool {
        self.kind == kind.as_str()
    }

    /// The part after `@` for snapshots or `#` for bookmarks; empty otherwise.
    pub fn short_name(&self) -> &str {
        let separator = if self.is(DatasetKind::Snapshot) {
            '@'
        } else if self.is(DatasetKind::Bookmark) {
            '#'
        } else {
            return "";
        };
        self.name
            .split_once(separator)
            .map(|(_, short)| short)
            .unwrap_or("")
    }
}

impl Record for DatasetRecord {
    type Column = DatasetColumn;

    fn columns(platform: PlatformFamily) -> &'static [DatasetColumn] {
        match platform {
            PlatformFamily::OpenZfs => OPENZFS_COLUMNS,
            PlatformFamily::Solaris => SOLARIS_COLUMNS,
        }
    }

    fn assign(&mut self, column: DatasetColumn, value: String) {
        let field = match column {
            DatasetColumn::Name => &mut self.name,
            DatasetColumn::Origin => &mut self.origin,
            DatasetColumn::Used => &mut self.used,
            DatasetColumn::Available => &mut self.available,
            DatasetColumn::Mountpoint => &mut self.mountpoint,
            DatasetColumn::Compression => &mut self.compression,
            DatasetColumn::Type => &mut self.kind,
            DatasetColumn::Volsize => &mut self.volsize,
            DatasetColumn::Quota => &mut self.quota,
            DatasetColumn::Written => &mut self.written,
            DatasetColumn::Logicalused => &mut self.logicalused,
            DatasetColumn::ReceiveResumeToken => &mut self.receive_resume_token,
        };
        *field = value;
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
