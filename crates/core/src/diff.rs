// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grammar for `zfs diff -FH` output.
//!
//! Each row is `<change> <inode> <path> [<target> | (<delta>)]`:
//!
//! ```text
//! M       /       /tank/bar/
//! +       F       /tank/bar/hello.txt
//! M       F       /tank/bar/hello.txt     (+1)
//! R       F       /tank/bar/file  /tank/bar/file-new
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::GrammarError;
use crate::escape::{unescape_path, RawPath};
use crate::row::Row;

/// Kind of change reported for an inode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Removed,
    Created,
    Modified,
    Renamed,
}

crate::simple_display! {
    ChangeType {
        Removed => "removed",
        Created => "created",
        Modified => "modified",
        Renamed => "renamed",
    }
}

impl ChangeType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "-" => Some(ChangeType::Removed),
            "+" => Some(ChangeType::Created),
            "M" => Some(ChangeType::Modified),
            "R" => Some(ChangeType::Renamed),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ChangeType::Removed => "-",
            ChangeType::Created => "+",
            ChangeType::Modified => "M",
            ChangeType::Renamed => "R",
        }
    }

    fn accepts_field_count(self, count: usize) -> bool {
        match self {
            ChangeType::Renamed => count == 4,
            ChangeType::Modified => count == 3 || count == 4,
            ChangeType::Removed | ChangeType::Created => count == 3,
        }
    }

    fn expected_field_count(self) -> &'static str {
        match self {
            ChangeType::Renamed => "4",
            ChangeType::Modified => "3..4",
            ChangeType::Removed | ChangeType::Created => "3",
        }
    }
}

/// Type of the changed inode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InodeType {
    BlockDevice,
    CharacterDevice,
    Directory,
    Door,
    NamedPipe,
    SymbolicLink,
    EventPort,
    Socket,
    File,
}

crate::simple_display! {
    InodeType {
        BlockDevice => "block device",
        CharacterDevice => "character device",
        Directory => "directory",
        Door => "door",
        NamedPipe => "named pipe",
        SymbolicLink => "symbolic link",
        EventPort => "event port",
        Socket => "socket",
        File => "file",
    }
}

impl InodeType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(InodeType::BlockDevice),
            "C" => Some(InodeType::CharacterDevice),
            "/" => Some(InodeType::Directory),
            ">" => Some(InodeType::Door),
            "|" => Some(InodeType::NamedPipe),
            "@" => Some(InodeType::SymbolicLink),
            "P" => Some(InodeType::EventPort),
            "=" => Some(InodeType::Socket),
            "F" => Some(InodeType::File),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            InodeType::BlockDevice => "B",
            InodeType::CharacterDevice => "C",
            InodeType::Directory => "/",
            InodeType::Door => ">",
            InodeType::NamedPipe => "|",
            InodeType::SymbolicLink => "@",
            InodeType::EventPort => "P",
            InodeType::Socket => "=",
            InodeType::File => "F",
        }
    }
}

/// One entry of a diff stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InodeChange {
    pub change: ChangeType,
    pub inode: InodeType,
    pub path: RawPath,
    /// Rename target; only set for [`ChangeType::Renamed`].
    pub new_path: Option<RawPath>,
    /// Link-count delta annotated on [`ChangeType::Modified`] rows; zero otherwise.
    pub reference_delta: i64,
}

/// Matches `(+1)` or `(-12)`.
#[allow(clippy::expect_used)]
static REFERENCE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([+-]\d+)\)$").expect("constant regex pattern is valid"));

fn parse_reference_delta(field: &str) -> Result<i64, GrammarError> {
    REFERENCE_COUNT
        .captures(field)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .ok_or_else(|| GrammarError::BadReferenceCount(field.to_string()))
}

fn parse_path(field: &str) -> Result<RawPath, GrammarError> {
    unescape_path(field).map_err(|source| GrammarError::BadPath {
        field: field.to_string(),
        source,
    })
}

/// Parse a single diff row.
pub fn parse_change(row: &[String]) -> Result<InodeChange, GrammarError> {
    let Some(code) = row.first() else {
        return Err(GrammarError::EmptyRow);
    };

    let change = ChangeType::from_code(code)
        .ok_or_else(|| GrammarError::UnknownChangeType(code.clone()))?;

    if !change.accepts_field_count(row.len()) {
        return Err(GrammarError::FieldCount {
            change,
            expected: change.expected_field_count(),
            actual: row.len(),
            line: row.join(" "),
        });
    }

    let inode = InodeType::from_code(&row[1])
        .ok_or_else(|| GrammarError::UnknownInodeType(row[1].clone()))?;
    let path = parse_path(&row[2])?;

    let (new_path, reference_delta) = match (change, row.get(3)) {
        (ChangeType::Renamed, Some(field)) => {
            let target = parse_path(field)?;
            if target.is_empty() {
                return Err(GrammarError::EmptyRenameTarget);
            }
            (Some(target), 0)
        }
        (ChangeType::Modified, Some(field)) => (None, parse_reference_delta(field)?),
        _ => (None, 0),
    };

    Ok(InodeChange {
        change,
        inode,
        path,
        new_path,
        reference_delta,
    })
}

/// Parse every row of a diff stream; the first bad row fails the batch.
pub fn parse_changes(rows: &[Row]) -> Result<Vec<InodeChange>, GrammarError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            parse_change(row).map_err(|source| GrammarError::AtLine {
                index,
                line: row.join(" "),
                source: Box::new(source),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
