// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping fixed-layout rows onto typed records.
//!
//! A record type declares its column order per [`PlatformFamily`]; the
//! mapper checks the field count and copies each field verbatim, turning
//! the `-` sentinel into an empty string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaMismatch;
use crate::row::Row;

/// Marker the tool prints for "no value".
pub const SENTINEL: &str = "-";

/// Operating-system family of the host running the tool.
///
/// Solaris ships a tool that lacks some columns the OpenZFS family
/// reports, so column layouts differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    OpenZfs,
    Solaris,
}

impl PlatformFamily {
    /// Family of the host this binary was built for.
    pub const fn host() -> Self {
        if cfg!(target_os = "solaris") {
            PlatformFamily::Solaris
        } else {
            PlatformFamily::OpenZfs
        }
    }
}

crate::simple_display! {
    PlatformFamily {
        OpenZfs => "openzfs",
        Solaris => "solaris",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform family `{0}` (expected `openzfs` or `solaris`)")]
pub struct UnknownPlatform(pub String);

impl FromStr for PlatformFamily {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openzfs" => Ok(PlatformFamily::OpenZfs),
            "solaris" => Ok(PlatformFamily::Solaris),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// A named column of a tabular query.
pub trait Column: Copy + fmt::Debug + 'static {
    /// Property name as passed to `-o`.
    fn name(self) -> &'static str;
}

/// A flat record populated from one row.
pub trait Record: Default {
    type Column: Column;

    /// Columns in query order for the given platform.
    fn columns(platform: PlatformFamily) -> &'static [Self::Column];

    /// Store an already-normalized field value.
    fn assign(&mut self, column: Self::Column, value: String);
}

/// Comma-separated column list for the `-o` argument of a query.
pub fn column_list<R: Record>(platform: PlatformFamily) -> String {
    R::columns(platform)
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalize one raw field: the sentinel becomes an empty string.
pub fn field_value(raw: &str) -> String {
    if raw == SENTINEL {
        String::new()
    } else {
        raw.to_string()
    }
}

/// Map a row onto `R` using the column order for `platform`.
pub fn map_row<R: Record>(row: &[String], platform: PlatformFamily) -> Result<R, SchemaMismatch> {
    let columns = R::columns(platform);
    if row.len() != columns.len() {
        return Err(SchemaMismatch {
            expected: columns.len(),
            actual: row.len(),
            row: row.join(" "),
        });
    }

    let mut record = R::default();
    for (column, raw) in columns.iter().zip(row) {
        record.assign(*column, field_value(raw));
    }
    Ok(record)
}

/// Map every row, merging consecutive rows that share the same leading
/// identifier into a single record (the last row of a run wins).
///
/// Any bad row fails the whole batch.
pub fn map_grouped<R: Record>(
    rows: &[Row],
    platform: PlatformFamily,
) -> Result<Vec<R>, SchemaMismatch> {
    let mut records: Vec<R> = Vec::new();
    let mut current: Option<&str> = None;

    for row in rows {
        let record = map_row::<R>(row, platform)?;
        let key = row.first().map(String::as_str);
        match records.last_mut() {
            Some(last) if current == key => *last = record,
            _ => {
                records.push(record);
                current = key;
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
