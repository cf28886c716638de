// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zfsh-core: parsing the storage tool's machine-readable output
//!
//! Raw text is split into rows by [`tokenize`], then either mapped onto
//! fixed-layout records ([`DatasetRecord`], [`PoolRecord`]) or parsed as a
//! diff stream ([`parse_changes`]). [`encode_properties`] and
//! [`encode_flags`] go the other way, building argument lists.

pub mod macros;

pub mod args;
pub mod dataset;
pub mod diff;
pub mod error;
pub mod escape;
pub mod pool;
pub mod record;
pub mod row;

pub use args::{encode_flags, encode_properties, FlagSet, PROPERTY_FLAG};
pub use dataset::{DatasetColumn, DatasetKind, DatasetRecord, UnknownDatasetKind};
pub use diff::{parse_change, parse_changes, ChangeType, InodeChange, InodeType};
pub use error::{EscapeError, GrammarError, SchemaMismatch};
pub use escape::{unescape_path, RawPath};
pub use pool::{health, PoolColumn, PoolRecord};
pub use record::{
    column_list, field_value, map_grouped, map_row, Column, PlatformFamily, Record,
    UnknownPlatform, SENTINEL,
};
pub use row::{split_fields, tokenize, Row};
