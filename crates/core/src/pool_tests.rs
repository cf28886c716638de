// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::*;
use crate::record::{column_list, map_row};

#[test]
fn maps_zpool_list_row() {
    let row: Vec<String> = ["tank", "ONLINE", "1.5G", "2G", "500M"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let pool: PoolRecord = map_row(&row, PlatformFamily::OpenZfs).unwrap();
    assert_eq!(pool.name, "tank");
    assert_eq!(pool.free, "500M");
    assert!(pool.is_online());
}

#[test]
fn same_columns_on_every_platform() {
    assert_eq!(
        column_list::<PoolRecord>(PlatformFamily::Solaris),
        column_list::<PoolRecord>(PlatformFamily::OpenZfs)
    );
}

#[parameterized(
    online = { health::ONLINE, true },
    degraded = { health::DEGRADED, false },
    faulted = { health::FAULTED, false },
)]
fn online(state: &str, expected: bool) {
    let pool = PoolRecord {
        health: state.to_string(),
        ..PoolRecord::default()
    };
    assert_eq!(pool.is_online(), expected);
}
