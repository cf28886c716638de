// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Option sets for `destroy` and `send`.

zfsh_core::define_flags! {
    /// Options for [`Zfs::destroy`](crate::Zfs::destroy).
    pub struct DestroyFlags {
        /// Destroy descendants, snapshots included.
        RECURSIVE = 1 << 0 => Some("-r"),
        /// Also destroy clones outside the hierarchy.
        RECURSIVE_CLONES = 1 << 1 => Some("-R"),
        /// Mark snapshots for deferred deletion.
        DEFER_DELETION = 1 << 2 => Some("-d"),
        /// Force an unmount first.
        FORCE_UNMOUNT = 1 << 3 => Some("-f"),
    }
}

zfsh_core::define_flags! {
    /// Options for [`Zfs::send_snapshot`](crate::Zfs::send_snapshot).
    pub struct SendFlags {
        RECURSIVE = 1 << 0 => Some("-R"),
        /// Keep blocks lz4-compressed in the stream.
        LZ4 = 1 << 1 => Some("-c"),
        /// The first dataset argument is a resume token.
        WITH_TOKEN = 1 << 2 => Some("-t"),
        EMBEDDED_DATA = 1 << 3 => Some("-e"),
        /// Send the delta from a source snapshot (`-i`).
        INCREMENTAL = 1 << 4 => None,
        /// With `INCREMENTAL`, include intermediate snapshots (`-I`).
        INTERMEDIATE = 1 << 5 => None,
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
