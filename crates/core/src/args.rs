// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument encoding for property maps and boolean option sets.

/// Flag token that introduces a `key=value` property argument.
pub const PROPERTY_FLAG: &str = "-o";

/// A bitmask of independent boolean options.
pub trait FlagSet: Copy {
    /// True when every bit of `other` is set in `self`.
    fn contains(self, other: Self) -> bool;
}

/// Encode properties as repeated `-o key=value` argument pairs.
///
/// Pairs are emitted in the iteration order of `properties`. Use an ordered
/// map when the tool's argument order matters.
pub fn encode_properties<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Vec<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut args = Vec::new();
    for (key, value) in properties {
        args.push(PROPERTY_FLAG.to_string());
        args.push(format!("{}={}", key.as_ref(), value.as_ref()));
    }
    args
}

/// Emit the token of every flag set in `flags`.
///
/// Tokens follow the order of `table`, not the numeric order of the bits.
/// Entries without a token are skipped.
pub fn encode_flags<F: FlagSet>(flags: F, table: &[(F, Option<&'static str>)]) -> Vec<String> {
    table
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .filter_map(|(_, token)| token.map(str::to_string))
        .collect()
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
