// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Octal-escaped path fields.
//!
//! The diff stream prints every byte outside printable 7-bit ASCII (and
//! the backslash itself) as `\ddd`, three octal digits. Decoding works on
//! bytes: the result need not be valid UTF-8.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::EscapeError;

/// A path exactly as the filesystem stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawPath(Vec<u8>);

impl RawPath {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    #[cfg(unix)]
    pub fn to_path_buf(&self) -> std::path::PathBuf {
        use std::os::unix::ffi::OsStrExt;
        std::path::PathBuf::from(std::ffi::OsStr::from_bytes(&self.0))
    }
}

impl From<&str> for RawPath {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl PartialEq<str> for RawPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for RawPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for RawPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for RawPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// Decode `\ddd` escapes in a path field.
///
/// A backslash must be followed by exactly three octal digits whose value
/// fits in one byte; anything else fails. All other bytes pass through.
pub fn unescape_path(field: &str) -> Result<RawPath, EscapeError> {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let digits = bytes
            .get(i + 1..i + 4)
            .ok_or(EscapeError::Truncated { offset: i })?;
        let value = decode_octal(digits).ok_or_else(|| EscapeError::InvalidDigits {
            offset: i,
            digits: String::from_utf8_lossy(digits).into_owned(),
        })?;
        out.push(value);
        i += 4;
    }

    Ok(RawPath(out))
}

fn decode_octal(digits: &[u8]) -> Option<u8> {
    let value = digits.iter().try_fold(0u16, |acc, &d| match d {
        b'0'..=b'7' => Some(acc * 8 + u16::from(d - b'0')),
        _ => None,
    })?;
    u8::try_from(value).ok()
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
