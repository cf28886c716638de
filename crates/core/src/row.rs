// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting captured tool output into rows of fields.

/// One line of machine-readable output, split into fields.
///
/// Fields are positional and only meaningful relative to the query that
/// produced them.
pub type Row = Vec<String>;

/// Split raw output into rows of whitespace-delimited fields.
///
/// The tool terminates its output with a newline, so the segment after the
/// final newline is always blank; it and any other trailing blank lines are
/// dropped. Empty output yields no rows. Interior blank lines are kept as
/// empty rows, and an unterminated final line is kept as a row so that
/// truncated output is caught by the record mappers instead of vanishing.
///
/// Fields never contain whitespace: there is no quoting.
pub fn tokenize(raw: &str) -> Vec<Row> {
    let mut lines: Vec<&str> = raw.split('\n').collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.into_iter().map(split_fields).collect()
}

/// Split one line on runs of whitespace.
pub fn split_fields(line: &str) -> Row {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;
