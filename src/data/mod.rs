//! Input feeds.
//!
//! Both feeds are flat text files with one comma-separated record per
//! line. Blank lines and `#` comments are skipped; every other line must
//! parse or the whole load fails with the offending line number.

pub mod matches;
pub mod operations;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::types::{FeedError, Match};
use operations::Operation;

/// Split a record into trimmed fields, checking the minimum arity.
pub(crate) fn split_fields(line_no: usize, line: &str, expected: usize) -> Result<Vec<&str>, FeedError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < expected {
        return Err(FeedError::MissingFields {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Parse a strictly positive decimal, in plain or scientific notation.
pub(crate) fn parse_positive_decimal(
    line_no: usize,
    field: &'static str,
    value: &str,
) -> Result<Decimal, FeedError> {
    let invalid = || FeedError::InvalidField {
        line: line_no,
        field,
        value: value.to_string(),
    };
    let parsed = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| invalid())?;
    if parsed <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Iterate the meaningful lines of a feed with 1-based line numbers.
pub(crate) fn records(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a whole player/operation feed.
pub fn parse_operations(contents: &str) -> Result<Vec<Operation>, FeedError> {
    records(contents)
        .map(|(line_no, line)| operations::parse_operation(line_no, line))
        .collect()
}

/// Parse a whole match feed.
pub fn parse_matches(contents: &str) -> Result<Vec<Match>, FeedError> {
    records(contents)
        .map(|(line_no, line)| matches::parse_match(line_no, line))
        .collect()
}

/// Read and parse the player/operation feed at `path`.
pub fn load_operations(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read player feed: {}", path.display()))?;
    let ops = parse_operations(&contents)
        .with_context(|| format!("Failed to parse player feed: {}", path.display()))?;
    info!(path = %path.display(), count = ops.len(), "Player feed loaded");
    Ok(ops)
}

/// Read and parse the match feed at `path`.
pub fn load_matches(path: impl AsRef<Path>) -> Result<Vec<Match>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match feed: {}", path.display()))?;
    let matches = parse_matches(&contents)
        .with_context(|| format!("Failed to parse match feed: {}", path.display()))?;
    info!(path = %path.display(), count = matches.len(), "Match feed loaded");
    Ok(matches)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
