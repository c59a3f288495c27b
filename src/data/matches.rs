//! Match feed records: `matchId,rateA,rateB,result`.

use std::str::FromStr;

use super::{parse_positive_decimal, split_fields};
use crate::types::{FeedError, Match, Side};

/// Result markers meaning the match had no winning side.
const NO_WINNER: &[&str] = &["", "DRAW", "NONE"];

fn parse_result(line_no: usize, value: &str) -> Result<Option<Side>, FeedError> {
    if NO_WINNER.contains(&value.to_uppercase().as_str()) {
        return Ok(None);
    }
    Side::from_str(value)
        .map(Some)
        .map_err(|_| FeedError::InvalidField {
            line: line_no,
            field: "result",
            value: value.to_string(),
        })
}

/// Parse a single match feed record.
pub fn parse_match(line_no: usize, line: &str) -> Result<Match, FeedError> {
    let fields = split_fields(line_no, line, 4)?;
    if fields[0].is_empty() {
        return Err(FeedError::InvalidField {
            line: line_no,
            field: "match id",
            value: String::new(),
        });
    }
    Ok(Match::new(
        fields[0],
        parse_positive_decimal(line_no, "rate A", fields[1])?,
        parse_positive_decimal(line_no, "rate B", fields[2])?,
        parse_result(line_no, fields[3])?,
    ))
}
