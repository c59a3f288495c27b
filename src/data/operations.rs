//! Player/operation feed records.
//!
//! Format: `playerId,operation,matchIdOrBlank,amountOrSize,sideOptional`
//! with operation one of `DEPOSIT`, `WITHDRAW`, `BET`.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::{parse_positive_decimal, split_fields};
use crate::types::{FeedError, Side};

/// One line of the player feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Deposit {
        player_id: String,
        amount: u64,
    },
    Withdraw {
        player_id: String,
        amount: u64,
    },
    Bet {
        player_id: String,
        match_id: String,
        stake: Decimal,
        side: Side,
    },
}

impl Operation {
    pub fn player_id(&self) -> &str {
        match self {
            Operation::Deposit { player_id, .. }
            | Operation::Withdraw { player_id, .. }
            | Operation::Bet { player_id, .. } => player_id,
        }
    }

    pub fn is_deposit(&self) -> bool {
        matches!(self, Operation::Deposit { .. })
    }
}

fn parse_amount(line_no: usize, value: &str) -> Result<u64, FeedError> {
    value.parse::<u64>().map_err(|_| FeedError::InvalidField {
        line: line_no,
        field: "amount",
        value: value.to_string(),
    })
}

/// Parse a single player feed record.
pub fn parse_operation(line_no: usize, line: &str) -> Result<Operation, FeedError> {
    let fields = split_fields(line_no, line, 2)?;
    let player_id = fields[0];
    if player_id.is_empty() {
        return Err(FeedError::InvalidField {
            line: line_no,
            field: "player id",
            value: String::new(),
        });
    }
    let player_id = player_id.to_string();

    match fields[1].to_uppercase().as_str() {
        "DEPOSIT" => {
            let fields = split_fields(line_no, line, 4)?;
            Ok(Operation::Deposit {
                player_id,
                amount: parse_amount(line_no, fields[3])?,
            })
        }
        "WITHDRAW" => {
            let fields = split_fields(line_no, line, 4)?;
            Ok(Operation::Withdraw {
                player_id,
                amount: parse_amount(line_no, fields[3])?,
            })
        }
        "BET" => {
            let fields = split_fields(line_no, line, 5)?;
            let match_id = fields[2];
            if match_id.is_empty() {
                return Err(FeedError::InvalidField {
                    line: line_no,
                    field: "match id",
                    value: String::new(),
                });
            }
            let side = Side::from_str(fields[4]).map_err(|_| FeedError::InvalidField {
                line: line_no,
                field: "side",
                value: fields[4].to_string(),
            })?;
            Ok(Operation::Bet {
                player_id,
                match_id: match_id.to_string(),
                stake: parse_positive_decimal(line_no, "bet size", fields[3])?,
                side,
            })
        }
        _ => Err(FeedError::UnknownOperation {
            line: line_no,
            value: fields[1].to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_deposit() {
        let op = parse_operation(1, "p1,DEPOSIT,,100").unwrap();
        assert_eq!(op, Operation::Deposit { player_id: "p1".into(), amount: 100 });
        assert_eq!(op.player_id(), "p1");
        assert!(op.is_deposit());
    }

    #[test]
    fn test_parse_withdraw_with_trailing_blank() {
        let op = parse_operation(1, "p1,WITHDRAW,,25,").unwrap();
        assert_eq!(op, Operation::Withdraw { player_id: "p1".into(), amount: 25 });
    }

    #[test]
    fn test_parse_bet() {
        let op = parse_operation(1, "p1,BET,m1,50.5,A").unwrap();
        assert_eq!(
            op,
            Operation::Bet {
                player_id: "p1".into(),
                match_id: "m1".into(),
                stake: dec!(50.5),
                side: Side::A,
            }
        );
    }

    #[test]
    fn test_parse_bet_invalid_side_fails_fast() {
        let err = parse_operation(4, "p1,BET,m1,50,DRAW").unwrap_err();
        assert_eq!(
            err,
            FeedError::InvalidField { line: 4, field: "side", value: "DRAW".into() }
        );
    }

    #[test]
    fn test_parse_bet_missing_side() {
        let err = parse_operation(2, "p1,BET,m1,50").unwrap_err();
        assert!(matches!(err, FeedError::MissingFields { line: 2, expected: 5, found: 4 }));
    }

    #[test]
    fn test_parse_bet_non_positive_stake() {
        assert!(parse_operation(1, "p1,BET,m1,0,A").is_err());
        assert!(parse_operation(1, "p1,BET,m1,-5,A").is_err());
        assert!(parse_operation(1, "p1,BET,m1,abc,A").is_err());
    }

    #[test]
    fn test_parse_negative_deposit_rejected() {
        let err = parse_operation(3, "p1,DEPOSIT,,-10").unwrap_err();
        assert_eq!(
            err,
            FeedError::InvalidField { line: 3, field: "amount", value: "-10".into() }
        );
    }

    #[test]
    fn test_parse_operation_case_insensitive() {
        let op = parse_operation(1, "p1,deposit,,1").unwrap();
        assert!(op.is_deposit());
    }

    #[test]
    fn test_parse_empty_player_id() {
        assert!(parse_operation(1, ",DEPOSIT,,1").is_err());
    }
}
