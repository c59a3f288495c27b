//! Shared types for the betting ledger.
//!
//! Player accounts, match records, bet sides/outcomes and the domain
//! error types. Everything the engine, feed parser and report generator
//! exchange lives here so those modules only depend on this one.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which side of a match a bet backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Parse a side identifier (case-insensitive). Anything other than
/// `A` or `B` is rejected.
impl std::str::FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Side::A),
            "B" => Ok(Side::B),
            _ => Err(anyhow::anyhow!("Unknown side: {s:?}")),
        }
    }
}

/// How a settled bet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetOutcome {
    Won,
    Lost,
}

impl BetOutcome {
    pub fn from_won(won: bool) -> Self {
        if won {
            BetOutcome::Won
        } else {
            BetOutcome::Lost
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, BetOutcome::Won)
    }

    /// Amount the house books for this outcome.
    ///
    /// A win costs the house the player's profit at the quoted odds.
    /// A lost stake is not booked to the casino. Saturates at the
    /// `Decimal` range instead of overflowing.
    pub fn casino_delta(&self, stake: Decimal, odds: Decimal) -> Decimal {
        match self {
            BetOutcome::Won => stake.saturating_mul(odds.saturating_sub(Decimal::ONE)),
            BetOutcome::Lost => Decimal::ZERO,
        }
    }
}

impl fmt::Display for BetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetOutcome::Won => write!(f, "WON"),
            BetOutcome::Lost => write!(f, "LOST"),
        }
    }
}

/// Truncate a decimal amount toward zero into whole currency units,
/// saturating at the `i64` range.
pub fn truncate_units(amount: Decimal) -> i64 {
    amount.trunc().to_i64().unwrap_or(if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

// ---------------------------------------------------------------------------
// Player account
// ---------------------------------------------------------------------------

/// A player's account: balance plus bet statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Whole currency units. Negative means the account is overdrawn.
    balance: i64,
    total_bets: u64,
    won_bets: u64,
}

impl Player {
    /// Fresh account with zero balance and no bets.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance: 0,
            total_bets: 0,
            won_bets: 0,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn total_bets(&self) -> u64 {
        self.total_bets
    }

    pub fn won_bets(&self) -> u64 {
        self.won_bets
    }

    /// Whether the balance has gone negative.
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0
    }

    pub fn deposit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add_unsigned(amount);
    }

    /// Withdraw `amount` if the balance covers it. Returns false (and
    /// leaves the balance untouched) otherwise.
    pub fn withdraw(&mut self, amount: u64) -> bool {
        match i64::try_from(amount) {
            Ok(amount) if amount <= self.balance => {
                self.balance -= amount;
                true
            }
            _ => false,
        }
    }

    /// Record a settled bet. The stake is truncated to whole units and
    /// applied unconditionally, so a loss may drive the balance negative.
    pub fn settle_bet(&mut self, amount: Decimal, outcome: BetOutcome) {
        let units = truncate_units(amount);
        self.total_bets += 1;
        match outcome {
            BetOutcome::Won => {
                self.won_bets += 1;
                self.balance = self.balance.saturating_add(units);
            }
            BetOutcome::Lost => {
                self.balance = self.balance.saturating_sub(units);
            }
        }
    }

    /// Fraction of bets won, rounded half-up to two places.
    /// Exactly zero when no bets have been placed.
    pub fn win_rate(&self) -> Decimal {
        if self.total_bets == 0 {
            return Decimal::ZERO;
        }
        let mut rate = (Decimal::from(self.won_bets) / Decimal::from(self.total_bets))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rate.rescale(2);
        rate
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A finished match with decimal odds for each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub rate_a: Decimal,
    pub rate_b: Decimal,
    /// Winning side, or `None` when the match had no winner.
    pub result: Option<Side>,
}

impl Match {
    pub fn new(id: impl Into<String>, rate_a: Decimal, rate_b: Decimal, result: Option<Side>) -> Self {
        Self {
            id: id.into(),
            rate_a,
            rate_b,
            result,
        }
    }

    pub fn odds_for(&self, side: Side) -> Decimal {
        match side {
            Side::A => self.rate_a,
            Side::B => self.rate_b,
        }
    }

    pub fn outcome(&self) -> Option<Side> {
        self.result
    }

    /// Resolve a bet on `side` against this match's result.
    pub fn resolve(&self, side: Side) -> BetOutcome {
        BetOutcome::from_won(self.result == Some(side))
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons the ledger refuses to settle a bet. No state changes when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid player or match ID (player: {player_id}, match: {match_id})")]
    InvalidReference { player_id: String, match_id: String },

    #[error("Insufficient balance for the bet: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: i64 },
}

/// A malformed line in one of the input feeds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    MissingFields { line: usize, expected: usize, found: usize },

    #[error("Line {line}: unknown operation {value:?}")]
    UnknownOperation { line: usize, value: String },

    #[error("Line {line}: invalid {field} {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
