//! Ledger — account ownership and bet settlement.
//!
//! Owns every player and match for the run, validates bets against the
//! current balances, applies settlements, and keeps the casino's running
//! balance.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::types::{truncate_units, BetOutcome, LedgerError, Match, Player, Side};

// ---------------------------------------------------------------------------
// Settlement record
// ---------------------------------------------------------------------------

/// Result of a successfully settled bet.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub player_id: String,
    pub match_id: String,
    pub side: Side,
    pub stake: Decimal,
    pub odds: Decimal,
    pub outcome: BetOutcome,
    /// Change applied to the casino balance (zero on a loss).
    pub casino_delta: i64,
    pub balance_after: i64,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// All player and match state for a run, plus the casino balance.
///
/// Players iterate in ascending id order.
#[derive(Debug, Default)]
pub struct Ledger {
    players: BTreeMap<String, Player>,
    matches: BTreeMap<String, Match>,
    casino_balance: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a player, creating a zero-balance account on first reference.
    pub fn ensure_player(&mut self, player_id: &str) -> &mut Player {
        self.players
            .entry(player_id.to_string())
            .or_insert_with(|| {
                debug!(player = player_id, "New player account");
                Player::new(player_id)
            })
    }

    /// Register a match. A later record with the same id replaces the
    /// earlier one.
    pub fn add_match(&mut self, game: Match) {
        debug!(match_id = %game.id, "Match registered");
        self.matches.insert(game.id.clone(), game);
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn get_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.get(match_id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn casino_balance(&self) -> i64 {
        self.casino_balance
    }

    /// First player, in iteration order, whose balance is negative.
    pub fn first_overdrawn(&self) -> Option<&Player> {
        self.players.values().find(|p| p.is_overdrawn())
    }

    /// Validate and settle a bet.
    ///
    /// Rejections leave every balance and the casino untouched. The funds
    /// check compares the untruncated stake with the pre-bet balance.
    pub fn process_bet(
        &mut self,
        player_id: &str,
        match_id: &str,
        side: Side,
        bet_size: Decimal,
    ) -> Result<Settlement, LedgerError> {
        let (Some(player), Some(game)) =
            (self.players.get_mut(player_id), self.matches.get(match_id))
        else {
            return Err(LedgerError::InvalidReference {
                player_id: player_id.to_string(),
                match_id: match_id.to_string(),
            });
        };

        if bet_size > Decimal::from(player.balance()) {
            return Err(LedgerError::InsufficientFunds {
                needed: bet_size,
                available: player.balance(),
            });
        }

        let odds = game.odds_for(side);
        let outcome = game.resolve(side);
        player.settle_bet(bet_size, outcome);
        let balance_after = player.balance();

        let before = self.casino_balance;
        if outcome.is_won() {
            let booked = Decimal::from(before).saturating_add(outcome.casino_delta(bet_size, odds));
            self.casino_balance = truncate_units(booked);
        }

        let settlement = Settlement {
            player_id: player_id.to_string(),
            match_id: match_id.to_string(),
            side,
            stake: bet_size,
            odds,
            outcome,
            casino_delta: self.casino_balance.saturating_sub(before),
            balance_after,
        };

        info!(
            player = player_id,
            match_id,
            side = %side,
            stake = %bet_size,
            outcome = %outcome,
            balance = balance_after,
            casino = self.casino_balance,
            "Bet settled"
        );

        Ok(settlement)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
