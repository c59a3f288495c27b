//! Replay driver.
//!
//! Applies a parsed operation feed to a ledger. Deposits and withdrawals
//! go straight to the player account; bets go through the settlement
//! engine. Rejections are logged and counted, never fatal.

use tracing::{debug, info, warn};

use crate::data::operations::Operation;
use crate::engine::ledger::Ledger;
use crate::types::LedgerError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Replay ordering options.
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Apply every deposit before any withdrawal or bet.
    pub deposits_first: bool,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counts of what happened during a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub deposits: usize,
    pub withdrawals: usize,
    pub withdrawals_rejected: usize,
    pub bets_won: usize,
    pub bets_lost: usize,
    pub bets_invalid_reference: usize,
    pub bets_insufficient_funds: usize,
}

impl ReplaySummary {
    pub fn bets_settled(&self) -> usize {
        self.bets_won + self.bets_lost
    }

    pub fn bets_rejected(&self) -> usize {
        self.bets_invalid_reference + self.bets_insufficient_funds
    }
}

// ---------------------------------------------------------------------------
// Replayer
// ---------------------------------------------------------------------------

pub struct Replayer {
    config: ReplayConfig,
}

impl Replayer {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Replay `ops` against `ledger`.
    ///
    /// Every player named in the feed gets an account before the first
    /// operation is applied, so bets only fail reference checks on
    /// unknown matches.
    pub fn run(&self, ledger: &mut Ledger, ops: &[Operation]) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for op in ops {
            ledger.ensure_player(op.player_id());
        }

        if self.config.deposits_first {
            for op in ops.iter().filter(|op| op.is_deposit()) {
                Self::apply(ledger, op, &mut summary);
            }
            for op in ops.iter().filter(|op| !op.is_deposit()) {
                Self::apply(ledger, op, &mut summary);
            }
        } else {
            for op in ops {
                Self::apply(ledger, op, &mut summary);
            }
        }

        info!(
            deposits = summary.deposits,
            withdrawals = summary.withdrawals,
            withdrawals_rejected = summary.withdrawals_rejected,
            bets_settled = summary.bets_settled(),
            bets_rejected = summary.bets_rejected(),
            casino = ledger.casino_balance(),
            "Replay complete"
        );

        summary
    }

    fn apply(ledger: &mut Ledger, op: &Operation, summary: &mut ReplaySummary) {
        match op {
            Operation::Deposit { player_id, amount } => {
                ledger.ensure_player(player_id).deposit(*amount);
                summary.deposits += 1;
            }
            Operation::Withdraw { player_id, amount } => {
                if ledger.ensure_player(player_id).withdraw(*amount) {
                    summary.withdrawals += 1;
                } else {
                    debug!(player = %player_id, amount, "Withdrawal exceeds balance, ignored");
                    summary.withdrawals_rejected += 1;
                }
            }
            Operation::Bet {
                player_id,
                match_id,
                stake,
                side,
            } => match ledger.process_bet(player_id, match_id, *side, *stake) {
                Ok(settlement) => {
                    if settlement.outcome.is_won() {
                        summary.bets_won += 1;
                    } else {
                        summary.bets_lost += 1;
                    }
                }
                Err(e) => {
                    warn!(player = %player_id, match_id = %match_id, error = %e, "Bet skipped");
                    match e {
                        LedgerError::InvalidReference { .. } => summary.bets_invalid_reference += 1,
                        LedgerError::InsufficientFunds { .. } => summary.bets_insufficient_funds += 1,
                    }
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
