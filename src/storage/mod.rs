//! Snapshot export.
//!
//! Writes the final ledger to a JSON file for downstream tooling.
//! Snapshots are never read back into a run; `load_snapshot` exists for
//! inspection and tests.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::engine::ledger::Ledger;

/// Per-player entry in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub balance: i64,
    pub total_bets: u64,
    pub won_bets: u64,
    pub win_rate: Decimal,
}

/// Serializable view of a ledger at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub generated_at: DateTime<Utc>,
    pub casino_balance: i64,
    pub match_count: usize,
    pub players: Vec<PlayerSnapshot>,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &Ledger) -> Self {
        Self {
            generated_at: Utc::now(),
            casino_balance: ledger.casino_balance(),
            match_count: ledger.match_count(),
            players: ledger
                .players()
                .map(|p| PlayerSnapshot {
                    id: p.id.clone(),
                    balance: p.balance(),
                    total_bets: p.total_bets(),
                    won_bets: p.won_bets(),
                    win_rate: p.win_rate(),
                })
                .collect(),
        }
    }
}

/// Capture `ledger` and write it as pretty JSON to `path`.
pub fn save_snapshot(ledger: &Ledger, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let snapshot = LedgerSnapshot::capture(ledger);
    let json = serde_json::to_string_pretty(&snapshot)
        .context("Failed to serialise ledger snapshot")?;

    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;

    debug!(path = %path.display(), players = snapshot.players.len(), "Snapshot saved");
    Ok(())
}

/// Load a previously written snapshot.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<LedgerSnapshot> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse snapshot from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Match, Side};
    use rust_decimal_macros::dec;

    fn temp_path() -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("betledger_test_snapshot_{}.json", uuid::Uuid::new_v4()));
        p
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path();
        let mut ledger = Ledger::new();
        ledger.ensure_player("P").deposit(100);
        ledger.add_match(Match::new("M", dec!(2.0), dec!(1.5), Some(Side::A)));
        ledger.process_bet("P", "M", Side::A, dec!(50)).unwrap();

        save_snapshot(&ledger, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded.casino_balance, 50);
        assert_eq!(loaded.match_count, 1);
        assert_eq!(loaded.players.len(), 1);
        let p = &loaded.players[0];
        assert_eq!(p.id, "P");
        assert_eq!(p.balance, 150);
        assert_eq!(p.total_bets, 1);
        assert_eq!(p.won_bets, 1);
        assert_eq!(p.win_rate, dec!(1));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_snapshot_errors() {
        assert!(load_snapshot("/tmp/betledger_no_such_snapshot.json").is_err());
    }
}
