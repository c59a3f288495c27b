//! End-of-run report.
//!
//! Captures the final account states from a ledger and renders the
//! three-section text report:
//!
//! ```text
//! Legitimate Players:
//! <id> <balance> <win_rate>
//!
//! Illegitimate Players:
//! <id> BET null null null <balance>
//!
//! Casino Balance Change:
//! <casino_balance>
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::engine::ledger::Ledger;

/// One player row in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLine {
    pub player_id: String,
    pub balance: i64,
    pub win_rate: Decimal,
}

/// Final state of a run, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Every player, in ledger order.
    pub players: Vec<PlayerLine>,
    /// The first overdrawn player only.
    pub illegitimate: Option<PlayerLine>,
    pub casino_balance: i64,
}

impl Report {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let line = |p: &crate::types::Player| PlayerLine {
            player_id: p.id.clone(),
            balance: p.balance(),
            win_rate: p.win_rate(),
        };
        Self {
            players: ledger.players().map(line).collect(),
            illegitimate: ledger.first_overdrawn().map(line),
            casino_balance: ledger.casino_balance(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Legitimate Players:")?;
        for p in &self.players {
            writeln!(f, "{} {} {}", p.player_id, p.balance, p.win_rate)?;
        }
        writeln!(f)?;

        writeln!(f, "Illegitimate Players:")?;
        if let Some(p) = &self.illegitimate {
            writeln!(f, "{} BET null null null {}", p.player_id, p.balance)?;
        }
        writeln!(f)?;

        writeln!(f, "Casino Balance Change:")?;
        writeln!(f, "{}", self.casino_balance)
    }
}

/// Render the report for `ledger` and write it to `path`.
pub fn write_report(ledger: &Ledger, path: impl AsRef<Path>) -> Result<Report> {
    let path = path.as_ref();
    let report = Report::from_ledger(ledger);
    std::fs::write(path, report.to_string())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!(
        path = %path.display(),
        players = report.players.len(),
        casino = report.casino_balance,
        "Report written"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
