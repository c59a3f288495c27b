//! Core engine — load feeds, replay operations, settle bets, report.

pub mod ledger;
pub mod replay;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::data;
use crate::report::{self, Report};
use crate::storage;
use ledger::Ledger;
use replay::{ReplayConfig, Replayer, ReplaySummary};

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub ledger: Ledger,
    pub summary: ReplaySummary,
    pub report: Report,
}

/// Run the whole pipeline described by `cfg`.
///
/// Any I/O or feed error aborts the run before the report is written.
pub fn run(cfg: &AppConfig) -> Result<RunOutcome> {
    let matches = data::load_matches(&cfg.feeds.matches)?;
    let ops = data::load_operations(&cfg.feeds.players)?;

    let mut ledger = Ledger::new();
    for game in matches {
        ledger.add_match(game);
    }
    info!(
        matches = ledger.match_count(),
        operations = ops.len(),
        deposits_first = cfg.replay.deposits_first,
        "Starting replay"
    );

    let replayer = Replayer::new(ReplayConfig::from(&cfg.replay));
    let summary = replayer.run(&mut ledger, &ops);

    let report = report::write_report(&ledger, &cfg.report.path)?;
    if let Some(path) = &cfg.report.snapshot_path {
        storage::save_snapshot(&ledger, path)?;
    }

    Ok(RunOutcome {
        ledger,
        summary,
        report,
    })
}
