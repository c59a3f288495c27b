//! BETLEDGER — sports-betting ledger replay
//!
//! Entry point. Loads configuration, initialises structured logging,
//! replays the player feed against the match feed and writes the
//! end-of-run report.

use anyhow::Result;
use tracing::{error, info};

use betledger::config::{self, AppConfig};
use betledger::engine;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = match AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e);
        }
    };

    info!(
        players_feed = %cfg.feeds.players,
        matches_feed = %cfg.feeds.matches,
        report = %cfg.report.path,
        "BETLEDGER starting up"
    );

    let outcome = match engine::run(&cfg) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = format!("{e:#}"), "Run aborted");
            return Err(e);
        }
    };

    info!(
        players = outcome.ledger.player_count(),
        bets_settled = outcome.summary.bets_settled(),
        bets_rejected = outcome.summary.bets_rejected(),
        casino = outcome.report.casino_balance,
        "BETLEDGER finished."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betledger=info"));

    let json_logging = std::env::var("BETLEDGER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
