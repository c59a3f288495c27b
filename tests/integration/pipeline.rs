//! End-to-end runs through `engine::run` using temp feed files.

use std::path::{Path, PathBuf};

use betledger::config::AppConfig;
use betledger::engine;
use betledger::storage;

/// Scratch directory that is removed when dropped.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let mut dir = std::env::temp_dir();
        dir.push(format!("betledger_it_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn file(&self, name: &str, contents: &str) -> String {
        let path = self.dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().to_string()
    }

    fn path(&self, name: &str) -> String {
        self.dir.join(name).to_string_lossy().to_string()
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn config(scratch: &Scratch, players: &str, matches: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.feeds.players = scratch.file("player_data.txt", players);
    cfg.feeds.matches = scratch.file("match_data.txt", matches);
    cfg.report.path = scratch.path("results.txt");
    cfg
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}

const MATCHES: &str = "M1,2.0,1.5,A\nM2,1.8,2.2,B\nM3,3.0,3.0,DRAW\n";

#[test]
fn test_full_run_writes_report() {
    let scratch = Scratch::new();
    let cfg = config(
        &scratch,
        "alice,DEPOSIT,,100,\n\
         bob,DEPOSIT,,40,\n\
         alice,BET,M1,50,A\n\
         bob,BET,M2,30,A\n\
         bob,WITHDRAW,,5,\n\
         carol,BET,M1,10,A\n\
         alice,BET,M3,20,B\n",
        MATCHES,
    );

    let outcome = engine::run(&cfg).unwrap();

    assert_eq!(
        read(&cfg.report.path),
        "Legitimate Players:\n\
         alice 130 0.50\n\
         bob 5 0.00\n\
         carol 0 0\n\
         \n\
         Illegitimate Players:\n\
         \n\
         Casino Balance Change:\n\
         50\n"
    );
    assert_eq!(outcome.summary.bets_won, 1);
    assert_eq!(outcome.summary.bets_lost, 2);
    assert_eq!(outcome.summary.bets_insufficient_funds, 1);
    assert_eq!(outcome.summary.withdrawals, 1);
}

#[test]
fn test_deposits_first_matches_two_pass_replay() {
    let scratch = Scratch::new();
    let mut cfg = config(
        &scratch,
        "dan,BET,M1,60,A\n\
         dan,DEPOSIT,,100,\n",
        MATCHES,
    );
    cfg.replay.deposits_first = true;

    let outcome = engine::run(&cfg).unwrap();

    let dan = outcome.ledger.player("dan").unwrap();
    assert_eq!(dan.balance(), 160);
    assert_eq!(outcome.report.casino_balance, 60);
}

#[test]
fn test_unknown_match_leaves_state_unchanged() {
    let scratch = Scratch::new();
    let cfg = config(
        &scratch,
        "erin,DEPOSIT,,100,\nerin,BET,NOPE,50,A\n",
        MATCHES,
    );

    let outcome = engine::run(&cfg).unwrap();

    assert_eq!(outcome.summary.bets_invalid_reference, 1);
    assert_eq!(outcome.ledger.player("erin").unwrap().balance(), 100);
    assert_eq!(outcome.ledger.casino_balance(), 0);
}

#[test]
fn test_snapshot_written_when_configured() {
    let scratch = Scratch::new();
    let mut cfg = config(&scratch, "fay,DEPOSIT,,10,\n", MATCHES);
    cfg.report.snapshot_path = Some(scratch.path("ledger.json"));

    engine::run(&cfg).unwrap();

    let snapshot = storage::load_snapshot(scratch.path("ledger.json")).unwrap();
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].balance, 10);
    assert_eq!(snapshot.match_count, 3);
}

#[test]
fn test_malformed_feed_aborts_without_report() {
    let scratch = Scratch::new();
    let cfg = config(&scratch, "gus,BET,M1,10,C\n", MATCHES);

    let err = engine::run(&cfg).unwrap_err();

    assert!(format!("{err:#}").contains("invalid side"));
    assert!(!Path::new(&cfg.report.path).exists());
}

#[test]
fn test_missing_match_feed_aborts() {
    let scratch = Scratch::new();
    let mut cfg = config(&scratch, "hal,DEPOSIT,,1,\n", MATCHES);
    cfg.feeds.matches = scratch.path("absent.txt");

    let err = engine::run(&cfg).unwrap_err();

    assert!(err.to_string().contains("Failed to read match feed"));
    assert!(!Path::new(&cfg.report.path).exists());
}
