use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SCRIPT: &str = "s\nn\ns\nn\ns\nn\n";

fn blackjack() -> Command {
    let mut cmd = Command::cargo_bin("blackjack").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn closed_stdin_exits_cleanly() {
    blackjack()
        .args(["--seed", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Greetings! Welcome to Blackjack!"));
}

#[test]
fn plays_a_round_and_offers_another() {
    blackjack()
        .args(["--seed", "17"])
        .write_stdin(SCRIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shuffling the deck..."))
        .stdout(predicate::str::contains("=== HAND COMPLETED ==="))
        .stdout(predicate::str::contains("Play again? (y)es / (n)o?"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn quitting_says_goodbye() {
    // "q" is not a hit/stay answer, so it is only honoured at the play-again prompt.
    blackjack()
        .args(["--seed", "5"])
        .write_stdin("s\nq\ns\nq\ns\nq\ns\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Okie dokie... Thanks for playing!"));
}

#[test]
fn same_seed_produces_identical_games() {
    let first = blackjack().args(["--seed", "99"]).write_stdin(SCRIPT).output().expect("runs");
    let second = blackjack().args(["--seed", "99"]).write_stdin(SCRIPT).output().expect("runs");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn telemetry_file_records_round_results() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("logs").join("telemetry.jsonl");

    blackjack()
        .args(["--seed", "3", "--log-level", "info", "--telemetry"])
        .arg(&path)
        .write_stdin(SCRIPT)
        .assert()
        .success();

    let contents = fs::read_to_string(&path).expect("telemetry written");
    assert!(contents.contains("round resolved"), "{contents}");
    for line in contents.lines() {
        assert!(line.starts_with('{') && line.ends_with('}'), "not JSON: {line}");
    }
}

#[test]
fn rejects_malformed_seed() {
    blackjack()
        .args(["--seed", "not-a-number"])
        .write_stdin("")
        .assert()
        .failure();
}
