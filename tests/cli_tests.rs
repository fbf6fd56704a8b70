//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use predicates::prelude::*;

use common::{bad_token_log, sim_cmd, suspended_log, walk_off_log};

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    sim_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("baseball"))
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    sim_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("baseball-sim"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_short_version_flag() {
    sim_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("baseball-sim"));
}

#[test]
fn test_unknown_command() {
    sim_cmd().arg("bunt").assert().failure();
}

// ─────────────────────────────────────────────────────────────────
// Demo Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_demo_command() {
    sim_cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo 1: Plate appearance"))
        .stdout(predicate::str::contains("Result: Walk"))
        .stdout(predicate::str::contains("Demo 3: Batting order"));
}

// ─────────────────────────────────────────────────────────────────
// Replay Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_replay_walk_off() {
    sim_cmd()
        .arg("replay")
        .arg(walk_off_log())
        .assert()
        .success()
        .stdout(predicate::str::contains("Home wins 3-2 in 9 innings (walk-off)"))
        .stdout(predicate::str::contains("Away"))
        .stdout(predicate::str::contains("R  H  E"));
}

#[test]
fn test_replay_suspended_json() {
    sim_cmd()
        .arg("replay")
        .arg(suspended_log())
        .assert()
        .success()
        .stdout(predicate::str::contains("Game in progress after 4 pitches"))
        .stdout(predicate::str::contains("runners on 1st and 2nd"));
}

#[test]
fn test_replay_bad_token() {
    sim_cmd()
        .arg("replay")
        .arg(bad_token_log())
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("E301"))
        .stderr(predicate::str::contains("curveball"));
}

#[test]
fn test_replay_missing_file() {
    sim_cmd()
        .arg("replay")
        .arg("/nonexistent/game.txt")
        .assert()
        .failure()
        .code(20);
}

#[test]
fn test_replay_trailing_pitches() {
    let dir = tempfile::TempDir::new().unwrap();
    let log = dir.path().join("too_long.txt");
    let mut content = std::fs::read_to_string(walk_off_log()).unwrap();
    content.push_str("b s\n");
    std::fs::write(&log, content).unwrap();

    sim_cmd()
        .arg("replay")
        .arg(&log)
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("2 pitch(es) left"));
}

// ─────────────────────────────────────────────────────────────────
// Play Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_play_from_stdin() {
    sim_cmd()
        .arg("play")
        .write_stdin("b b\n1b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Play ball!"))
        .stdout(predicate::str::contains("2-0 count"))
        .stdout(predicate::str::contains("runner on 1st"))
        .stdout(predicate::str::contains("Input closed with the game in progress"));
}

#[test]
fn test_play_skips_unknown_tokens() {
    sim_cmd()
        .arg("play")
        .write_stdin("b knuckler s\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1-1 count"))
        .stderr(predicate::str::contains("knuckler"));
}

#[test]
fn test_play_to_final_out() {
    let log = std::fs::read_to_string(walk_off_log()).unwrap();
    sim_cmd()
        .arg("play")
        .write_stdin(log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Home wins 3-2"));
}

// ─────────────────────────────────────────────────────────────────
// Simulate Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_simulate_small_season() {
    sim_cmd()
        .arg("simulate")
        .arg("--games")
        .arg("4")
        .arg("--seed")
        .arg("11")
        .assert()
        .success()
        .stdout(predicate::str::contains("Games played:       4"))
        .stdout(predicate::str::contains("Seed:               11"));
}

#[test]
fn test_simulate_zero_games() {
    sim_cmd()
        .arg("simulate")
        .arg("--games")
        .arg("0")
        .assert()
        .failure()
        .code(10);
}

#[test]
fn test_simulate_help() {
    sim_cmd()
        .arg("simulate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--games"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--output"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    sim_cmd()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[game]"))
        .stdout(predicate::str::contains("[simulation]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_verbosity_flags() {
    sim_cmd()
        .arg("-v")
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(common::valid_config_fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded from file"));

    sim_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(common::valid_config_fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded from file").not());
}

#[test]
fn test_demo_quiet_flag() {
    sim_cmd()
        .arg("-q")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: Walk"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_config_validate_nonexistent_file() {
    sim_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/path/config.toml")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_config_init_help() {
    sim_cmd()
        .arg("config")
        .arg("init")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--force"));
}
