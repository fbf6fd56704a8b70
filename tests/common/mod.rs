//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::path::PathBuf;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Get the valid config fixture path
pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

/// Get the invalid config fixture path
pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// Nine-inning pitch log ending in a walk-off home run
pub fn walk_off_log() -> PathBuf {
    fixture_path("walk_off.txt")
}

/// JSON pitch log that stops in the top of the first
pub fn suspended_log() -> PathBuf {
    fixture_path("suspended.json")
}

/// Text pitch log with an unknown token on line 2
pub fn bad_token_log() -> PathBuf {
    fixture_path("bad_token.txt")
}

/// Command for the baseball-sim binary, isolated from any user config
pub fn sim_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("baseball-sim").unwrap();
    cmd.env_remove("BASEBALL_SIM_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_dir_exists() {
        assert!(fixtures_dir().exists(), "Fixtures directory should exist");
    }

    #[test]
    fn test_config_fixtures_exist() {
        assert!(valid_config_fixture().exists());
        assert!(invalid_config_fixture().exists());
    }

    #[test]
    fn test_pitch_log_fixtures_exist() {
        assert!(walk_off_log().exists());
        assert!(suspended_log().exists());
        assert!(bad_token_log().exists());
    }
}
