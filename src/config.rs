//! Configuration system for baseball-sim
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (BASEBALL_SIM_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::baseball::GameRules;
use crate::error::{Error, Result};
use crate::logging::ROTATIONS;

/// Highest regulation length accepted in `[game]`
pub const MAX_REGULATION_INNINGS: u8 = 20;

/// Most games a season run will simulate at once
pub const MAX_CONCURRENT_GAMES: usize = 1024;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// League rules applied to every game
    pub game: GameRules,

    /// Season simulation settings
    pub simulation: SimulationSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Season simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of games in a season run
    pub games: usize,

    /// Base RNG seed (random if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Games simulated at the same time
    pub max_concurrent_games: usize,

    /// Runtime worker threads (0 = auto)
    pub max_threads: u32,

    /// Pitch budget after which a game is abandoned
    pub max_pitches_per_game: u32,

    /// Directory for JSON season reports (none = don't write)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<String>,

    /// Relative likelihood of each pitch result
    pub pitch_weights: PitchWeights,

    /// Relative likelihood of each result once the ball is put in play
    pub in_play_weights: InPlayWeights,
}

/// Weights for the outcome of a single pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchWeights {
    pub ball: f64,
    pub strike: f64,
    pub foul: f64,
    pub in_play: f64,
    pub hit_by_pitch: f64,
}

/// Weights for a ball put in play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InPlayWeights {
    pub out: f64,
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
    pub error: f64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// File rotation: minutely, hourly, daily, never
    pub rotation: String,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            games: 162,
            seed: None,
            max_concurrent_games: 8,
            max_threads: 0, // Auto-detect
            max_pitches_per_game: 2000,
            report_dir: None,
            pitch_weights: PitchWeights::default(),
            in_play_weights: InPlayWeights::default(),
        }
    }
}

impl Default for PitchWeights {
    fn default() -> Self {
        Self {
            ball: 0.36,
            strike: 0.30,
            foul: 0.17,
            in_play: 0.16,
            hit_by_pitch: 0.01,
        }
    }
}

impl Default for InPlayWeights {
    fn default() -> Self {
        Self {
            out: 0.69,
            single: 0.18,
            double: 0.055,
            triple: 0.005,
            home_run: 0.04,
            error: 0.01,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            rotation: "daily".to_string(),
            max_files: 5,
            json_format: false,
        }
    }
}

impl PitchWeights {
    /// Weights paired with their config key, in sampling order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("ball", self.ball),
            ("strike", self.strike),
            ("foul", self.foul),
            ("in_play", self.in_play),
            ("hit_by_pitch", self.hit_by_pitch),
        ]
    }
}

impl InPlayWeights {
    /// Weights paired with their config key, in sampling order
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("out", self.out),
            ("single", self.single),
            ("double", self.double),
            ("triple", self.triple),
            ("home_run", self.home_run),
            ("error", self.error),
        ]
    }
}

/// Check a weight table: every entry finite and non-negative, at least one positive.
pub fn validate_weights(table: &str, entries: &[(&'static str, f64)]) -> Result<()> {
    for (name, weight) in entries {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(Error::config_field_invalid(
                format!("simulation.{}.{}", table, name),
                format!("weight must be a finite, non-negative number (got {})", weight),
            ));
        }
    }

    if entries.iter().all(|(_, weight)| *weight == 0.0) {
        return Err(Error::config_field_invalid(
            format!("simulation.{}", table),
            "at least one weight must be greater than zero",
        ));
    }

    Ok(())
}

impl SimConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            config = Self::from_file(&path)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Parse a single configuration file without overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{}: {}", path.display(), e),
            source: Some(e),
        })
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            Some(PathBuf::from("baseball-sim.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("baseball-sim").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".baseball-sim").join("config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Game rules
        if let Some(n) = env_parse("BASEBALL_SIM_REGULATION_INNINGS") {
            self.game.regulation_innings = n;
        }

        // Simulation settings
        if let Some(n) = env_parse("BASEBALL_SIM_GAMES") {
            self.simulation.games = n;
        }
        if let Some(n) = env_parse("BASEBALL_SIM_SEED") {
            self.simulation.seed = Some(n);
        }
        if let Some(n) = env_parse("BASEBALL_SIM_MAX_CONCURRENT_GAMES") {
            self.simulation.max_concurrent_games = n;
        }
        if let Some(n) = env_parse("BASEBALL_SIM_MAX_THREADS") {
            self.simulation.max_threads = n;
        }
        if let Some(n) = env_parse("BASEBALL_SIM_MAX_PITCHES") {
            self.simulation.max_pitches_per_game = n;
        }
        if let Ok(val) = std::env::var("BASEBALL_SIM_REPORT_DIR") {
            self.simulation.report_dir = Some(val);
        }

        // Logging settings
        if let Ok(val) = std::env::var("BASEBALL_SIM_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("BASEBALL_SIM_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("BASEBALL_SIM_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref dir) = self.simulation.report_dir {
            self.simulation.report_dir = Some(expand_path(dir));
        }
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let innings = self.game.regulation_innings;
        if innings == 0 || innings > MAX_REGULATION_INNINGS {
            return Err(Error::config_field_invalid(
                "game.regulation_innings",
                format!(
                    "regulation_innings must be between 1 and {} (got {})",
                    MAX_REGULATION_INNINGS, innings
                ),
            ));
        }

        if self.simulation.games == 0 {
            return Err(Error::config_field_invalid(
                "simulation.games",
                "a season needs at least one game",
            ));
        }
        let concurrency = self.simulation.max_concurrent_games;
        if concurrency == 0 || concurrency > MAX_CONCURRENT_GAMES {
            return Err(Error::config_field_invalid(
                "simulation.max_concurrent_games",
                format!(
                    "max_concurrent_games must be between 1 and {} (got {})",
                    MAX_CONCURRENT_GAMES, concurrency
                ),
            ));
        }
        if self.simulation.max_pitches_per_game == 0 {
            return Err(Error::config_field_invalid(
                "simulation.max_pitches_per_game",
                "max_pitches_per_game must be at least 1",
            ));
        }

        validate_weights("pitch_weights", &self.simulation.pitch_weights.entries())?;
        validate_weights("in_play_weights", &self.simulation.in_play_weights.entries())?;

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        if !ROTATIONS.contains(&self.logging.rotation.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.rotation",
                format!(
                    "Invalid rotation '{}'. Must be one of: {}",
                    self.logging.rotation,
                    ROTATIONS.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Report directory, if reports should be written
    pub fn report_dir(&self) -> Option<PathBuf> {
        self.simulation.report_dir.as_ref().map(PathBuf::from)
    }

    /// Worker threads for the runtime
    pub fn worker_threads(&self) -> usize {
        match self.simulation.max_threads {
            0 => num_cpus::get().min(8),
            n => n as usize,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location written by `config init`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".baseball-sim")
        .join("config.toml")
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
pub fn generate_default_config() -> String {
    r#"# baseball-sim configuration

[game]
# Innings in a full game; tied games continue into extra innings
regulation_innings = 9

[simulation]
# Number of games in a season run
games = 162

# Base RNG seed; game N uses seed + N (random if not set)
# seed = 42

# Games simulated at the same time
max_concurrent_games = 8

# Runtime worker threads (0 = auto-detect)
max_threads = 0

# Abandon a game that has not finished after this many pitches
max_pitches_per_game = 2000

# Directory for JSON season reports (comment out to disable)
# report_dir = "~/.baseball-sim/reports"

[simulation.pitch_weights]
# Relative likelihood of each pitch result
ball = 0.36
strike = 0.30
foul = 0.17
in_play = 0.16
hit_by_pitch = 0.01

[simulation.in_play_weights]
# Relative likelihood of each result when the ball is put in play
out = 0.69
single = 0.18
double = 0.055
triple = 0.005
home_run = 0.04
error = 0.01

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.baseball-sim/logs/baseball-sim.log"

# File rotation: minutely, hourly, daily, never
rotation = "daily"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.game.regulation_innings, 9);
        assert_eq!(config.simulation.games, 162);
        assert_eq!(config.logging.level, "info");
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_env_override() {
        env::set_var("BASEBALL_SIM_REGULATION_INNINGS", "7");
        env::set_var("BASEBALL_SIM_SEED", "99");
        env::set_var("BASEBALL_SIM_LOG_JSON", "1");

        let mut config = SimConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.game.regulation_innings, 7);
        assert_eq!(config.simulation.seed, Some(99));
        assert!(config.logging.json_format);

        env::remove_var("BASEBALL_SIM_REGULATION_INNINGS");
        env::remove_var("BASEBALL_SIM_SEED");
        env::remove_var("BASEBALL_SIM_LOG_JSON");
    }

    #[test]
    fn test_env_override_ignores_garbage() {
        env::set_var("BASEBALL_SIM_MAX_PITCHES", "lots");
        let mut config = SimConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.simulation.max_pitches_per_game, 2000);
        env::remove_var("BASEBALL_SIM_MAX_PITCHES");
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_regulation_innings() {
        let mut config = SimConfig::default();
        config.game.regulation_innings = 0;
        assert!(config.validate().is_err());

        config.game.regulation_innings = MAX_REGULATION_INNINGS + 1;
        match config.validate().unwrap_err() {
            Error::ConfigValidation { field, .. } => {
                assert_eq!(field.as_deref(), Some("game.regulation_innings"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_zero_games() {
        let mut config = SimConfig::default();
        config.simulation.games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_concurrency_bounds() {
        let mut config = SimConfig::default();
        config.simulation.max_concurrent_games = MAX_CONCURRENT_GAMES;
        assert!(config.validate().is_ok());

        for concurrency in [0, MAX_CONCURRENT_GAMES + 1, 1 << 62] {
            config.simulation.max_concurrent_games = concurrency;
            match config.validate().unwrap_err() {
                Error::ConfigValidation { field, .. } => {
                    assert_eq!(field.as_deref(), Some("simulation.max_concurrent_games"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = SimConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_rotation() {
        let mut config = SimConfig::default();
        config.logging.rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_weights() {
        let mut config = SimConfig::default();
        config.simulation.pitch_weights.foul = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.simulation.in_play_weights.triple = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.simulation.in_play_weights = InPlayWeights {
            out: 0.0,
            single: 0.0,
            double: 0.0,
            triple: 0.0,
            home_run: 0.0,
            error: 0.0,
        };
        match config.validate().unwrap_err() {
            Error::ConfigValidation { field, .. } => {
                assert_eq!(field.as_deref(), Some("simulation.in_play_weights"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_path_expansion() {
        let mut config = SimConfig::default();
        config.simulation.report_dir = Some("~/reports".to_string());
        config.expand_paths();

        assert!(!config.simulation.report_dir.unwrap().contains('~'));
    }

    #[test]
    fn test_worker_threads() {
        let mut config = SimConfig::default();
        config.simulation.max_threads = 3;
        assert_eq!(config.worker_threads(), 3);

        config.simulation.max_threads = 0;
        let auto = config.worker_threads();
        assert!((1..=8).contains(&auto));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SimConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: SimConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.game, parsed.game);
        assert_eq!(config.simulation.pitch_weights, parsed.simulation.pitch_weights);
    }

    #[test]
    fn test_generated_default_matches_defaults() {
        let parsed: SimConfig = toml::from_str(&generate_default_config()).unwrap();
        let defaults = SimConfig::default();

        assert_eq!(parsed.game, defaults.game);
        assert_eq!(parsed.simulation.games, defaults.simulation.games);
        assert_eq!(parsed.simulation.pitch_weights, defaults.simulation.pitch_weights);
        assert_eq!(parsed.simulation.in_play_weights, defaults.simulation.in_play_weights);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_parse_config_file() {
        let config_str = r#"
[game]
regulation_innings = 7

[simulation]
games = 10
seed = 1234

[simulation.pitch_weights]
in_play = 0.5

[logging]
level = "debug"
"#;

        let config: SimConfig = toml::from_str(config_str).unwrap();

        assert_eq!(config.game.regulation_innings, 7);
        assert_eq!(config.simulation.games, 10);
        assert_eq!(config.simulation.seed, Some(1234));
        assert_eq!(config.simulation.pitch_weights.in_play, 0.5);
        assert_eq!(config.simulation.pitch_weights.ball, 0.36);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let written = init_config(Some(path_str), false).unwrap();
        assert_eq!(written, path);
        assert!(init_config(Some(path_str), false).is_err());
        assert!(init_config(Some(path_str), true).is_ok());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = SimConfig::load(Some("/nonexistent/baseball-sim.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
