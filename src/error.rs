//! Error types for baseball-sim
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for the CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for baseball-sim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes, grouped by range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,
    Serialization = 204,

    // Pitch input errors (3xx)
    InvalidPitch = 300,
    PitchLogParse = 301,
    PitchLogFormat = 302,

    // Game rule errors (4xx)
    TrailingPitches = 400,

    // Simulation errors (5xx)
    SimulationStalled = 500,
    SimulationFailed = 501,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for the CLI (one per range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            300..=399 => 30,
            400..=499 => 40,
            500..=599 => 50,
            900..=999 => 90,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Pitch Input Errors
    // ─────────────────────────────────────────────────────────────

    /// A pitch token could not be understood
    #[error("Unknown pitch '{token}'")]
    InvalidPitch { token: String },

    /// A pitch log line contained an unknown token
    #[error("Unknown pitch '{token}' on line {line}")]
    PitchLogParse { line: usize, token: String },

    /// A JSON pitch log did not hold a list of pitches
    #[error("Malformed pitch log {path}: {message}")]
    PitchLogFormat { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Game Rule Errors
    // ─────────────────────────────────────────────────────────────

    /// The game ended before the pitch log did
    #[error("Game ended with {remaining} pitch(es) left in the log")]
    TrailingPitches { remaining: usize },

    // ─────────────────────────────────────────────────────────────
    // Simulation Errors
    // ─────────────────────────────────────────────────────────────

    /// A simulated game ran past its pitch budget
    #[error("Simulated game did not finish within {max_pitches} pitches")]
    SimulationStalled { max_pitches: u32 },

    /// A simulated game could not be run
    #[error("Simulation of game {game} failed: {message}")]
    SimulationFailed { game: usize, message: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) | Error::Json(_) => ErrorCode::Serialization,

            Error::InvalidPitch { .. } => ErrorCode::InvalidPitch,
            Error::PitchLogParse { .. } => ErrorCode::PitchLogParse,
            Error::PitchLogFormat { .. } => ErrorCode::PitchLogFormat,

            Error::TrailingPitches { .. } => ErrorCode::TrailingPitches,

            Error::SimulationStalled { .. } => ErrorCode::SimulationStalled,
            Error::SimulationFailed { .. } => ErrorCode::SimulationFailed,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'baseball-sim config init' to create a default configuration file.",
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'baseball-sim config validate' to see details.",
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values.",
            ),
            Error::InvalidPitch { .. } | Error::PitchLogParse { .. } => Some(
                "Valid pitches: ball (b), strike (s, k), foul (f), hbp, out (x), single (1b), double (2b), triple (3b), hr, error (e).",
            ),
            Error::PitchLogFormat { .. } => Some(
                "JSON pitch logs must be an array such as [\"ball\", {\"in_play\": \"single\"}].",
            ),
            Error::TrailingPitches { .. } => Some(
                "Remove the pitches recorded after the final out, or check the log for a missing half inning.",
            ),
            Error::SimulationStalled { .. } => Some(
                "Raise 'max_pitches_per_game' or give 'in_play' a larger share of 'pitch_weights'.",
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", self.code().as_str(), self);

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an invalid pitch error
    pub fn invalid_pitch(token: impl Into<String>) -> Self {
        Error::InvalidPitch {
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::InvalidPitch.as_str(), "E300");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigParseError.exit_code(), 10);
        assert_eq!(ErrorCode::IoWrite.exit_code(), 20);
        assert_eq!(ErrorCode::PitchLogParse.exit_code(), 30);
        assert_eq!(ErrorCode::TrailingPitches.exit_code(), 40);
        assert_eq!(ErrorCode::SimulationStalled.exit_code(), 50);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::config_not_found("/test").code(), ErrorCode::ConfigNotFound);
        assert_eq!(
            Error::config_field_invalid("game.regulation_innings", "too many").code(),
            ErrorCode::ConfigValidation
        );
        assert_eq!(Error::invalid_pitch("zz").code(), ErrorCode::InvalidPitch);
        assert_eq!(
            Error::TrailingPitches { remaining: 2 }.code(),
            ErrorCode::TrailingPitches
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::PitchLogParse {
            line: 7,
            token: "slider".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown pitch 'slider' on line 7");
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::invalid_pitch("zz");
        assert!(err.suggestion().unwrap().contains("hbp"));

        assert!(Error::Internal("boom".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_terminal();
        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let formatted = Error::SimulationStalled { max_pitches: 10 }.format_for_log();
        assert!(formatted.starts_with("[E500]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
