//! baseball-sim - pitch-by-pitch baseball game engine
//!
//! The [`baseball`] module models a game as a stack of consuming state
//! machines. Around it sit pitch log replay, a seeded season simulator, and
//! the configuration/logging/error plumbing used by the `baseball-sim` binary.

pub mod baseball;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod pitch_log;
pub mod simulation;
pub mod version;

pub use error::{Error, Result};
