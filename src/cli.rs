//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for baseball-sim.

use clap::{Parser, Subcommand};

/// baseball-sim - Pitch-by-pitch baseball game engine
///
/// Replays recorded pitch logs, scores games interactively from standard
/// input, and simulates whole seasons from a weighted pitch model.
#[derive(Parser, Debug)]
#[command(name = "baseball-sim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through a plate appearance, a half inning and the batting order
    Demo,

    /// Replay a pitch log and print the result
    Replay {
        /// Pitch log (text tokens, or a JSON array when the extension is .json)
        file: String,

        /// Path to configuration file
        #[arg(short, long, env = "BASEBALL_SIM_CONFIG")]
        config: Option<String>,
    },

    /// Score a game pitch by pitch from standard input
    Play {
        /// Path to configuration file
        #[arg(short, long, env = "BASEBALL_SIM_CONFIG")]
        config: Option<String>,
    },

    /// Simulate a season of games
    Simulate {
        /// Path to configuration file
        #[arg(short, long, env = "BASEBALL_SIM_CONFIG")]
        config: Option<String>,

        /// Number of games (overrides simulation.games)
        #[arg(short, long)]
        games: Option<usize>,

        /// Base RNG seed (overrides simulation.seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file for the season report (JSON)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

impl Commands {
    /// Configuration path given to a command that loads configuration
    pub fn config_path(&self) -> Option<&str> {
        match self {
            Commands::Replay { config, .. }
            | Commands::Play { config }
            | Commands::Simulate { config, .. } => config.as_deref(),
            _ => None,
        }
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}
