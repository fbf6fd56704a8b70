//! baseball-sim - pitch-by-pitch baseball game engine
//!
//! Entry point for the `baseball-sim` binary.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info, warn};

use baseball_sim::baseball::{Game, GameAdvance, GameSummary, PitchOutcome};
use baseball_sim::cli::{Cli, Commands, ConfigSubcommand};
use baseball_sim::config::{self, SimConfig};
use baseball_sim::error::{Error, Result};
use baseball_sim::pitch_log::{self, ReplayOutcome};
use baseball_sim::simulation::SeasonRunner;
use baseball_sim::{demo, logging, version};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need configuration use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Demo => {
            logging::init_simple(logging::simple_level(cli.verbose, cli.quiet))?;
            return demo::run_demo(&mut io::stdout().lock());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(logging::simple_level(cli.verbose, cli.quiet))?;
            return handle_config_command(subcommand.clone());
        }
        _ => {}
    }

    let config = SimConfig::load(cli.command.config_path())?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting baseball-sim"
    );

    match cli.command {
        Commands::Replay { file, .. } => replay_file(&config, Path::new(&file)),
        Commands::Play { .. } => play_from_stdin(&config),
        Commands::Simulate {
            games,
            seed,
            output,
            ..
        } => run_simulation(&config, games, seed, output),
        // Handled before configuration was loaded
        Commands::Version | Commands::Demo | Commands::Config { .. } => Ok(()),
    }
}

fn print_final(summary: &GameSummary) {
    print!("{}", summary);
    println!("{}", summary.headline());
}

/// Replay a pitch log file
fn replay_file(config: &SimConfig, file: &Path) -> Result<()> {
    let pitches = pitch_log::load_pitch_log(file)?;
    info!(file = %file.display(), pitches = pitches.len(), "Replaying pitch log");

    match pitch_log::replay(Game::with_rules(config.game), &pitches)? {
        ReplayOutcome::Finished(summary) => print_final(&summary),
        ReplayOutcome::Suspended(game) => {
            println!("Game in progress after {} pitches", game.pitches());
            println!("{}", game);
        }
    }

    Ok(())
}

/// Score a game from pitch tokens typed on standard input
fn play_from_stdin(config: &SimConfig) -> Result<()> {
    let mut game = Game::with_rules(config.game);
    println!("Play ball!");
    println!("{}", game);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut tokens = pitch_log::line_tokens(&line);

        while let Some(token) = tokens.next() {
            let pitch: PitchOutcome = match token.parse() {
                Ok(pitch) => pitch,
                Err(e) => {
                    eprint!("{}", e.format_for_terminal());
                    continue;
                }
            };

            match game.advance(pitch) {
                GameAdvance::InProgress(next) => {
                    game = next;
                    println!("{}", game);
                }
                GameAdvance::Complete(summary) => {
                    let ignored = tokens.by_ref().count();
                    if ignored > 0 {
                        warn!(ignored, "Game over, ignoring remaining pitches on the line");
                    }
                    print_final(&summary);
                    return Ok(());
                }
            }
        }
    }

    println!("Input closed with the game in progress");
    println!("{}", game);
    Ok(())
}

/// Run a season simulation and report on it
fn run_simulation(
    config: &SimConfig,
    games: Option<usize>,
    seed: Option<u64>,
    output: Option<String>,
) -> Result<()> {
    let mut runner = SeasonRunner::from_config(config)?;
    if let Some(games) = games {
        if games == 0 {
            return Err(Error::config_field_invalid(
                "--games",
                "a season needs at least one game",
            ));
        }
        runner = runner.with_games(games);
    }
    if let Some(seed) = seed {
        runner = runner.with_seed(seed);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.worker_threads())
        .thread_name("baseball-sim")
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    let report = runtime.block_on(runner.run())?;
    println!("{}", report);

    let written = match output {
        Some(path) => {
            let path = PathBuf::from(path);
            report.write_json(&path)?;
            Some(path)
        }
        None => match config.report_dir() {
            Some(dir) => Some(report.write_to_dir(&dir)?),
            None => None,
        },
    };
    if let Some(path) = written {
        println!("Report written to {}", path.display());
    }

    if report.games_played == 0 {
        if let Some((game, message)) = runner.tracker().failures().into_iter().next() {
            return Err(Error::SimulationFailed { game, message });
        }
    }

    Ok(())
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = SimConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let path = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", path.display());
        }
        ConfigSubcommand::Validate { config } => {
            SimConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
