//! Season runner
//!
//! Simulates a batch of games on the async runtime:
//! - Each game runs on a blocking worker thread
//! - A semaphore caps how many games run at once
//! - Results are collected over a channel and folded into a [`SeasonReport`]

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::baseball::{GameRules, GameWinner, Runs};
use crate::config::{SimConfig, MAX_CONCURRENT_GAMES};
use crate::error::{Error, Result};

use super::{GameSimulator, PitchModel, SeasonTracker, SimulatedGame};

// ─────────────────────────────────────────────────────────────────
// Season Report
// ─────────────────────────────────────────────────────────────────

/// Result of one simulated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game: usize,
    pub seed: u64,
    pub away_runs: Runs,
    pub home_runs: Runs,
    pub winner: GameWinner,
    pub innings: u16,
    pub walk_off: bool,
    pub pitches: u32,
}

impl GameRecord {
    pub fn new(game: usize, simulated: &SimulatedGame) -> Self {
        let summary = &simulated.summary;
        Self {
            game,
            seed: simulated.seed,
            away_runs: summary.final_score().away(),
            home_runs: summary.final_score().home(),
            winner: summary.winner(),
            innings: summary.innings_played().as_number(),
            walk_off: summary.is_walk_off(),
            pitches: summary.pitches(),
        }
    }
}

/// Aggregate results of a season run
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub regulation_innings: u8,
    pub games_played: usize,
    pub games_failed: usize,
    pub away_wins: usize,
    pub home_wins: usize,
    pub extra_inning_games: usize,
    pub walk_offs: usize,
    pub total_runs: u64,
    pub avg_runs_per_game: f64,
    pub avg_pitches_per_game: f64,
    pub duration_secs: f64,
    /// Summed time games waited for a simulation slot
    pub total_queue_time_ms: u64,
    /// Summed time spent simulating games
    pub total_execution_time_ms: u64,
    pub games: Vec<GameRecord>,
}

impl SeasonReport {
    fn build(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        seed: u64,
        rules: GameRules,
        mut games: Vec<GameRecord>,
        games_failed: usize,
        duration_secs: f64,
    ) -> Self {
        games.sort_by_key(|g| g.game);

        let played = games.len();
        let total_runs: u64 = games
            .iter()
            .map(|g| u64::from(g.away_runs) + u64::from(g.home_runs))
            .sum();
        let total_pitches: u64 = games.iter().map(|g| u64::from(g.pitches)).sum();
        let average = |total: u64| {
            if played == 0 {
                0.0
            } else {
                total as f64 / played as f64
            }
        };

        Self {
            run_id,
            started_at,
            seed,
            regulation_innings: rules.regulation_innings,
            games_played: played,
            games_failed,
            away_wins: games.iter().filter(|g| g.winner == GameWinner::Away).count(),
            home_wins: games.iter().filter(|g| g.winner == GameWinner::Home).count(),
            extra_inning_games: games
                .iter()
                .filter(|g| g.innings > u16::from(rules.regulation_innings))
                .count(),
            walk_offs: games.iter().filter(|g| g.walk_off).count(),
            total_runs,
            avg_runs_per_game: average(total_runs),
            avg_pitches_per_game: average(total_pitches),
            duration_secs,
            total_queue_time_ms: 0,
            total_execution_time_ms: 0,
            games,
        }
    }

    /// File name used when writing into a report directory
    pub fn file_name(&self) -> String {
        format!("season-{}.json", self.run_id)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::IoWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(path = %path.display(), games = self.games_played, "Season report written");
        Ok(())
    }

    /// Write into `dir` under [`SeasonReport::file_name`]
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        self.write_json(&path)?;
        Ok(path)
    }
}

impl fmt::Display for SeasonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Season {}", self.run_id)?;
        writeln!(f, "  Seed:               {}", self.seed)?;
        writeln!(f, "  Games played:       {}", self.games_played)?;
        if self.games_failed > 0 {
            writeln!(f, "  Games failed:       {}", self.games_failed)?;
        }
        writeln!(
            f,
            "  Away / Home wins:   {} / {}",
            self.away_wins, self.home_wins
        )?;
        writeln!(f, "  Extra-inning games: {}", self.extra_inning_games)?;
        writeln!(f, "  Walk-offs:          {}", self.walk_offs)?;
        writeln!(f, "  Runs per game:      {:.2}", self.avg_runs_per_game)?;
        writeln!(f, "  Pitches per game:   {:.1}", self.avg_pitches_per_game)?;
        writeln!(
            f,
            "  Game time:          {} ms simulating, {} ms queued",
            self.total_execution_time_ms, self.total_queue_time_ms
        )?;
        write!(f, "  Duration:           {:.2}s", self.duration_secs)
    }
}

// ─────────────────────────────────────────────────────────────────
// Season Runner
// ─────────────────────────────────────────────────────────────────

/// Runs a season of independent games
pub struct SeasonRunner {
    rules: GameRules,
    model: Arc<PitchModel>,
    games: usize,
    seed: u64,
    max_concurrent: usize,
    max_pitches: u32,
    tracker: Arc<SeasonTracker>,
}

impl SeasonRunner {
    /// Build a runner from configuration. A missing seed is drawn at random.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let settings = &config.simulation;
        let model =
            PitchModel::from_settings(&settings.pitch_weights, &settings.in_play_weights)?;

        Ok(Self {
            rules: config.game,
            model: Arc::new(model),
            games: settings.games,
            seed: settings.seed.unwrap_or_else(rand::random),
            max_concurrent: settings.max_concurrent_games.clamp(1, MAX_CONCURRENT_GAMES),
            max_pitches: settings.max_pitches_per_game,
            tracker: Arc::new(SeasonTracker::new()),
        })
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn tracker(&self) -> Arc<SeasonTracker> {
        self.tracker.clone()
    }

    /// Simulate every game and aggregate the results.
    ///
    /// Individual game failures are counted in the report; only a broken
    /// runtime aborts the run.
    pub async fn run(&self) -> Result<SeasonReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            run_id = %run_id,
            games = self.games,
            seed = self.seed,
            max_concurrent = self.max_concurrent,
            "Starting season simulation"
        );

        let limit = self.max_concurrent.min(self.games).max(1);
        let semaphore = Arc::new(Semaphore::new(limit));
        let (result_tx, mut result_rx) = mpsc::channel(limit * 2);

        for index in 0..self.games {
            let seed = self.seed.wrapping_add(index as u64);
            self.tracker.schedule(index, seed);

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| Error::Internal(format!("simulation semaphore closed: {}", e)))?;

            let simulator = GameSimulator::new(self.rules, self.model.clone(), seed)
                .with_max_pitches(self.max_pitches);
            let tracker = self.tracker.clone();
            let result_tx = result_tx.clone();

            tokio::spawn(async move {
                execute_game(index, simulator, tracker, result_tx, permit).await;
            });
        }
        drop(result_tx);

        let mut records = Vec::with_capacity(self.games);
        let mut failed = 0;
        while let Some((index, result)) = result_rx.recv().await {
            match result {
                Ok(game) => records.push(GameRecord::new(index, &game)),
                Err(e) => {
                    warn!(game = index, error = %e.format_for_log(), "Game failed");
                    failed += 1;
                }
            }
        }

        let mut report = SeasonReport::build(
            run_id,
            started_at,
            self.seed,
            self.rules,
            records,
            failed,
            start.elapsed().as_secs_f64(),
        );
        report.total_queue_time_ms = self.tracker.total_queue_time_ms();
        report.total_execution_time_ms = self.tracker.total_execution_time_ms();

        info!(
            run_id = %run_id,
            games_played = report.games_played,
            games_failed = report.games_failed,
            duration_secs = report.duration_secs,
            "Season simulation finished"
        );

        Ok(report)
    }
}

// ─────────────────────────────────────────────────────────────────
// Game Execution
// ─────────────────────────────────────────────────────────────────

/// Simulate one game on a blocking thread and send back the result
async fn execute_game(
    index: usize,
    simulator: GameSimulator,
    tracker: Arc<SeasonTracker>,
    result_tx: mpsc::Sender<(usize, Result<SimulatedGame>)>,
    permit: OwnedSemaphorePermit,
) {
    tracker.mark_running(index);

    let result = tokio::task::spawn_blocking(move || simulator.simulate())
        .await
        .unwrap_or_else(|e| {
            Err(Error::SimulationFailed {
                game: index,
                message: e.to_string(),
            })
        });

    match &result {
        Ok(_) => tracker.mark_completed(index),
        Err(e) => tracker.mark_failed(index, e.to_string()),
    }

    // Free the slot before a send that may wait on the collector
    drop(permit);

    if let Err(e) = result_tx.send((index, result)).await {
        error!(game = index, error = %e, "Failed to send game result");
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
