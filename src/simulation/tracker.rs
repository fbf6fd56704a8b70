//! Season game state tracking
//!
//! Tracks every scheduled game of a season run and its execution state.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::RwLock;

// ─────────────────────────────────────────────────────────────────
// Game Run State
// ─────────────────────────────────────────────────────────────────

/// State of a scheduled game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameRunState {
    /// Waiting for a simulation slot
    #[default]
    Queued,
    /// Being simulated
    Running,
    /// Finished with a result
    Completed,
    /// Abandoned with an error
    Failed,
}

// ─────────────────────────────────────────────────────────────────
// Scheduled Game
// ─────────────────────────────────────────────────────────────────

/// One game of a season run
#[derive(Debug)]
pub struct ScheduledGame {
    /// Position in the season (0-based)
    pub index: usize,

    /// RNG seed for this game
    pub seed: u64,

    /// Current state
    pub state: GameRunState,

    /// When the game was scheduled
    pub queued_at: Instant,

    /// When simulation started
    pub started_at: Option<Instant>,

    /// When simulation finished
    pub completed_at: Option<Instant>,

    /// Error message if failed
    pub error: Option<String>,
}

impl ScheduledGame {
    pub fn new(index: usize, seed: u64) -> Self {
        Self {
            index,
            seed,
            state: GameRunState::Queued,
            queued_at: Instant::now(),
            started_at: None,
            completed_at: None,
            error: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.state = GameRunState::Running;
        self.started_at = Some(Instant::now());
    }

    pub fn mark_completed(&mut self) {
        self.state = GameRunState::Completed;
        self.completed_at = Some(Instant::now());
    }

    pub fn mark_failed(&mut self, error: String) {
        self.state = GameRunState::Failed;
        self.completed_at = Some(Instant::now());
        self.error = Some(error);
    }

    /// Time spent waiting for a slot
    pub fn queue_time_ms(&self) -> u64 {
        self.started_at
            .map(|s| (s - self.queued_at).as_millis() as u64)
            .unwrap_or(0)
    }

    /// Time spent simulating
    pub fn execution_time_ms(&self) -> u64 {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => (end - start).as_millis() as u64,
            (Some(start), None) => start.elapsed().as_millis() as u64,
            _ => 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Season Tracker
// ─────────────────────────────────────────────────────────────────

/// Tracks all games of a season run
#[derive(Default)]
pub struct SeasonTracker {
    games: RwLock<HashMap<usize, ScheduledGame>>,

    completed_count: RwLock<u64>,

    failed_count: RwLock<u64>,

    peak_running: RwLock<usize>,
}

impl SeasonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game in the queued state
    pub fn schedule(&self, index: usize, seed: u64) {
        self.games.write().insert(index, ScheduledGame::new(index, seed));
    }

    /// Mark a game as running
    pub fn mark_running(&self, index: usize) -> bool {
        let mut games = self.games.write();
        let Some(game) = games.get_mut(&index) else {
            return false;
        };
        game.mark_running();

        let running = games
            .values()
            .filter(|g| g.state == GameRunState::Running)
            .count();
        let mut peak = self.peak_running.write();
        *peak = (*peak).max(running);
        true
    }

    pub fn mark_completed(&self, index: usize) {
        let mut games = self.games.write();
        if let Some(game) = games.get_mut(&index) {
            game.mark_completed();
            *self.completed_count.write() += 1;
        }
    }

    pub fn mark_failed(&self, index: usize, error: String) {
        let mut games = self.games.write();
        if let Some(game) = games.get_mut(&index) {
            game.mark_failed(error);
            *self.failed_count.write() += 1;
        }
    }

    pub fn state(&self, index: usize) -> Option<GameRunState> {
        self.games.read().get(&index).map(|g| g.state)
    }

    pub fn running_count(&self) -> usize {
        self.count_in(GameRunState::Running)
    }

    pub fn queued_count(&self) -> usize {
        self.count_in(GameRunState::Queued)
    }

    fn count_in(&self, state: GameRunState) -> usize {
        self.games
            .read()
            .values()
            .filter(|g| g.state == state)
            .count()
    }

    /// Most games seen running at the same time
    pub fn peak_running(&self) -> usize {
        *self.peak_running.read()
    }

    pub fn total_completed(&self) -> u64 {
        *self.completed_count.read()
    }

    pub fn total_failed(&self) -> u64 {
        *self.failed_count.read()
    }

    /// Failed games with their error, in season order
    pub fn failures(&self) -> Vec<(usize, String)> {
        let mut failures: Vec<_> = self
            .games
            .read()
            .values()
            .filter(|g| g.state == GameRunState::Failed)
            .map(|g| (g.index, g.error.clone().unwrap_or_default()))
            .collect();
        failures.sort_by_key(|(index, _)| *index);
        failures
    }

    /// Summed time games spent waiting for a slot
    pub fn total_queue_time_ms(&self) -> u64 {
        self.games
            .read()
            .values()
            .map(|g| g.queue_time_ms())
            .sum()
    }

    /// Summed simulation time across finished games
    pub fn total_execution_time_ms(&self) -> u64 {
        self.games
            .read()
            .values()
            .map(|g| g.execution_time_ms())
            .sum()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
