//! Single game simulation

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::baseball::{Game, GameAdvance, GameRules, GameSummary, PitchOutcome};
use crate::error::{Error, Result};

use super::PitchModel;

/// Default pitch budget for a single game
pub const DEFAULT_MAX_PITCHES: u32 = 2000;

/// A finished simulated game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedGame {
    pub summary: GameSummary,
    pub seed: u64,
    /// Every pitch thrown, replayable with [`crate::pitch_log::replay`]
    pub pitches: Vec<PitchOutcome>,
}

/// Plays one game pitch by pitch from a seeded model
#[derive(Debug, Clone)]
pub struct GameSimulator {
    rules: GameRules,
    model: Arc<PitchModel>,
    seed: u64,
    max_pitches: u32,
}

impl GameSimulator {
    pub fn new(rules: GameRules, model: Arc<PitchModel>, seed: u64) -> Self {
        Self {
            rules,
            model,
            seed,
            max_pitches: DEFAULT_MAX_PITCHES,
        }
    }

    pub fn with_max_pitches(mut self, max_pitches: u32) -> Self {
        self.max_pitches = max_pitches;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Play the game to completion. The same seed always produces the same game.
    pub fn simulate(&self) -> Result<SimulatedGame> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut game = Game::with_rules(self.rules);
        let mut pitches = Vec::new();

        loop {
            if game.pitches() >= self.max_pitches {
                warn!(
                    seed = self.seed,
                    max_pitches = self.max_pitches,
                    situation = %game,
                    "Simulated game exceeded its pitch budget"
                );
                return Err(Error::SimulationStalled {
                    max_pitches: self.max_pitches,
                });
            }

            let pitch = self.model.sample(&mut rng);
            pitches.push(pitch);

            match game.advance(pitch) {
                GameAdvance::InProgress(next) => game = next,
                GameAdvance::Complete(summary) => {
                    debug!(
                        seed = self.seed,
                        away = summary.final_score().away(),
                        home = summary.final_score().home(),
                        innings = summary.innings_played().as_number(),
                        "Simulated game finished"
                    );
                    return Ok(SimulatedGame {
                        summary,
                        seed: self.seed,
                        pitches,
                    });
                }
            }
        }
    }
}
