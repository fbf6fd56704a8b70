//! Season simulation
//!
//! Plays games pitch by pitch from a weighted pitch model:
//! - [`PitchModel`] samples pitch outcomes
//! - [`GameSimulator`] plays one seeded game
//! - [`SeasonRunner`] runs many games concurrently and reports on them

mod model;
mod season;
mod simulator;
mod tracker;

pub use model::PitchModel;
pub use season::{GameRecord, SeasonReport, SeasonRunner};
pub use simulator::{GameSimulator, SimulatedGame, DEFAULT_MAX_PITCHES};
pub use tracker::{GameRunState, ScheduledGame, SeasonTracker};
