//! Baseball rules as consuming state machines
//!
//! Each level of the game (count, plate appearance, half inning, game) is
//! advanced by value and returns an `*Advance` enum: either the next
//! in-progress state or a summary of the finished one.

mod baserunners;
mod core;
mod game;
mod inning;
mod lineup;
mod pa;

pub use self::core::Runs;

pub use baserunners::{Base, BaserunnerState, HomePlateOutcome, PlayBaseOutcome, PlayOutcome};
pub use game::{
    Game, GameAdvance, GameRules, GameScore, GameState, GameSummary, GameWinner, InningNumber,
    TeamLine,
};
pub use inning::{HalfInning, HalfInningAdvance, HalfInningSummary, InningHalf, Outs};
pub use lineup::BattingPosition;
pub use pa::{
    BallInPlay, Balls, Count, CountAdvance, PitchOutcome, PlateAppearance, PlateAppearanceAdvance,
    Strikes,
};
