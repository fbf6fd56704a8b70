//! Weighted pitch outcome model

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::baseball::{BallInPlay, PitchOutcome};
use crate::config::{validate_weights, InPlayWeights, PitchWeights};
use crate::error::{Error, Result};

// Index order matches `PitchWeights::entries` / `InPlayWeights::entries`.
const PITCHES: [Option<PitchOutcome>; 5] = [
    Some(PitchOutcome::Ball),
    Some(PitchOutcome::Strike),
    Some(PitchOutcome::Foul),
    None,
    Some(PitchOutcome::HitByPitch),
];

const IN_PLAY: [BallInPlay; 6] = [
    BallInPlay::Out,
    BallInPlay::Single,
    BallInPlay::Double,
    BallInPlay::Triple,
    BallInPlay::HomeRun,
    BallInPlay::Error,
];

/// Draws pitch outcomes from configured weights
#[derive(Debug, Clone)]
pub struct PitchModel {
    pitch: WeightedIndex<f64>,
    in_play: WeightedIndex<f64>,
}

impl PitchModel {
    pub fn from_settings(pitch: &PitchWeights, in_play: &InPlayWeights) -> Result<Self> {
        let pitch_entries = pitch.entries();
        let in_play_entries = in_play.entries();
        validate_weights("pitch_weights", &pitch_entries)?;
        validate_weights("in_play_weights", &in_play_entries)?;

        let pitch = WeightedIndex::new(pitch_entries.iter().map(|(_, w)| *w))
            .map_err(|e| Error::config_field_invalid("simulation.pitch_weights", e.to_string()))?;
        let in_play = WeightedIndex::new(in_play_entries.iter().map(|(_, w)| *w))
            .map_err(|e| Error::config_field_invalid("simulation.in_play_weights", e.to_string()))?;

        Ok(Self { pitch, in_play })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PitchOutcome {
        match PITCHES[self.pitch.sample(rng)] {
            Some(pitch) => pitch,
            None => PitchOutcome::InPlay(IN_PLAY[self.in_play.sample(rng)]),
        }
    }
}
