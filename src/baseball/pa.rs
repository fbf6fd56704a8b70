use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Balls {
    #[default]
    Zero,
    One,
    Two,
    Three,
}

impl Balls {
    pub fn as_number(self) -> u8 {
        match self {
            Balls::Zero => 0,
            Balls::One => 1,
            Balls::Two => 2,
            Balls::Three => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strikes {
    #[default]
    Zero,
    One,
    Two,
}

impl Strikes {
    pub fn as_number(self) -> u8 {
        match self {
            Strikes::Zero => 0,
            Strikes::One => 1,
            Strikes::Two => 2,
        }
    }
}

/// Balls and strikes on the current batter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Count {
    balls: Balls,
    strikes: Strikes,
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.balls.as_number(), self.strikes.as_number())
    }
}

impl Count {
    pub fn new(balls: Balls, strikes: Strikes) -> Self {
        Count { balls, strikes }
    }

    pub fn balls(&self) -> Balls {
        self.balls
    }

    pub fn strikes(&self) -> Strikes {
        self.strikes
    }

    /// Three balls and two strikes
    pub fn is_full(&self) -> bool {
        self.balls == Balls::Three && self.strikes == Strikes::Two
    }

    /// Apply a pitch to the count.
    ///
    /// Pitches that don't affect the count (balls in play, hit batters)
    /// leave it untouched.
    pub fn advance(self, outcome: PitchOutcome) -> CountAdvance {
        match outcome {
            PitchOutcome::Ball => self.advance_ball(),
            PitchOutcome::Strike => self.advance_strike(),
            PitchOutcome::Foul => self.advance_foul(),
            PitchOutcome::InPlay(_) | PitchOutcome::HitByPitch => CountAdvance::InProgress(self),
        }
    }

    fn advance_ball(self) -> CountAdvance {
        let balls = match self.balls {
            Balls::Zero => Balls::One,
            Balls::One => Balls::Two,
            Balls::Two => Balls::Three,
            Balls::Three => return CountAdvance::Walk,
        };
        CountAdvance::InProgress(Count::new(balls, self.strikes))
    }

    fn advance_strike(self) -> CountAdvance {
        match self.add_strike() {
            Some(count) => CountAdvance::InProgress(count),
            None => CountAdvance::Strikeout,
        }
    }

    fn advance_foul(self) -> CountAdvance {
        // A foul with two strikes keeps the count alive
        CountAdvance::InProgress(self.add_strike().unwrap_or(self))
    }

    fn add_strike(self) -> Option<Count> {
        let strikes = match self.strikes {
            Strikes::Zero => Strikes::One,
            Strikes::One => Strikes::Two,
            Strikes::Two => return None,
        };
        Some(Count::new(self.balls, strikes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAdvance {
    InProgress(Count),
    Strikeout,
    Walk,
}

/// What happened on a single pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchOutcome {
    Ball,
    Strike,
    Foul,
    InPlay(BallInPlay),
    HitByPitch,
}

impl FromStr for PitchOutcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let outcome = match s.trim().to_lowercase().as_str() {
            "b" | "ball" => PitchOutcome::Ball,
            "s" | "k" | "strike" => PitchOutcome::Strike,
            "f" | "foul" => PitchOutcome::Foul,
            "hbp" | "hit_by_pitch" => PitchOutcome::HitByPitch,
            "x" | "out" => PitchOutcome::InPlay(BallInPlay::Out),
            "1b" | "single" => PitchOutcome::InPlay(BallInPlay::Single),
            "2b" | "double" => PitchOutcome::InPlay(BallInPlay::Double),
            "3b" | "triple" => PitchOutcome::InPlay(BallInPlay::Triple),
            "hr" | "home_run" | "homer" => PitchOutcome::InPlay(BallInPlay::HomeRun),
            "e" | "error" => PitchOutcome::InPlay(BallInPlay::Error),
            _ => return Err(Error::invalid_pitch(s.trim())),
        };
        Ok(outcome)
    }
}

impl fmt::Display for PitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchOutcome::Ball => write!(f, "ball"),
            PitchOutcome::Strike => write!(f, "strike"),
            PitchOutcome::Foul => write!(f, "foul"),
            PitchOutcome::HitByPitch => write!(f, "hbp"),
            PitchOutcome::InPlay(ball_in_play) => write!(f, "{}", ball_in_play),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallInPlay {
    Out,
    Single,
    Double,
    Triple,
    HomeRun,
    Error,
}

impl BallInPlay {
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            BallInPlay::Single | BallInPlay::Double | BallInPlay::Triple | BallInPlay::HomeRun
        )
    }

    /// Bases the batter takes on the play
    pub fn bases(self) -> u8 {
        match self {
            BallInPlay::Out => 0,
            BallInPlay::Single | BallInPlay::Error => 1,
            BallInPlay::Double => 2,
            BallInPlay::Triple => 3,
            BallInPlay::HomeRun => 4,
        }
    }
}

impl fmt::Display for BallInPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            BallInPlay::Out => "out",
            BallInPlay::Single => "single",
            BallInPlay::Double => "double",
            BallInPlay::Triple => "triple",
            BallInPlay::HomeRun => "hr",
            BallInPlay::Error => "error",
        };
        write!(f, "{}", token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlateAppearance {
    count: Count,
    pitches: u32,
}

impl PlateAppearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(count: Count) -> Self {
        Self { count, pitches: 0 }
    }

    pub fn count(&self) -> Count {
        self.count
    }

    /// Pitches thrown in this plate appearance so far
    pub fn pitches(&self) -> u32 {
        self.pitches
    }

    pub fn advance(self, outcome: PitchOutcome) -> PlateAppearanceAdvance {
        match outcome {
            PitchOutcome::Ball | PitchOutcome::Strike | PitchOutcome::Foul => {
                match self.count.advance(outcome) {
                    CountAdvance::InProgress(count) => {
                        PlateAppearanceAdvance::InProgress(PlateAppearance {
                            count,
                            pitches: self.pitches + 1,
                        })
                    }
                    CountAdvance::Strikeout => PlateAppearanceAdvance::Strikeout,
                    CountAdvance::Walk => PlateAppearanceAdvance::Walk,
                }
            }
            PitchOutcome::InPlay(ball_in_play) => match ball_in_play {
                BallInPlay::Out => PlateAppearanceAdvance::Out,
                BallInPlay::Single => PlateAppearanceAdvance::Single,
                BallInPlay::Double => PlateAppearanceAdvance::Double,
                BallInPlay::Triple => PlateAppearanceAdvance::Triple,
                BallInPlay::HomeRun => PlateAppearanceAdvance::HomeRun,
                BallInPlay::Error => PlateAppearanceAdvance::Error,
            },
            PitchOutcome::HitByPitch => PlateAppearanceAdvance::HitByPitch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateAppearanceAdvance {
    InProgress(PlateAppearance),
    Out,
    Walk,
    HitByPitch,
    Single,
    Double,
    Triple,
    HomeRun,
    Error,
    Strikeout,
}

impl PlateAppearanceAdvance {
    pub fn is_complete(&self) -> bool {
        !matches!(self, PlateAppearanceAdvance::InProgress(_))
    }

    pub fn plate_appearance(self) -> Option<PlateAppearance> {
        match self {
            PlateAppearanceAdvance::InProgress(pa) => Some(pa),
            _ => None,
        }
    }
}
