use std::fmt;

use serde::{Deserialize, Serialize};

use crate::baseball::{
    BaserunnerState, BattingPosition, PitchOutcome, PlateAppearance, PlateAppearanceAdvance,
    PlayOutcome, Runs,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InningHalf {
    Top,
    Bottom,
}

impl fmt::Display for InningHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InningHalf::Top => write!(f, "Top"),
            InningHalf::Bottom => write!(f, "Bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outs {
    #[default]
    Zero,
    One,
    Two,
    /// Side retired
    Three,
}

impl Outs {
    pub fn add_out(self) -> Outs {
        match self {
            Outs::Zero => Outs::One,
            Outs::One => Outs::Two,
            Outs::Two | Outs::Three => Outs::Three,
        }
    }

    pub fn add_outs(self, outs: u8) -> Outs {
        (0..outs).fold(self, |current, _| current.add_out())
    }

    pub fn as_number(self) -> u8 {
        match self {
            Outs::Zero => 0,
            Outs::One => 1,
            Outs::Two => 2,
            Outs::Three => 3,
        }
    }
}

impl fmt::Display for Outs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outs::One => write!(f, "1 out"),
            _ => write!(f, "{} outs", self.as_number()),
        }
    }
}

/// One team's turn at bat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfInning {
    half: InningHalf,
    outs: Outs,
    current_batter: BattingPosition,
    current_pa: PlateAppearance,
    baserunners: BaserunnerState,
    runs_scored: Runs,
    hits: u32,
    errors: u32,
    pitches: u32,
}

impl HalfInning {
    pub fn new(half: InningHalf, starting_batter: BattingPosition) -> Self {
        HalfInning {
            half,
            outs: Outs::Zero,
            current_batter: starting_batter,
            current_pa: PlateAppearance::new(),
            baserunners: BaserunnerState::empty(),
            runs_scored: 0,
            hits: 0,
            errors: 0,
            pitches: 0,
        }
    }

    pub fn half(&self) -> InningHalf {
        self.half
    }

    pub fn outs(&self) -> Outs {
        self.outs
    }

    pub fn current_batter(&self) -> BattingPosition {
        self.current_batter
    }

    pub fn current_plate_appearance(&self) -> &PlateAppearance {
        &self.current_pa
    }

    pub fn baserunners(&self) -> BaserunnerState {
        self.baserunners
    }

    pub fn runs_scored(&self) -> Runs {
        self.runs_scored
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Errors committed by the fielding team
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn pitches(&self) -> u32 {
        self.pitches
    }

    pub fn advance(mut self, outcome: PitchOutcome) -> HalfInningAdvance {
        self.pitches += 1;
        let batter = self.current_batter;
        let runners = self.baserunners;

        let play = match self.current_pa.advance(outcome) {
            PlateAppearanceAdvance::InProgress(pa) => {
                self.current_pa = pa;
                return HalfInningAdvance::InProgress(self);
            }
            PlateAppearanceAdvance::Out | PlateAppearanceAdvance::Strikeout => {
                PlayOutcome::batter_out(runners)
            }
            PlateAppearanceAdvance::Walk | PlateAppearanceAdvance::HitByPitch => {
                PlayOutcome::walk(runners, batter)
            }
            PlateAppearanceAdvance::Single => {
                self.hits += 1;
                PlayOutcome::single(runners, batter)
            }
            PlateAppearanceAdvance::Double => {
                self.hits += 1;
                PlayOutcome::double(runners, batter)
            }
            PlateAppearanceAdvance::Triple => {
                self.hits += 1;
                PlayOutcome::triple(runners, batter)
            }
            PlateAppearanceAdvance::HomeRun => {
                self.hits += 1;
                PlayOutcome::homerun(runners, batter)
            }
            PlateAppearanceAdvance::Error => {
                self.errors += 1;
                PlayOutcome::reached_on_error(runners, batter)
            }
        };

        self.record_play(play)
    }

    /// End the current plate appearance with a play described by the scorer.
    ///
    /// Runs do not count on a play that makes the third out.
    pub fn record_play(mut self, play: PlayOutcome) -> HalfInningAdvance {
        let outs = self.outs.add_outs(play.outs());
        let next_batter = self.current_batter.next();

        if outs == Outs::Three {
            return HalfInningAdvance::Complete(HalfInningSummary {
                half: self.half,
                runs_scored: self.runs_scored,
                hits: self.hits,
                errors: self.errors,
                left_on_base: play.baserunners().runner_count(),
                next_batter,
                pitches: self.pitches,
            });
        }

        self.outs = outs;
        self.baserunners = play.baserunners();
        self.runs_scored += play.runs_scored();
        self.current_batter = next_batter;
        self.current_pa = PlateAppearance::new();
        HalfInningAdvance::InProgress(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfInningSummary {
    half: InningHalf,
    runs_scored: Runs,
    hits: u32,
    errors: u32,
    left_on_base: u8,
    next_batter: BattingPosition,
    pitches: u32,
}

impl HalfInningSummary {
    pub fn half(&self) -> InningHalf {
        self.half
    }

    pub fn runs_scored(&self) -> Runs {
        self.runs_scored
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn left_on_base(&self) -> u8 {
        self.left_on_base
    }

    /// Leadoff batter for this team's next turn at bat
    pub fn next_batter(&self) -> BattingPosition {
        self.next_batter
    }

    pub fn pitches(&self) -> u32 {
        self.pitches
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfInningAdvance {
    InProgress(HalfInning),
    Complete(HalfInningSummary),
}

impl HalfInningAdvance {
    pub fn is_complete(&self) -> bool {
        matches!(self, HalfInningAdvance::Complete(_))
    }

    pub fn half_inning(self) -> Option<HalfInning> {
        match self {
            HalfInningAdvance::InProgress(hi) => Some(hi),
            HalfInningAdvance::Complete(_) => None,
        }
    }

    pub fn summary(self) -> Option<HalfInningSummary> {
        match self {
            HalfInningAdvance::InProgress(_) => None,
            HalfInningAdvance::Complete(summary) => Some(summary),
        }
    }
}
