use std::fmt;

use crate::baseball::{BattingPosition, Runs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    First,
    Second,
    Third,
    Home,
}

impl Base {
    pub fn next(self) -> Base {
        match self {
            Base::First => Base::Second,
            Base::Second => Base::Third,
            Base::Third | Base::Home => Base::Home,
        }
    }

    /// Move `bases` bases forward, stopping at home.
    pub fn advance_by(self, bases: u8) -> Base {
        let mut current = self;
        for _ in 0..bases {
            if current == Base::Home {
                break;
            }
            current = current.next();
        }
        current
    }

    fn for_batter(bases: u8) -> Base {
        match bases {
            0 | 1 => Base::First,
            2 => Base::Second,
            3 => Base::Third,
            _ => Base::Home,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::First => write!(f, "1st"),
            Base::Second => write!(f, "2nd"),
            Base::Third => write!(f, "3rd"),
            Base::Home => write!(f, "home"),
        }
    }
}

/// What a base looks like once a play is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayBaseOutcome {
    ForceOut,
    TagOut,
    Runner(BattingPosition),
    None,
}

impl PlayBaseOutcome {
    pub fn outs(&self) -> u8 {
        match self {
            PlayBaseOutcome::ForceOut | PlayBaseOutcome::TagOut => 1,
            PlayBaseOutcome::Runner(_) | PlayBaseOutcome::None => 0,
        }
    }

    pub fn is_out(&self) -> bool {
        self.outs() > 0
    }

    pub fn runner(self) -> Option<BattingPosition> {
        match self {
            PlayBaseOutcome::Runner(batting_position) => Some(batting_position),
            _ => None,
        }
    }

    fn from_runner(runner: Option<BattingPosition>) -> Self {
        runner.map_or(PlayBaseOutcome::None, PlayBaseOutcome::Runner)
    }
}

/// Runs that crossed the plate on a play, or an out made at home
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePlateOutcome {
    None,
    One,
    Two,
    Three,
    Four,
    Out,
}

impl HomePlateOutcome {
    /// At most four runs can score on one play; larger values clamp to four.
    pub fn from_runs(runs: Runs) -> Self {
        match runs {
            0 => HomePlateOutcome::None,
            1 => HomePlateOutcome::One,
            2 => HomePlateOutcome::Two,
            3 => HomePlateOutcome::Three,
            _ => HomePlateOutcome::Four,
        }
    }

    pub fn outs(self) -> u8 {
        u8::from(self == HomePlateOutcome::Out)
    }

    pub fn is_out(self) -> bool {
        self.outs() > 0
    }

    pub fn runs_scored(self) -> Runs {
        match self {
            HomePlateOutcome::One => 1,
            HomePlateOutcome::Two => 2,
            HomePlateOutcome::Three => 3,
            HomePlateOutcome::Four => 4,
            HomePlateOutcome::None | HomePlateOutcome::Out => 0,
        }
    }

    fn add_run(self) -> Self {
        Self::from_runs(self.runs_scored() + 1)
    }
}

/// The result of a ball put in play (or a base on balls), base by base.
///
/// Standard plays are built from the runners on base and the batter;
/// anything unusual (double plays, runners thrown out) can be described
/// with [`PlayOutcome::new`] and the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    first: PlayBaseOutcome,
    second: PlayBaseOutcome,
    third: PlayBaseOutcome,
    home: HomePlateOutcome,
    batter_out: bool,
}

impl PlayOutcome {
    pub fn new(
        first: PlayBaseOutcome,
        second: PlayBaseOutcome,
        third: PlayBaseOutcome,
        home: HomePlateOutcome,
    ) -> Self {
        PlayOutcome {
            first,
            second,
            third,
            home,
            batter_out: false,
        }
    }

    /// Batter retired, runners hold.
    pub fn batter_out(baserunners: BaserunnerState) -> Self {
        Self::holding(baserunners).with_batter_out(true)
    }

    pub fn single(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        Self::advance_all(baserunners, batter, 1)
    }

    pub fn double(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        Self::advance_all(baserunners, batter, 2)
    }

    pub fn triple(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        Self::advance_all(baserunners, batter, 3)
    }

    pub fn homerun(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        Self::advance_all(baserunners, batter, 4)
    }

    /// Batter reaches first; every runner moves up one base.
    pub fn reached_on_error(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        Self::advance_all(baserunners, batter, 1)
    }

    /// Base on balls or hit batsman: only forced runners move.
    pub fn walk(baserunners: BaserunnerState, batter: BattingPosition) -> Self {
        let mut play = Self::holding(baserunners).with_first(PlayBaseOutcome::Runner(batter));

        if let Some(on_first) = baserunners.first() {
            play = play.with_second(PlayBaseOutcome::Runner(on_first));
            if let Some(on_second) = baserunners.second() {
                play = play.with_third(PlayBaseOutcome::Runner(on_second));
                if baserunners.third().is_some() {
                    play = play.with_home(HomePlateOutcome::One);
                }
            }
        }

        play
    }

    fn holding(baserunners: BaserunnerState) -> Self {
        Self::new(
            PlayBaseOutcome::from_runner(baserunners.first()),
            PlayBaseOutcome::from_runner(baserunners.second()),
            PlayBaseOutcome::from_runner(baserunners.third()),
            HomePlateOutcome::None,
        )
    }

    fn advance_all(baserunners: BaserunnerState, batter: BattingPosition, bases: u8) -> Self {
        let empty = Self::new(
            PlayBaseOutcome::None,
            PlayBaseOutcome::None,
            PlayBaseOutcome::None,
            HomePlateOutcome::None,
        );

        baserunners
            .runners()
            .map(|(base, runner)| (base.advance_by(bases), runner))
            .chain(std::iter::once((Base::for_batter(bases), batter)))
            .fold(empty, |play, (base, runner)| play.place(base, runner))
    }

    fn place(self, base: Base, runner: BattingPosition) -> Self {
        match base {
            Base::First => self.with_first(PlayBaseOutcome::Runner(runner)),
            Base::Second => self.with_second(PlayBaseOutcome::Runner(runner)),
            Base::Third => self.with_third(PlayBaseOutcome::Runner(runner)),
            Base::Home => self.with_home(self.home.add_run()),
        }
    }

    /// Total outs recorded on the play
    pub fn outs(self) -> u8 {
        self.first.outs()
            + self.second.outs()
            + self.third.outs()
            + self.home.outs()
            + u8::from(self.batter_out)
    }

    pub fn first(self) -> PlayBaseOutcome {
        self.first
    }

    pub fn second(self) -> PlayBaseOutcome {
        self.second
    }

    pub fn third(self) -> PlayBaseOutcome {
        self.third
    }

    pub fn home(self) -> HomePlateOutcome {
        self.home
    }

    pub fn is_batter_out(self) -> bool {
        self.batter_out
    }

    pub fn with_first(self, first: PlayBaseOutcome) -> Self {
        Self { first, ..self }
    }

    pub fn with_second(self, second: PlayBaseOutcome) -> Self {
        Self { second, ..self }
    }

    pub fn with_third(self, third: PlayBaseOutcome) -> Self {
        Self { third, ..self }
    }

    pub fn with_home(self, home: HomePlateOutcome) -> Self {
        Self { home, ..self }
    }

    pub fn with_batter_out(self, batter_out: bool) -> Self {
        Self { batter_out, ..self }
    }

    /// Runners left standing once the play is over
    pub fn baserunners(self) -> BaserunnerState {
        BaserunnerState {
            first: self.first.runner(),
            second: self.second.runner(),
            third: self.third.runner(),
        }
    }

    pub fn runs_scored(self) -> Runs {
        self.home.runs_scored()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaserunnerState {
    first: Option<BattingPosition>,
    second: Option<BattingPosition>,
    third: Option<BattingPosition>,
}

impl BaserunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn is_empty(&self) -> bool {
        self.runner_count() == 0
    }

    pub fn first(&self) -> Option<BattingPosition> {
        self.first
    }

    pub fn second(&self) -> Option<BattingPosition> {
        self.second
    }

    pub fn third(&self) -> Option<BattingPosition> {
        self.third
    }

    pub fn set_first(mut self, runner: Option<BattingPosition>) -> Self {
        self.first = runner;
        self
    }

    pub fn set_second(mut self, runner: Option<BattingPosition>) -> Self {
        self.second = runner;
        self
    }

    pub fn set_third(mut self, runner: Option<BattingPosition>) -> Self {
        self.third = runner;
        self
    }

    pub fn runner_count(&self) -> u8 {
        [self.first, self.second, self.third]
            .iter()
            .filter(|runner| runner.is_some())
            .count() as u8
    }

    pub fn runner_on(&self, base: Base) -> Option<BattingPosition> {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
            Base::Home => None,
        }
    }

    pub fn has_runner_on(&self, base: Base) -> bool {
        self.runner_on(base).is_some()
    }

    /// Occupied bases, lead runner first
    pub fn runners(&self) -> impl Iterator<Item = (Base, BattingPosition)> {
        [
            (Base::Third, self.third),
            (Base::Second, self.second),
            (Base::First, self.first),
        ]
        .into_iter()
        .filter_map(|(base, runner)| runner.map(|runner| (base, runner)))
    }

    /// Runners after a walk to `batter`, and the runs forced in
    pub fn walk(&self, batter: BattingPosition) -> (BaserunnerState, Runs) {
        let play = PlayOutcome::walk(*self, batter);
        (play.baserunners(), play.runs_scored())
    }

    /// Runs a home run would score right now
    pub fn home_run(&self) -> Runs {
        Runs::from(self.runner_count()) + 1
    }
}

impl fmt::Display for BaserunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<String> = [Base::First, Base::Second, Base::Third]
            .into_iter()
            .filter(|base| self.has_runner_on(*base))
            .map(|base| base.to_string())
            .collect();

        match occupied.as_slice() {
            [] => write!(f, "bases empty"),
            [only] => write!(f, "runner on {}", only),
            [a, b] => write!(f, "runners on {} and {}", a, b),
            _ => write!(f, "bases loaded"),
        }
    }
}
