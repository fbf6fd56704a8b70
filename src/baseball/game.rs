use std::fmt;

use serde::{Deserialize, Serialize};

use crate::baseball::{
    BattingPosition, HalfInning, HalfInningAdvance, HalfInningSummary, InningHalf, PitchOutcome,
    PlayOutcome, Runs,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InningNumber {
    #[default]
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    /// 10th inning and beyond
    Extra(u16),
}

impl InningNumber {
    pub fn next(self) -> InningNumber {
        match self {
            InningNumber::First => InningNumber::Second,
            InningNumber::Second => InningNumber::Third,
            InningNumber::Third => InningNumber::Fourth,
            InningNumber::Fourth => InningNumber::Fifth,
            InningNumber::Fifth => InningNumber::Sixth,
            InningNumber::Sixth => InningNumber::Seventh,
            InningNumber::Seventh => InningNumber::Eighth,
            InningNumber::Eighth => InningNumber::Ninth,
            InningNumber::Ninth => InningNumber::Extra(10),
            InningNumber::Extra(n) => InningNumber::Extra(n.saturating_add(1)),
        }
    }

    pub fn as_number(self) -> u16 {
        match self {
            InningNumber::First => 1,
            InningNumber::Second => 2,
            InningNumber::Third => 3,
            InningNumber::Fourth => 4,
            InningNumber::Fifth => 5,
            InningNumber::Sixth => 6,
            InningNumber::Seventh => 7,
            InningNumber::Eighth => 8,
            InningNumber::Ninth => 9,
            InningNumber::Extra(n) => n,
        }
    }

    pub fn from_number(number: u16) -> Option<InningNumber> {
        let inning = match number {
            0 => return None,
            1 => InningNumber::First,
            2 => InningNumber::Second,
            3 => InningNumber::Third,
            4 => InningNumber::Fourth,
            5 => InningNumber::Fifth,
            6 => InningNumber::Sixth,
            7 => InningNumber::Seventh,
            8 => InningNumber::Eighth,
            9 => InningNumber::Ninth,
            n => InningNumber::Extra(n),
        };
        Some(inning)
    }

    /// Past the ninth
    pub fn is_extra(&self) -> bool {
        matches!(self, InningNumber::Extra(_))
    }
}

impl fmt::Display for InningNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.as_number();
        let suffix = match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        write!(f, "{}{}", n, suffix)
    }
}

/// Rules that vary between leagues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Innings in a full game before extra innings
    pub regulation_innings: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            regulation_innings: 9,
        }
    }
}

impl GameRules {
    pub fn new(regulation_innings: u8) -> Self {
        Self { regulation_innings }
    }

    /// Whether a game may end once `inning` has been played
    pub fn can_end_after(&self, inning: InningNumber) -> bool {
        inning.as_number() >= u16::from(self.regulation_innings)
    }
}

/// One team's row of the line score
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamLine {
    runs: Runs,
    hits: u32,
    errors: u32,
    innings: Vec<Runs>,
}

impl TeamLine {
    pub fn runs(&self) -> Runs {
        self.runs
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Runs per inning batted
    pub fn innings(&self) -> &[Runs] {
        &self.innings
    }

    fn record_inning(&mut self, runs: Runs, hits: u32) {
        self.runs += runs;
        self.hits += hits;
        self.innings.push(runs);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameScore {
    away: TeamLine,
    home: TeamLine,
}

impl GameScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn away(&self) -> Runs {
        self.away.runs
    }

    pub fn home(&self) -> Runs {
        self.home.runs
    }

    pub fn away_line(&self) -> &TeamLine {
        &self.away
    }

    pub fn home_line(&self) -> &TeamLine {
        &self.home
    }

    /// Add runs to the total without touching the inning-by-inning line.
    pub fn add_away_runs(mut self, runs: Runs) -> Self {
        self.away.runs += runs;
        self
    }

    /// Add runs to the total without touching the inning-by-inning line.
    pub fn add_home_runs(mut self, runs: Runs) -> Self {
        self.home.runs += runs;
        self
    }

    pub fn winner(&self) -> Option<GameWinner> {
        match self.away.runs.cmp(&self.home.runs) {
            std::cmp::Ordering::Greater => Some(GameWinner::Away),
            std::cmp::Ordering::Less => Some(GameWinner::Home),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Credit a finished (or walked-off) half inning: runs and hits to the
    /// batting team, errors to the fielding team.
    fn credit(&mut self, half: InningHalf, runs: Runs, hits: u32, errors: u32) {
        let (batting, fielding) = match half {
            InningHalf::Top => (&mut self.away, &mut self.home),
            InningHalf::Bottom => (&mut self.home, &mut self.away),
        };
        batting.record_inning(runs, hits);
        fielding.errors += errors;
    }

    fn credit_summary(&mut self, summary: &HalfInningSummary) {
        self.credit(
            summary.half(),
            summary.runs_scored(),
            summary.hits(),
            summary.errors(),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameWinner {
    Away,
    Home,
}

impl fmt::Display for GameWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWinner::Away => write!(f, "Away"),
            GameWinner::Home => write!(f, "Home"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    final_score: GameScore,
    innings_played: InningNumber,
    winner: GameWinner,
    walk_off: bool,
    pitches: u32,
}

impl GameSummary {
    pub fn final_score(&self) -> &GameScore {
        &self.final_score
    }

    pub fn innings_played(&self) -> InningNumber {
        self.innings_played
    }

    pub fn winner(&self) -> GameWinner {
        self.winner
    }

    /// Home team won in its last at-bat before the side was retired
    pub fn is_walk_off(&self) -> bool {
        self.walk_off
    }

    pub fn pitches(&self) -> u32 {
        self.pitches
    }

    /// One-line result, e.g. "Home wins 4-3 in 10 innings (walk-off)"
    pub fn headline(&self) -> String {
        let (winning, losing) = match self.winner {
            GameWinner::Away => (self.final_score.away(), self.final_score.home()),
            GameWinner::Home => (self.final_score.home(), self.final_score.away()),
        };
        let mut headline = format!(
            "{} wins {}-{} in {} innings",
            self.winner,
            winning,
            losing,
            self.innings_played.as_number()
        );
        if self.walk_off {
            headline.push_str(" (walk-off)");
        }
        headline
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let away = self.final_score.away_line();
        let home = self.final_score.home_line();
        let innings = away.innings().len().max(home.innings().len());

        write!(f, "{:<6}", "")?;
        for n in 1..=innings {
            write!(f, "{:>3}", n)?;
        }
        writeln!(f, "{:>5}{:>3}{:>3}", "R", "H", "E")?;

        for (name, line) in [("Away", away), ("Home", home)] {
            write!(f, "{:<6}", name)?;
            for inning in 0..innings {
                match line.innings().get(inning) {
                    Some(runs) => write!(f, "{:>3}", runs)?,
                    None => write!(f, "{:>3}", "X")?,
                }
            }
            writeln!(f, "{:>5}{:>3}{:>3}", line.runs(), line.hits(), line.errors())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    TopHalf,
    BottomHalf,
}

/// A game in progress. Finished games only exist as a [`GameSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    rules: GameRules,
    current_inning: InningNumber,
    score: GameScore,
    current_half_inning: HalfInning,
    away_next_batter: BattingPosition,
    home_next_batter: BattingPosition,
    pitches: u32,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rules(GameRules::default())
    }

    pub fn with_rules(rules: GameRules) -> Self {
        Self::setup(rules, BattingPosition::First, BattingPosition::First)
    }

    pub fn with_batting_orders(away_order: BattingPosition, home_order: BattingPosition) -> Self {
        Self::setup(GameRules::default(), away_order, home_order)
    }

    pub fn setup(
        rules: GameRules,
        away_leadoff: BattingPosition,
        home_leadoff: BattingPosition,
    ) -> Self {
        Game {
            rules,
            current_inning: InningNumber::First,
            score: GameScore::new(),
            current_half_inning: HalfInning::new(InningHalf::Top, away_leadoff),
            away_next_batter: away_leadoff,
            home_next_batter: home_leadoff,
            pitches: 0,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn current_inning(&self) -> InningNumber {
        self.current_inning
    }

    pub fn state(&self) -> GameState {
        match self.current_half_inning.half() {
            InningHalf::Top => GameState::TopHalf,
            InningHalf::Bottom => GameState::BottomHalf,
        }
    }

    /// Score from completed half innings
    pub fn score(&self) -> &GameScore {
        &self.score
    }

    /// Away and home runs including the half inning being played
    pub fn live_score(&self) -> (Runs, Runs) {
        let in_progress = self.current_half_inning.runs_scored();
        match self.current_half_inning.half() {
            InningHalf::Top => (self.score.away() + in_progress, self.score.home()),
            InningHalf::Bottom => (self.score.away(), self.score.home() + in_progress),
        }
    }

    pub fn current_half_inning(&self) -> &HalfInning {
        &self.current_half_inning
    }

    /// Pitches thrown so far by both teams
    pub fn pitches(&self) -> u32 {
        self.pitches
    }

    pub fn advance(mut self, outcome: PitchOutcome) -> GameAdvance {
        self.pitches += 1;
        let advance = self.current_half_inning.advance(outcome);
        self.resolve(advance)
    }

    /// End the current plate appearance with a scorer-described play.
    pub fn record_play(self, play: PlayOutcome) -> GameAdvance {
        let advance = self.current_half_inning.record_play(play);
        self.resolve(advance)
    }

    fn resolve(mut self, advance: HalfInningAdvance) -> GameAdvance {
        match advance {
            HalfInningAdvance::InProgress(half_inning) => {
                self.current_half_inning = half_inning;
                if self.is_walk_off() {
                    self.score.credit(
                        InningHalf::Bottom,
                        half_inning.runs_scored(),
                        half_inning.hits(),
                        half_inning.errors(),
                    );
                    return GameAdvance::Complete(self.finish(GameWinner::Home, true));
                }
                GameAdvance::InProgress(self)
            }
            HalfInningAdvance::Complete(summary) => {
                self.score.credit_summary(&summary);
                match summary.half() {
                    InningHalf::Top => self.away_next_batter = summary.next_batter(),
                    InningHalf::Bottom => self.home_next_batter = summary.next_batter(),
                }

                if let Some(winner) = self.decided_winner(summary.half()) {
                    return GameAdvance::Complete(self.finish(winner, false));
                }

                GameAdvance::InProgress(self.start_next_half(summary.half()))
            }
        }
    }

    fn is_walk_off(&self) -> bool {
        self.current_half_inning.half() == InningHalf::Bottom
            && self.rules.can_end_after(self.current_inning)
            && self.score.home() + self.current_half_inning.runs_scored() > self.score.away()
    }

    /// Winner once `completed` has finished, if the game is over
    fn decided_winner(&self, completed: InningHalf) -> Option<GameWinner> {
        if !self.rules.can_end_after(self.current_inning) {
            return None;
        }

        match completed {
            // Home team leading after the top half doesn't need to bat
            InningHalf::Top => (self.score.home() > self.score.away()).then_some(GameWinner::Home),
            InningHalf::Bottom => self.score.winner(),
        }
    }

    fn finish(self, winner: GameWinner, walk_off: bool) -> GameSummary {
        GameSummary {
            final_score: self.score,
            innings_played: self.current_inning,
            winner,
            walk_off,
            pitches: self.pitches,
        }
    }

    fn start_next_half(mut self, completed: InningHalf) -> Self {
        self.current_half_inning = match completed {
            InningHalf::Top => HalfInning::new(InningHalf::Bottom, self.home_next_batter),
            InningHalf::Bottom => {
                self.current_inning = self.current_inning.next();
                HalfInning::new(InningHalf::Top, self.away_next_batter)
            }
        };
        self
    }

    pub fn inning_description(&self) -> String {
        format!(
            "{} of the {}",
            self.current_half_inning.half(),
            self.current_inning
        )
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = &self.current_half_inning;
        let (away, home) = self.live_score();
        write!(
            f,
            "{}, {}, {} count, {}, batter {} | Away {} - Home {}",
            self.inning_description(),
            half.outs(),
            half.current_plate_appearance().count(),
            half.baserunners(),
            half.current_batter(),
            away,
            home
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAdvance {
    InProgress(Game),
    Complete(GameSummary),
}

impl GameAdvance {
    pub fn is_complete(&self) -> bool {
        matches!(self, GameAdvance::Complete(_))
    }

    pub fn game(self) -> Option<Game> {
        match self {
            GameAdvance::InProgress(game) => Some(game),
            GameAdvance::Complete(_) => None,
        }
    }

    pub fn summary(self) -> Option<GameSummary> {
        match self {
            GameAdvance::InProgress(_) => None,
            GameAdvance::Complete(summary) => Some(summary),
        }
    }
}
