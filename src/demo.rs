//! Guided walk-throughs of the state machines

use std::io::Write;

use crate::baseball::{
    BallInPlay, BattingPosition, HalfInning, HalfInningAdvance, InningHalf, PitchOutcome,
    PlateAppearance, PlateAppearanceAdvance,
};
use crate::error::Result;

const RULE_WIDTH: usize = 50;

/// Write all three walk-throughs to `out`.
pub fn run_demo<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Baseball state machine demo\n")?;

    writeln!(out, "Demo 1: Plate appearance")?;
    plate_appearance(out)?;
    writeln!(out, "\n{}\n", "=".repeat(RULE_WIDTH))?;

    writeln!(out, "Demo 2: Half inning")?;
    half_inning(out)?;
    writeln!(out, "\n{}\n", "=".repeat(RULE_WIDTH))?;

    writeln!(out, "Demo 3: Batting order")?;
    batting_order(out)?;

    Ok(())
}

/// A full-count walk, fouls included
fn plate_appearance<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Working a full count walk...")?;

    let pitches = [
        PitchOutcome::Ball,
        PitchOutcome::Strike,
        PitchOutcome::Ball,
        PitchOutcome::Strike,
        PitchOutcome::Ball,
        PitchOutcome::Foul,
        PitchOutcome::Foul,
        PitchOutcome::Ball,
    ];

    let mut pa = PlateAppearance::new();
    for (i, pitch) in pitches.iter().enumerate() {
        writeln!(out, "  Pitch {}: {}", i + 1, pitch)?;
        writeln!(out, "    Before: {}", pa.count())?;

        match pa.advance(*pitch) {
            PlateAppearanceAdvance::InProgress(next) => {
                pa = next;
                writeln!(out, "    After:  {}", pa.count())?;
            }
            result => {
                writeln!(out, "    Result: {:?}", result)?;
                break;
            }
        }
    }

    Ok(())
}

/// An out followed by a solo home run
fn half_inning<W: Write>(out: &mut W) -> Result<()> {
    let half_inning = HalfInning::new(InningHalf::Top, BattingPosition::First);
    writeln!(
        out,
        "Top half begins: {}, batter {}",
        half_inning.outs(),
        half_inning.current_batter()
    )?;

    let plays = [BallInPlay::Out, BallInPlay::HomeRun];
    let mut state = half_inning;
    for ball_in_play in plays {
        writeln!(out, "\n  Batter {} steps up...", state.current_batter())?;
        match state.advance(PitchOutcome::InPlay(ball_in_play)) {
            HalfInningAdvance::InProgress(next) => {
                state = next;
                writeln!(out, "    Result: {}", ball_in_play)?;
                writeln!(
                    out,
                    "    Now: {}, {} run(s), {}, next batter {}",
                    state.outs(),
                    state.runs_scored(),
                    state.baserunners(),
                    state.current_batter()
                )?;
            }
            HalfInningAdvance::Complete(summary) => {
                writeln!(out, "    Side retired, {} run(s)", summary.runs_scored())?;
                break;
            }
        }
    }

    Ok(())
}

/// Lineup slots and wrap-around from the bottom of the order
fn batting_order<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "  Leadoff hitter: {}", BattingPosition::First)?;
    writeln!(out, "  Cleanup hitter: {}", BattingPosition::Fourth)?;
    writeln!(out, "  Nine hole:      {}", BattingPosition::Ninth)?;

    writeln!(out, "\nOrder from the seventh slot:")?;
    let mut current = BattingPosition::Seventh;
    for i in 1..=5 {
        writeln!(out, "  Batter {}: {}", i, current)?;
        current = current.next();
    }

    Ok(())
}
