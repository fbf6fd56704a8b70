//! Pitch logs
//!
//! A pitch log is a recorded sequence of pitch outcomes that can be replayed
//! against a fresh [`Game`]. Two formats are accepted:
//! - Text: tokens separated by whitespace or commas, `#` starts a comment
//! - JSON (`.json` extension): an array of serialized [`PitchOutcome`]s

use std::path::Path;

use tracing::{debug, info};

use crate::baseball::{Game, GameAdvance, GameSummary, PitchOutcome};
use crate::error::{Error, Result};

/// Where a replay left the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The log ended the game on its last pitch
    Finished(GameSummary),
    /// The log ran out while the game was still going
    Suspended(Game),
}

/// Pitch tokens on one line of text, ignoring anything after `#`.
pub fn line_tokens(line: &str) -> impl Iterator<Item = &str> {
    let content = match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    };
    content
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

/// Parse the text pitch log format.
pub fn parse_pitch_log(text: &str) -> Result<Vec<PitchOutcome>> {
    let mut pitches = Vec::new();

    for (index, line) in text.lines().enumerate() {
        for token in line_tokens(line) {
            let pitch = token.parse().map_err(|_| Error::PitchLogParse {
                line: index + 1,
                token: token.to_string(),
            })?;
            pitches.push(pitch);
        }
    }

    Ok(pitches)
}

/// Load a pitch log from disk, picking the format from the file extension.
pub fn load_pitch_log(path: &Path) -> Result<Vec<PitchOutcome>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let pitches = if is_json {
        serde_json::from_str(&content).map_err(|e| Error::PitchLogFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_pitch_log(&content)?
    };

    info!(path = %path.display(), pitches = pitches.len(), "Loaded pitch log");
    Ok(pitches)
}

/// Feed `pitches` into `game` in order.
///
/// Every pitch must be used: a log that keeps going after the final out is
/// rejected rather than silently truncated.
pub fn replay(game: Game, pitches: &[PitchOutcome]) -> Result<ReplayOutcome> {
    let mut game = game;

    for (index, pitch) in pitches.iter().enumerate() {
        match game.advance(*pitch) {
            GameAdvance::InProgress(next) => game = next,
            GameAdvance::Complete(summary) => {
                let remaining = pitches.len() - index - 1;
                if remaining > 0 {
                    return Err(Error::TrailingPitches { remaining });
                }
                debug!(pitches = summary.pitches(), "Replay finished the game");
                return Ok(ReplayOutcome::Finished(summary));
            }
        }
    }

    debug!(situation = %game, "Replay ended mid-game");
    Ok(ReplayOutcome::Suspended(game))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseball::{BallInPlay, GameRules, GameWinner};
    use std::io::Write;

    #[test]
    fn test_parse_tokens_and_comments() {
        let text = "b, s f  # full-ish count\n\n1b hr\n# nothing here\nx";
        let pitches = parse_pitch_log(text).unwrap();
        assert_eq!(
            pitches,
            vec![
                PitchOutcome::Ball,
                PitchOutcome::Strike,
                PitchOutcome::Foul,
                PitchOutcome::InPlay(BallInPlay::Single),
                PitchOutcome::InPlay(BallInPlay::HomeRun),
                PitchOutcome::InPlay(BallInPlay::Out),
            ]
        );
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_pitch_log("b s\nf slider\n").unwrap_err();
        match err {
            Error::PitchLogParse { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "slider");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_line_tokens() {
        let tokens: Vec<_> = line_tokens("b,,s  hr # x x").collect();
        assert_eq!(tokens, vec!["b", "s", "hr"]);
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_pitch_log("# just a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_text_log() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "b b b b").unwrap();
        let pitches = load_pitch_log(file.path()).unwrap();
        assert_eq!(pitches, vec![PitchOutcome::Ball; 4]);
    }

    #[test]
    fn test_load_json_log() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"["ball", "strike", {{"in_play": "double"}}]"#).unwrap();
        let pitches = load_pitch_log(file.path()).unwrap();
        assert_eq!(
            pitches,
            vec![
                PitchOutcome::Ball,
                PitchOutcome::Strike,
                PitchOutcome::InPlay(BallInPlay::Double),
            ]
        );
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"pitches": 3}}"#).unwrap();
        let err = load_pitch_log(file.path()).unwrap_err();
        assert!(matches!(err, Error::PitchLogFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_pitch_log(Path::new("/nonexistent/pitches.txt")).unwrap_err();
        assert!(matches!(err, Error::IoRead { .. }));
    }

    #[test]
    fn test_replay_suspended() {
        let pitches = parse_pitch_log("1b b").unwrap();
        match replay(Game::new(), &pitches).unwrap() {
            ReplayOutcome::Suspended(game) => {
                assert_eq!(game.pitches(), 2);
                assert_eq!(game.current_half_inning().baserunners().runner_count(), 1);
            }
            ReplayOutcome::Finished(_) => panic!("game should still be going"),
        }
    }

    #[test]
    fn test_replay_finished() {
        // One-inning game: away goes down in order, home walks it off
        let pitches = parse_pitch_log("x x x hr").unwrap();
        match replay(Game::with_rules(GameRules::new(1)), &pitches).unwrap() {
            ReplayOutcome::Finished(summary) => {
                assert_eq!(summary.winner(), GameWinner::Home);
                assert!(summary.is_walk_off());
            }
            ReplayOutcome::Suspended(_) => panic!("game should be over"),
        }
    }

    #[test]
    fn test_replay_trailing_pitches() {
        let pitches = parse_pitch_log("x x x hr b s").unwrap();
        let err = replay(Game::with_rules(GameRules::new(1)), &pitches).unwrap_err();
        assert!(matches!(err, Error::TrailingPitches { remaining: 2 }));
    }
}
