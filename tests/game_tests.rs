//! Game engine tests through the public library API

use baseball_sim::baseball::{
    BaserunnerState, BattingPosition, Game, GameAdvance, GameRules, GameState, GameWinner,
    PitchOutcome, PlayOutcome,
};
use baseball_sim::pitch_log::{self, ReplayOutcome};

/// Feed text pitch tokens into a game, stopping when it ends
fn play(game: Game, pitches: &str) -> GameAdvance {
    let mut advance = GameAdvance::InProgress(game);
    for pitch in pitch_log::parse_pitch_log(pitches).unwrap() {
        advance = match advance {
            GameAdvance::InProgress(game) => game.advance(pitch),
            GameAdvance::Complete(_) => panic!("pitch {pitch} thrown after the game ended"),
        };
    }
    advance
}

fn in_progress(advance: GameAdvance) -> Game {
    advance.game().expect("game should still be in progress")
}

#[test]
fn test_tied_game_goes_to_extras() {
    let game = in_progress(play(Game::with_rules(GameRules::new(1)), "x x x  x x x"));
    assert_eq!(game.current_inning().as_number(), 2);
    assert_eq!(game.state(), GameState::TopHalf);

    let summary = play(game, "hr x x x  x x x").summary().unwrap();
    assert_eq!(summary.winner(), GameWinner::Away);
    assert_eq!(summary.innings_played().as_number(), 2);
    assert!(!summary.is_walk_off());
    assert_eq!(summary.final_score().away(), 1);
    assert_eq!(summary.final_score().home(), 0);
}

#[test]
fn test_home_lead_skips_last_bottom_half() {
    let summary = play(Game::with_rules(GameRules::new(2)), "x x x  hr x x x  x x x")
        .summary()
        .unwrap();

    assert_eq!(summary.winner(), GameWinner::Home);
    assert_eq!(summary.headline(), "Home wins 1-0 in 2 innings");
    assert_eq!(summary.final_score().away_line().innings(), &[0, 0]);
    assert_eq!(summary.final_score().home_line().innings(), &[1]);

    // Unplayed bottom half shows as X in the line score
    let line_score = summary.to_string();
    assert!(line_score.lines().nth(2).unwrap().contains('X'));
}

#[test]
fn test_walk_off_ends_on_winning_run() {
    let summary = play(Game::with_rules(GameRules::new(1)), "x x x  1b 3b")
        .summary()
        .unwrap();

    assert!(summary.is_walk_off());
    assert_eq!(summary.final_score().home(), 1);
    assert_eq!(summary.final_score().home_line().hits(), 2);
    assert_eq!(summary.pitches(), 5);
}

#[test]
fn test_batting_order_carries_between_innings() {
    let game = in_progress(play(Game::new(), "x x x  x x x  x x"));
    assert_eq!(game.current_inning().as_number(), 2);
    assert_eq!(
        game.current_half_inning().current_batter(),
        BattingPosition::from_number(6).unwrap()
    );

    let game = in_progress(play(game, "x  x x"));
    assert_eq!(game.state(), GameState::BottomHalf);
    assert_eq!(
        game.current_half_inning().current_batter(),
        BattingPosition::from_number(6).unwrap()
    );
}

#[test]
fn test_record_play_outside_pitch_stream() {
    let game = Game::new();
    let out = PlayOutcome::batter_out(BaserunnerState::new());

    let game = in_progress(game.record_play(out));
    assert_eq!(game.current_half_inning().outs().as_number(), 1);
    assert_eq!(game.pitches(), 0);
    assert_eq!(
        game.current_half_inning().current_batter(),
        BattingPosition::from_number(2).unwrap()
    );
}

#[test]
fn test_nine_inning_log_replays_to_walk_off() {
    let log = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/walk_off.txt"),
    )
    .unwrap();
    let pitches = pitch_log::parse_pitch_log(&log).unwrap();

    match pitch_log::replay(Game::new(), &pitches).unwrap() {
        ReplayOutcome::Finished(summary) => {
            assert_eq!(summary.headline(), "Home wins 3-2 in 9 innings (walk-off)");
            assert_eq!(summary.final_score().away_line().hits(), 3);
            assert_eq!(summary.final_score().home_line().hits(), 2);
            assert_eq!(summary.final_score().away_line().innings()[1], 2);
            assert_eq!(summary.pitches(), pitches.len() as u32);
        }
        ReplayOutcome::Suspended(game) => panic!("game should be over: {game}"),
    }
}

#[test]
fn test_hit_by_pitch_forces_runner() {
    let game = in_progress(play(Game::new(), "1b"));
    let game = in_progress(game.advance(PitchOutcome::HitByPitch));
    let runners = game.current_half_inning().baserunners();
    assert_eq!(runners.runner_count(), 2);
    assert_eq!(runners.to_string(), "runners on 1st and 2nd");
}
