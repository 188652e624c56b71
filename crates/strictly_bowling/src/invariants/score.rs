//! Score consistency invariant: stored scores match a fresh recomputation.

use super::{Invariant, frame_label};
use crate::frame::Frame;
use crate::game::Game;
use crate::scoring::calculate_game_score;

/// Invariant: every played frame's score and cumulative score equal what
/// the score calculator produces from the raw pin counts.
///
/// Flags are re-derived from the pins before scoring, so a drifted flag
/// cannot hide a wrong score. Unplayed frames are skipped.
pub struct ScoreConsistencyInvariant;

impl Invariant<Game> for ScoreConsistencyInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        for (p, frames) in game.frames().iter().enumerate() {
            let rebuilt: Vec<Frame> = frames
                .iter()
                .map(|f| {
                    let pins: Vec<u8> = f.rolls().iter().map(|r| r.pins()).collect();
                    Frame::from_pins(&pins)
                })
                .collect();
            let expected = calculate_game_score(&rebuilt);

            for (i, (actual, want)) in frames.iter().zip(&expected).enumerate() {
                if actual.is_empty() {
                    continue;
                }
                if actual.score() != want.score() {
                    errors.push(format!(
                        "{}: expected score {}, found {}",
                        frame_label(p, i),
                        want.score(),
                        actual.score()
                    ));
                }
                if actual.cumulative_score() != want.cumulative_score() {
                    errors.push(format!(
                        "{}: expected cumulative score {}, found {}",
                        frame_label(p, i),
                        want.cumulative_score(),
                        actual.cumulative_score()
                    ));
                }
            }
        }
        errors
    }

    fn description() -> &'static str {
        "Frame and cumulative scores match recomputation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn game() -> Game {
        Game::replay(vec![Player::new("1", "Alice")], &[7, 3, 10, 5, 2]).unwrap()
    }

    #[test]
    fn test_scored_game_holds() {
        assert!(ScoreConsistencyInvariant::holds(&game()));
    }

    #[test]
    fn test_tampered_score_names_frame_and_values() {
        let mut game = game();
        game.frames[0][1].score = 99;
        assert_eq!(
            ScoreConsistencyInvariant::violations(&game),
            ["Player 1 frame 2: expected score 17, found 99"]
        );
    }

    #[test]
    fn test_tampered_cumulative_detected() {
        let mut game = game();
        game.frames[0][2].cumulative_score = 40;
        assert_eq!(
            ScoreConsistencyInvariant::violations(&game),
            ["Player 1 frame 3: expected cumulative score 44, found 40"]
        );
    }

    #[test]
    fn test_empty_frames_skipped() {
        let mut game = game();
        game.frames[0][8].score = 5;
        assert!(ScoreConsistencyInvariant::holds(&game));
    }
}
