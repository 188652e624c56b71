//! Completion invariant: the complete flag and final scores agree with the frames.

use super::Invariant;
use crate::frame::{Frame, LAST_FRAME};
use crate::game::{Game, all_finished};

/// Invariant: `is_complete` is set exactly when every tenth frame is
/// finished, and final scores exist only then, one per player, equal to
/// each player's tenth-frame cumulative score.
pub struct CompletionInvariant;

impl Invariant<Game> for CompletionInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        let finished = all_finished(game.frames());

        if game.is_complete() != finished {
            errors.push(format!(
                "Game is marked {} but tenth frames are {}",
                if game.is_complete() { "complete" } else { "in progress" },
                if finished { "all finished" } else { "not all finished" }
            ));
        }

        if !game.is_complete() {
            if !game.scores().is_empty() {
                errors.push("Final scores recorded before the game is complete".to_string());
            }
            return errors;
        }

        if game.scores().len() != game.players().len() {
            errors.push(format!(
                "Game has {} final scores for {} players",
                game.scores().len(),
                game.players().len()
            ));
        }
        for (p, (score, frames)) in game.scores().iter().zip(game.frames()).enumerate() {
            let expected = frames.get(LAST_FRAME).map_or(0, Frame::cumulative_score);
            if *score != expected {
                errors.push(format!(
                    "Player {}: final score {} does not match tenth-frame total {}",
                    p + 1,
                    score,
                    expected
                ));
            }
        }
        errors
    }

    fn description() -> &'static str {
        "Completion flag and final scores agree with the frames"
    }
}
