//! Structure invariant: roster, frame grid and turn pointers have the right shape.

use super::Invariant;
use crate::frame::{FRAMES_PER_GAME, LAST_FRAME};
use crate::game::Game;

/// Invariant: one ten-frame row per player, pointers in range.
///
/// Frames are never sparse; unplayed frames are present and empty.
pub struct StructureInvariant;

impl Invariant<Game> for StructureInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        let players = game.players().len();

        if players == 0 {
            errors.push("Game has no players".to_string());
        }
        if game.frames().len() != players {
            errors.push(format!(
                "Game has {} frame rows for {} players",
                game.frames().len(),
                players
            ));
        }
        for (p, frames) in game.frames().iter().enumerate() {
            if frames.len() != FRAMES_PER_GAME {
                errors.push(format!(
                    "Player {} has {} frames (expected {})",
                    p + 1,
                    frames.len(),
                    FRAMES_PER_GAME
                ));
            }
        }
        if players > 0 && game.current_player() >= players {
            errors.push(format!(
                "Current player index {} is out of range (0-{})",
                game.current_player(),
                players - 1
            ));
        }
        if game.current_frame() > LAST_FRAME {
            errors.push(format!(
                "Current frame index {} is out of range (0-{})",
                game.current_frame(),
                LAST_FRAME
            ));
        }
        errors
    }

    fn description() -> &'static str {
        "One row of ten frames per player and turn pointers in range"
    }
}
