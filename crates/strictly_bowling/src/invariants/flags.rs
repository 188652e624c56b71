//! Flag consistency invariant: strike/spare flags match the recorded balls.

use super::{Invariant, frame_label};
use crate::frame::derive_flags;
use crate::game::Game;

/// Invariant: `is_strike` and `is_spare` equal what the rolls say.
///
/// Flag drift is always reported, never repaired.
pub struct FlagConsistencyInvariant;

impl Invariant<Game> for FlagConsistencyInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        for (p, frames) in game.frames().iter().enumerate() {
            for (i, frame) in frames.iter().enumerate() {
                let (strike, spare) = derive_flags(frame.rolls());
                if frame.is_strike() != strike {
                    errors.push(format!(
                        "{}: strike flag is {} but rolls say {}",
                        frame_label(p, i),
                        frame.is_strike(),
                        strike
                    ));
                }
                if frame.is_spare() != spare {
                    errors.push(format!(
                        "{}: spare flag is {} but rolls say {}",
                        frame_label(p, i),
                        frame.is_spare(),
                        spare
                    ));
                }
            }
        }
        errors
    }

    fn description() -> &'static str {
        "Strike and spare flags match the recorded rolls"
    }
}
