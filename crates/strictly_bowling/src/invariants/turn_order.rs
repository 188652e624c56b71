//! Turn order invariant: frames fill in play order and the pointers track it.

use super::{Invariant, frame_label};
use crate::frame::{FRAMES_PER_GAME, Frame};
use crate::game::Game;

/// Invariant: each frame is bowled in rotation (frame by frame, players
/// in roster order), nothing is bowled ahead of its turn, and an
/// unfinished game points at the first unfinished frame.
pub struct TurnOrderInvariant;

impl Invariant<Game> for TurnOrderInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let players = game.players().len();
        let well_formed = players > 0
            && game.frames().len() == players
            && game.frames().iter().all(|f| f.len() == FRAMES_PER_GAME);
        if !well_formed {
            // Shape problems are reported by the structure invariant.
            return Vec::new();
        }

        let mut errors = Vec::new();
        let mut next_turn: Option<(usize, usize)> = None;
        for i in 0..FRAMES_PER_GAME {
            for p in 0..players {
                let frame: &Frame = &game.frames()[p][i];
                match next_turn {
                    None if !frame.is_finished(i) => next_turn = Some((p, i)),
                    Some(_) if !frame.is_empty() => errors.push(format!(
                        "{}: has rolls before its turn",
                        frame_label(p, i)
                    )),
                    _ => {}
                }
            }
        }

        if let Some((p, i)) = next_turn
            && !game.is_complete()
            && (game.current_player(), game.current_frame()) != (p, i)
        {
            errors.push(format!(
                "Turn is at player {} frame {}, expected player {} frame {}",
                game.current_player() + 1,
                game.current_frame() + 1,
                p + 1,
                i + 1
            ));
        }
        errors
    }

    fn description() -> &'static str {
        "Frames are bowled in turn order"
    }
}
