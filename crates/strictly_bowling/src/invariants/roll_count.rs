//! Roll count invariant: no frame holds more balls than the rules allow.

use super::{Invariant, frame_label};
use crate::frame::{LAST_FRAME, PINS};
use crate::game::Game;

/// Invariant: frames 1-9 hold at most two balls (one after a strike);
/// the tenth holds at most three, the third only after a strike or spare.
pub struct RollCountInvariant;

impl Invariant<Game> for RollCountInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        for (p, frames) in game.frames().iter().enumerate() {
            for (i, frame) in frames.iter().enumerate() {
                let count = frame.rolls().len();
                let strike = frame.pins_at(0) == Some(PINS);
                if i == LAST_FRAME {
                    let earned = strike
                        || matches!(
                            (frame.pins_at(0), frame.pins_at(1)),
                            (Some(a), Some(b)) if u16::from(a) + u16::from(b) == u16::from(PINS)
                        );
                    if count > 3 {
                        errors.push(format!(
                            "{}: has {} rolls (max 3)",
                            frame_label(p, i),
                            count
                        ));
                    } else if count == 3 && !earned {
                        errors.push(format!(
                            "{}: third roll without a strike or spare",
                            frame_label(p, i)
                        ));
                    }
                } else if count > 2 {
                    errors.push(format!(
                        "{}: has {} rolls (max 2)",
                        frame_label(p, i),
                        count
                    ));
                } else if strike && count > 1 {
                    errors.push(format!(
                        "{}: strike frame has a second roll",
                        frame_label(p, i)
                    ));
                }
            }
        }
        errors
    }

    fn description() -> &'static str {
        "Roll counts per frame stay within the rules"
    }
}
