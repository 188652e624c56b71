//! Pin bound invariant: no rack yields more than ten pins.

use super::{Invariant, frame_label};
use crate::frame::{LAST_FRAME, PINS};
use crate::game::Game;

/// Invariant: every ball knocks 0-10 pins and no two balls at the same
/// rack exceed ten together.
///
/// In the tenth frame the rack resets after a strike or spare, so only
/// pairs thrown at the same rack are summed.
pub struct PinBoundInvariant;

fn over(a: u8, b: u8) -> bool {
    u16::from(a) + u16::from(b) > u16::from(PINS)
}

impl Invariant<Game> for PinBoundInvariant {
    fn violations(game: &Game) -> Vec<String> {
        let mut errors = Vec::new();
        for (p, frames) in game.frames().iter().enumerate() {
            for (i, frame) in frames.iter().enumerate() {
                let label = frame_label(p, i);
                for (n, roll) in frame.rolls().iter().enumerate() {
                    if roll.pins() > PINS {
                        errors.push(format!(
                            "{}: roll {} knocked {} pins (max {})",
                            label,
                            n + 1,
                            roll.pins(),
                            PINS
                        ));
                    }
                }

                let r: Vec<u8> = frame.rolls().iter().map(|r| r.pins()).collect();
                if let [a, b, ..] = r[..] {
                    if a < PINS && over(a, b) {
                        errors.push(format!(
                            "{}: first two rolls total {} pins",
                            label,
                            u16::from(a) + u16::from(b)
                        ));
                    }
                    if i == LAST_FRAME
                        && a == PINS
                        && b < PINS
                        && let Some(&c) = r.get(2)
                        && over(b, c)
                    {
                        errors.push(format!(
                            "{}: bonus rolls total {} pins",
                            label,
                            u16::from(b) + u16::from(c)
                        ));
                    }
                }
            }
        }
        errors
    }

    fn description() -> &'static str {
        "No rack yields more than ten pins"
    }
}
