//! Roll validation for ten-pin bowling.
//!
//! Pure decision functions: given a game snapshot and a proposed pin
//! count, decide whether the roll is legal. Nothing here mutates state.

use crate::error::RollRejection;
use crate::frame::{Frame, LAST_FRAME, PINS};
use crate::game::Game;
use tracing::{debug, instrument, warn};

/// Pins available for the next ball in the active frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rack {
    /// Fresh rack of ten.
    Full,
    /// Second ball at the pins left by `first`.
    Second { first: u8 },
    /// Tenth-frame bonus ball after a strike and a non-strike `second`.
    Bonus { second: u8 },
}

impl Rack {
    fn standing(self) -> u8 {
        match self {
            Rack::Full => PINS,
            Rack::Second { first } => PINS.saturating_sub(first),
            Rack::Bonus { second } => PINS.saturating_sub(second),
        }
    }

    fn exceeded(self, pins: u8) -> RollRejection {
        match self {
            Rack::Bonus { second } => RollRejection::BonusPinsExceeded {
                second,
                third: pins,
            },
            Rack::Second { first } => RollRejection::FramePinsExceeded {
                first,
                second: pins,
            },
            // A full rack accepts every in-range count.
            Rack::Full => RollRejection::PinsOutOfRange(pins),
        }
    }
}

/// Works out which rack the next ball faces in `frame` at `index`.
fn rack_for(frame: &Frame, index: usize) -> Result<Rack, RollRejection> {
    let rolls = frame.rolls();
    match (rolls.len(), index == LAST_FRAME) {
        (0, _) => Ok(Rack::Full),
        (1, false) => Ok(Rack::Second {
            first: rolls[0].pins(),
        }),
        (1, true) => {
            let first = rolls[0].pins();
            if first == PINS {
                Ok(Rack::Full)
            } else {
                Ok(Rack::Second { first })
            }
        }
        (2, false) => Err(RollRejection::NoThirdRollInRegularFrame),
        (2, true) => {
            let first = rolls[0].pins();
            let second = rolls[1].pins();
            if first == PINS {
                if second == PINS {
                    Ok(Rack::Full)
                } else {
                    Ok(Rack::Bonus { second })
                }
            } else if u16::from(first) + u16::from(second) == u16::from(PINS) {
                Ok(Rack::Full)
            } else {
                Err(RollRejection::ThirdRollNotEarned)
            }
        }
        _ => Err(RollRejection::FrameComplete),
    }
}

/// Decides whether `pins` is a legal next roll for `game`.
///
/// Checks run in order: game completion, pin range, then the rules for
/// the active frame (including the tenth-frame bonus cases).
///
/// # Errors
///
/// Returns the [`RollRejection`] describing the first rule broken.
#[instrument(skip(game), fields(player = game.current_player(), frame = game.current_frame()))]
pub fn validate_roll(game: &Game, pins: u8) -> Result<(), RollRejection> {
    if game.is_complete() {
        warn!("Roll proposed for a completed game");
        return Err(RollRejection::GameComplete);
    }
    if pins > PINS {
        warn!(pins, "Pin count out of range");
        return Err(RollRejection::PinsOutOfRange(pins));
    }

    let frame = game.active_frame().ok_or(RollRejection::NoActiveFrame {
        player: game.current_player(),
        frame: game.current_frame(),
    })?;
    let rack = rack_for(frame, game.current_frame())?;

    if pins > rack.standing() {
        let rejection = rack.exceeded(pins);
        warn!(%rejection, "Roll rejected");
        return Err(rejection);
    }

    debug!(pins, standing = rack.standing(), "Roll accepted");
    Ok(())
}

/// Returns the largest pin count [`validate_roll`] would currently accept.
///
/// `None` means no roll at all is acceptable (complete game or exhausted
/// frame). Every count from zero up to the returned value is legal.
#[instrument(skip(game))]
pub fn remaining_pins(game: &Game) -> Option<u8> {
    if game.is_complete() {
        return None;
    }
    let frame = game.active_frame()?;
    rack_for(frame, game.current_frame())
        .ok()
        .map(Rack::standing)
}
