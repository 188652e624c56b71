//! Core frame types: rolls and the ten per-player frames.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Pins standing in a full rack.
pub const PINS: u8 = 10;

/// Frames per player in one game.
pub const FRAMES_PER_GAME: usize = 10;

/// Index of the tenth frame.
pub const LAST_FRAME: usize = FRAMES_PER_GAME - 1;

/// One thrown ball.
///
/// Immutable once recorded. The pin count is range-checked by the roll
/// validator before a roll is ever constructed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roll {
    pins_knocked: u8,
}

impl Roll {
    /// Creates a roll.
    pub fn new(pins_knocked: u8) -> Self {
        Self { pins_knocked }
    }

    /// Returns the number of pins knocked down.
    pub fn pins(&self) -> u8 {
        self.pins_knocked
    }
}

/// One of ten turns for one player.
///
/// `is_strike` and `is_spare` are derived from `rolls` and only ever
/// updated through [`Frame::push_roll`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub(crate) rolls: Vec<Roll>,
    pub(crate) is_strike: bool,
    pub(crate) is_spare: bool,
    pub(crate) score: u16,
    pub(crate) cumulative_score: u16,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from pin counts with flags derived and scores left at zero.
    pub fn from_pins(pins: &[u8]) -> Self {
        let mut frame = Self::new();
        for &p in pins {
            frame.push_roll(Roll::new(p));
        }
        frame
    }

    /// Returns the recorded rolls.
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    /// Returns the pin count of roll `n` if it has been thrown.
    pub fn pins_at(&self, n: usize) -> Option<u8> {
        self.rolls.get(n).map(Roll::pins)
    }

    /// Returns true if the first roll knocked down every pin.
    pub fn is_strike(&self) -> bool {
        self.is_strike
    }

    /// Returns true if the first two rolls (and not the first alone) cleared the rack.
    pub fn is_spare(&self) -> bool {
        self.is_spare
    }

    /// Returns true if the frame is neither strike nor spare.
    pub fn is_open(&self) -> bool {
        !self.is_strike && !self.is_spare
    }

    /// Frame score, bonus included once resolvable.
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Running total through this frame.
    pub fn cumulative_score(&self) -> u16 {
        self.cumulative_score
    }

    /// Returns true if no ball has been thrown in this frame.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Sum of this frame's own pin counts, saturating at `u16::MAX`.
    pub fn pin_total(&self) -> u16 {
        self.rolls
            .iter()
            .fold(0u16, |total, r| total.saturating_add(u16::from(r.pins())))
    }

    /// Appends a roll and recomputes the strike/spare flags.
    #[instrument(skip(self), fields(rolls = self.rolls.len()))]
    pub(crate) fn push_roll(&mut self, roll: Roll) {
        self.rolls.push(roll);
        let (is_strike, is_spare) = derive_flags(&self.rolls);
        self.is_strike = is_strike;
        self.is_spare = is_spare;
    }

    /// Returns true when this frame takes no more rolls.
    ///
    /// `index` is the frame's position (0-9); the tenth frame allows a
    /// bonus roll after a strike or spare.
    pub fn is_finished(&self, index: usize) -> bool {
        if index == LAST_FRAME {
            let needed = if self.is_strike || self.is_spare { 3 } else { 2 };
            self.rolls.len() >= needed
        } else {
            self.is_strike || self.rolls.len() >= 2
        }
    }
}

/// Computes `(is_strike, is_spare)` from roll values alone.
pub fn derive_flags(rolls: &[Roll]) -> (bool, bool) {
    let first = rolls.first().map(Roll::pins);
    let second = rolls.get(1).map(Roll::pins);
    let is_strike = first == Some(PINS);
    let is_spare = match (first, second) {
        (Some(a), Some(b)) => !is_strike && u16::from(a) + u16::from(b) == u16::from(PINS),
        _ => false,
    };
    (is_strike, is_spare)
}

/// Ten empty frames.
pub fn empty_frames() -> Vec<Frame> {
    vec![Frame::new(); FRAMES_PER_GAME]
}
