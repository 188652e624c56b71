//! Frame and cumulative score calculation.
//!
//! Scores are always recomputed from scratch over a player's whole frame
//! array. Strike and spare bonuses reach into later frames, so an earlier
//! frame's score can change whenever a new ball is recorded.

use crate::frame::{Frame, LAST_FRAME, PINS};
use tracing::instrument;

/// Pin counts of every ball thrown after frame `index`, in play order.
fn rolls_after(frames: &[Frame], index: usize) -> impl Iterator<Item = u16> + '_ {
    frames
        .iter()
        .skip(index + 1)
        .flat_map(|f| f.rolls().iter().map(|r| u16::from(r.pins())))
}

/// Resolved score of frame `index`, or `None` while it still waits on
/// bonus balls (or has not been played).
///
/// The tenth frame scores its own balls only. Open frames score the balls
/// thrown so far.
pub fn frame_score(frames: &[Frame], index: usize) -> Option<u16> {
    let frame = frames.get(index)?;
    if frame.is_empty() {
        return None;
    }
    if index >= LAST_FRAME {
        return Some(frame.pin_total());
    }

    let bonus_balls = if frame.is_strike() {
        2
    } else if frame.is_spare() {
        1
    } else {
        return Some(frame.pin_total());
    };

    let bonus: Vec<u16> = rolls_after(frames, index).take(bonus_balls).collect();
    if bonus.len() < bonus_balls {
        return None;
    }
    Some(bonus.iter().fold(u16::from(PINS), |total, b| total.saturating_add(*b)))
}

/// Returns a copy of `frames` with `score` and `cumulative_score` filled in.
///
/// Frames that cannot be resolved yet keep a score of zero. The running
/// total only advances through resolved frames in play order; once a
/// frame is unresolved, every later cumulative score stays zero until a
/// later call can resolve it.
#[instrument(skip(frames), fields(frames = frames.len()))]
pub fn calculate_game_score(frames: &[Frame]) -> Vec<Frame> {
    let mut scored = frames.to_vec();
    let mut running: Option<u16> = Some(0);

    for (index, frame) in scored.iter_mut().enumerate() {
        let score = frame_score(frames, index);
        frame.score = score.unwrap_or(0);
        running = match (running, score) {
            (Some(total), Some(s)) => Some(total.saturating_add(s)),
            _ => None,
        };
        frame.cumulative_score = running.unwrap_or(0);
    }

    scored
}

/// Returns true once frame `index` shows a final, non-provisional score.
///
/// A strike needs its two bonus balls (looking through consecutive
/// strikes), a spare its one bonus ball, an open frame both of its balls,
/// and the tenth frame all the balls it is owed.
pub fn can_display_score(frames: &[Frame], index: usize) -> bool {
    let Some(frame) = frames.get(index) else {
        return false;
    };
    if !frame.is_finished(index) {
        return false;
    }
    frame_score(frames, index).is_some()
}

/// Highest cumulative score reached so far.
pub fn running_total(frames: &[Frame]) -> u16 {
    frames
        .iter()
        .map(Frame::cumulative_score)
        .max()
        .unwrap_or(0)
}
