//! Basic per-game counts for each player.

use crate::frame::{Frame, LAST_FRAME, PINS};
use crate::game::Game;
use crate::scoring::running_total;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Counts for one player in one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGameStats {
    /// Balls that knocked down a full rack on the first attempt.
    strikes: u32,
    /// Racks cleared with the second ball.
    spares: u32,
    /// Finished frames that were neither strike nor spare.
    open_frames: u32,
    /// Balls that knocked down nothing.
    gutter_balls: u32,
    /// Total pins knocked down.
    pinfall: u32,
    /// Highest resolved cumulative score.
    total_score: u16,
}

/// Counts strikes and spares in the tenth frame, where the rack resets.
fn tenth_frame_marks(frame: &Frame) -> (u32, u32) {
    let mut strikes = 0;
    let mut spares = 0;
    let mut first_at_rack: Option<u8> = None;

    for roll in frame.rolls() {
        let pins = roll.pins();
        match first_at_rack {
            None if pins == PINS => strikes += 1,
            None => first_at_rack = Some(pins),
            Some(first) => {
                if u16::from(first) + u16::from(pins) == u16::from(PINS) {
                    spares += 1;
                }
                first_at_rack = None;
            }
        }
    }
    (strikes, spares)
}

/// Computes counts for one player's frames.
pub fn player_stats(frames: &[Frame]) -> PlayerGameStats {
    let mut stats = PlayerGameStats::default();

    for (i, frame) in frames.iter().enumerate() {
        for roll in frame.rolls() {
            stats.pinfall = stats.pinfall.saturating_add(u32::from(roll.pins()));
            if roll.pins() == 0 {
                stats.gutter_balls += 1;
            }
        }

        if i == LAST_FRAME {
            let (strikes, spares) = tenth_frame_marks(frame);
            stats.strikes += strikes;
            stats.spares += spares;
        } else if frame.is_strike() {
            stats.strikes += 1;
        } else if frame.is_spare() {
            stats.spares += 1;
        }

        if frame.is_finished(i) && frame.is_open() {
            stats.open_frames += 1;
        }
    }

    stats.total_score = running_total(frames);
    stats
}

/// Computes counts for every player, in roster order.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn game_stats(game: &Game) -> Vec<PlayerGameStats> {
    game.frames().iter().map(|f| player_stats(f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn stats_for(pins: &[u8]) -> PlayerGameStats {
        let game = Game::replay(vec![Player::new("1", "Alice")], pins).unwrap();
        game_stats(&game).remove(0)
    }

    #[test]
    fn test_perfect_game_counts_twelve_strikes() {
        let stats = stats_for(&[10; 12]);
        assert_eq!(*stats.strikes(), 12);
        assert_eq!(*stats.spares(), 0);
        assert_eq!(*stats.total_score(), 300);
        assert_eq!(*stats.pinfall(), 120);
    }

    #[test]
    fn test_gutter_game() {
        let stats = stats_for(&[0; 20]);
        assert_eq!(*stats.gutter_balls(), 20);
        assert_eq!(*stats.open_frames(), 10);
        assert_eq!(*stats.total_score(), 0);
    }

    #[test]
    fn test_tenth_frame_marks() {
        assert_eq!(tenth_frame_marks(&Frame::from_pins(&[10, 3, 7])), (1, 1));
        assert_eq!(tenth_frame_marks(&Frame::from_pins(&[3, 7, 10])), (1, 1));
        assert_eq!(tenth_frame_marks(&Frame::from_pins(&[10, 10, 4])), (2, 0));
        assert_eq!(tenth_frame_marks(&Frame::from_pins(&[0, 10, 0])), (0, 1));
        assert_eq!(tenth_frame_marks(&Frame::from_pins(&[4, 5])), (0, 0));
    }

    #[test]
    fn test_mixed_frames() {
        let stats = stats_for(&[7, 3, 10, 5, 2]);
        assert_eq!(*stats.strikes(), 1);
        assert_eq!(*stats.spares(), 1);
        assert_eq!(*stats.open_frames(), 1);
        assert_eq!(*stats.total_score(), 44);
    }
}
