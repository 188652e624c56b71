//! Contract-based validation for roll transitions.
//!
//! Contracts formalize Hoare-style reasoning: {P} roll {Q}. The
//! precondition is the roll validator; the postcondition re-checks the
//! whole invariant set on the new snapshot.

use crate::error::BowlingError;
use crate::game::Game;
use crate::invariants::{BowlingInvariants, InvariantSet};
use crate::rules::validate_roll;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), BowlingError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), BowlingError>;
}

/// Total balls recorded across all players.
fn ball_count(game: &Game) -> usize {
    game.frames()
        .iter()
        .flatten()
        .map(|f| f.rolls().len())
        .sum()
}

/// Contract for a single roll.
///
/// Preconditions:
/// - The roll validator accepts the pin count
///
/// Postconditions:
/// - Exactly one ball was added
/// - Every game invariant holds
pub struct RollContract;

impl Contract<Game, u8> for RollContract {
    #[instrument(skip(game))]
    fn pre(game: &Game, pins: &u8) -> Result<(), BowlingError> {
        validate_roll(game, *pins).map_err(BowlingError::from)
    }

    #[instrument(skip(before, after))]
    fn post(before: &Game, after: &Game) -> Result<(), BowlingError> {
        let mut details = Vec::new();

        let (was, now) = (ball_count(before), ball_count(after));
        if now != was + 1 {
            details.push(format!("Expected {} balls after roll, found {}", was + 1, now));
        }

        if let Err(violations) = BowlingInvariants::check_all(after) {
            details.extend(violations.into_iter().map(|v| v.to_string()));
        }

        if details.is_empty() {
            Ok(())
        } else {
            warn!(violations = details.len(), "Roll postcondition failed");
            Err(BowlingError::corruption("Postcondition failed", details))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::game::{apply_roll, create_new_game};
    use crate::player::Player;

    fn game() -> Game {
        create_new_game(vec![Player::new("1", "Alice")]).unwrap()
    }

    #[test]
    fn test_precondition_accepts_legal_roll() {
        assert!(RollContract::pre(&game(), &7).is_ok());
    }

    #[test]
    fn test_precondition_rejects_out_of_range() {
        let err = RollContract::pre(&game(), &11).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RollRejected);
    }

    #[test]
    fn test_postcondition_holds_after_roll() {
        let before = game();
        let after = apply_roll(&before, 7);
        assert!(RollContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_ball() {
        let before = game();
        assert!(RollContract::post(&before, &before.clone()).is_err());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = game();
        let mut after = apply_roll(&before, 7);
        after.frames[0][0].is_spare = true;

        let err = RollContract::post(&before, &after).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateCorruption);
        assert!(err.details().iter().any(|d| d.contains("spare")));
    }
}
