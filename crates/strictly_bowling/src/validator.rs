//! Whole-game consistency checking.

use crate::error::BowlingError;
use crate::game::Game;
use crate::invariants::{BowlingInvariants, InvariantSet};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Outcome of [`validate_game_state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameValidation {
    /// True when no problems were found.
    pub valid: bool,
    /// One line per problem, in check order.
    pub errors: Vec<String>,
}

impl GameValidation {
    /// Converts a failed validation into a [`BowlingError::StateCorruption`].
    ///
    /// # Errors
    ///
    /// Returns the corruption error carrying every problem as a detail line.
    pub fn into_result(self) -> Result<(), BowlingError> {
        if self.valid {
            Ok(())
        } else {
            Err(BowlingError::corruption(
                "Game state failed validation",
                self.errors,
            ))
        }
    }
}

/// Cross-checks a game snapshot against every invariant.
///
/// Purely diagnostic: the game is never modified or repaired.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn validate_game_state(game: &Game) -> GameValidation {
    match BowlingInvariants::check_all(game) {
        Ok(()) => GameValidation {
            valid: true,
            errors: Vec::new(),
        },
        Err(violations) => {
            warn!(count = violations.len(), "Game state is inconsistent");
            GameValidation {
                valid: false,
                errors: violations.into_iter().map(|v| v.detail).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::player::Player;

    #[test]
    fn test_valid_game() {
        let game = Game::replay(vec![Player::new("1", "Alice")], &[10, 9, 1, 0]).unwrap();
        let result = validate_game_state(&game);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_invalid_game_reports_every_problem() {
        let mut game = Game::replay(vec![Player::new("1", "Alice")], &[10, 9, 1, 0]).unwrap();
        game.frames[0][1].is_spare = false;
        game.frames[0][0].cumulative_score = 1;

        let result = validate_game_state(&game);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);

        let err = result.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateCorruption);
        assert_eq!(err.details().len(), 2);
    }
}
