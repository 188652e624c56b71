//! First-class invariants for bowling games.
//!
//! Invariants are logical properties that must hold for every game
//! snapshot the engine produces. They are testable independently, compose
//! into sets, and back both the roll postcondition and the game validator.

use derive_more::Display;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Returns one message per violation found, empty when the invariant holds.
    fn violations(state: &S) -> Vec<String>;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;

    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool {
        Self::violations(state).is_empty()
    }
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}", detail)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub invariant: &'static str,
    /// What exactly was wrong.
    pub detail: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(invariant: &'static str, detail: impl Into<String>) -> Self {
        Self {
            invariant,
            detail: detail.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to seven invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation
    /// in declaration order.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv: Invariant<S>),+> InvariantSet<S> for ($($inv,)+) {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    violations.extend(
                        <$inv as Invariant<S>>::violations(state)
                            .into_iter()
                            .map(|detail| {
                                InvariantViolation::new(
                                    <$inv as Invariant<S>>::description(),
                                    detail,
                                )
                            }),
                    );
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);
impl_invariant_set!(I1, I2, I3, I4, I5, I6, I7);

/// Human label for a frame, 1-based as shown on a score sheet.
pub(crate) fn frame_label(player: usize, index: usize) -> String {
    format!("Player {} frame {}", player + 1, index + 1)
}

pub mod completion;
pub mod flags;
pub mod pin_bound;
pub mod roll_count;
pub mod score;
pub mod structure;
pub mod turn_order;

pub use completion::CompletionInvariant;
pub use flags::FlagConsistencyInvariant;
pub use pin_bound::PinBoundInvariant;
pub use roll_count::RollCountInvariant;
pub use score::ScoreConsistencyInvariant;
pub use structure::StructureInvariant;
pub use turn_order::TurnOrderInvariant;

/// All bowling invariants as a composable set.
pub type BowlingInvariants = (
    StructureInvariant,
    RollCountInvariant,
    FlagConsistencyInvariant,
    PinBoundInvariant,
    ScoreConsistencyInvariant,
    TurnOrderInvariant,
    CompletionInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, create_new_game};
    use crate::player::Player;

    fn game() -> Game {
        create_new_game(vec![Player::new("1", "Alice"), Player::new("2", "Bob")]).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(BowlingInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_rolls() {
        let game = Game::replay(
            vec![Player::new("1", "Alice"), Player::new("2", "Bob")],
            &[10, 7, 3, 4, 2, 9, 0],
        )
        .unwrap();
        assert!(BowlingInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        let mut game = game().roll(10).unwrap();
        game.frames[0][0].is_strike = false;
        game.current_frame = 12;

        let violations = BowlingInvariants::check_all(&game).unwrap_err();
        assert!(violations.iter().any(|v| v.invariant == StructureInvariant::description()));
        assert!(violations.iter().any(|v| v.invariant == FlagConsistencyInvariant::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (StructureInvariant, FlagConsistencyInvariant);
        assert!(TwoInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_frame_label_is_one_based() {
        assert_eq!(frame_label(0, 9), "Player 1 frame 10");
    }
}
