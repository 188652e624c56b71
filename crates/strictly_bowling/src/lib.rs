//! Strictly Bowling - ten-pin bowling scoring engine
//!
//! Tracks frames for one to six players, validates every roll against the
//! rules (including the tenth-frame bonus balls), keeps frame and
//! cumulative scores current with strike/spare look-ahead, and decides
//! when the game is over.
//!
//! # Architecture
//!
//! - **Frames**: rolls plus derived strike/spare flags and scores
//! - **Rules**: the roll validator, the single source of truth for legality
//! - **Scoring**: full recompute of frame and cumulative scores
//! - **Game**: the aggregate and its turn-taking state machine
//! - **Invariants / Validator**: independent consistency checks
//! - **Store / Session**: optional persistence through an injected key-value store
//!
//! # Example
//!
//! ```
//! use strictly_bowling::{Player, create_new_game, validate_roll, apply_roll};
//!
//! # fn example() -> Result<(), strictly_bowling::BowlingError> {
//! let mut game = create_new_game(vec![Player::new("p1", "Alice")])?;
//! for pins in [10; 12] {
//!     validate_roll(&game, pins)?;
//!     game = apply_roll(&game, pins);
//! }
//! assert_eq!(game.scores(), [300]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod contracts;
mod error;
mod frame;
mod game;
mod invariants;
mod player;
mod rules;
mod scoring;
mod session;
mod stats;
mod store;
mod validator;

// Crate-level exports - Configuration
pub use config::{BowlingConfig, ConfigError};

// Crate-level exports - Errors
pub use error::{BowlingError, ErrorDetails, ErrorKind, RollRejection, StoreError, StoreFailure};

// Crate-level exports - Frames and players
pub use frame::{FRAMES_PER_GAME, Frame, LAST_FRAME, PINS, Roll};
pub use player::{Player, validate_players};

// Crate-level exports - Engine
pub use contracts::{Contract, RollContract};
pub use game::{Game, apply_roll, create_new_game, create_new_game_with, is_game_complete};
pub use rules::{remaining_pins, validate_roll};
pub use scoring::{calculate_game_score, can_display_score, frame_score};

// Crate-level exports - Consistency checks
pub use invariants::{
    BowlingInvariants, CompletionInvariant, FlagConsistencyInvariant, Invariant, InvariantSet,
    InvariantViolation, PinBoundInvariant, RollCountInvariant, ScoreConsistencyInvariant,
    StructureInvariant, TurnOrderInvariant,
};
pub use validator::{GameValidation, validate_game_state};

// Crate-level exports - Stats
pub use stats::{PlayerGameStats, game_stats};

// Crate-level exports - Persistence
pub use session::{BowlingSession, RollOutcome};
pub use store::{GameRepository, JsonDirStore, KeyValueStore, MemoryStore};
