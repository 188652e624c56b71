//! A single game in play, backed by a repository.

use crate::config::BowlingConfig;
use crate::error::BowlingError;
use crate::game::{Game, create_new_game_with};
use crate::player::Player;
use crate::rules::remaining_pins;
use crate::stats::{PlayerGameStats, game_stats};
use crate::store::{GameRepository, KeyValueStore};
use derive_getters::Getters;
use derive_new::new;
use tracing::{info, instrument, warn};

/// Result of a roll accepted by a [`BowlingSession`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct RollOutcome {
    /// Pins the roll knocked down.
    pins: u8,
    /// Whether the new snapshot reached the store.
    saved: bool,
    /// Whether this roll finished the game.
    completed: bool,
}

/// Owns the authoritative in-memory game and mirrors it to storage.
///
/// Storage failures never stop play: the in-memory game stays current
/// and the failure is reported through [`RollOutcome::saved`].
#[derive(Debug)]
pub struct BowlingSession<S> {
    game: Game,
    repository: GameRepository<S>,
}

impl<S: KeyValueStore> BowlingSession<S> {
    /// Starts a new game, remembers the roster and marks it current.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Setup`] if the roster is invalid. Storage
    /// failures are logged, not returned.
    #[instrument(skip(players, repository, config), fields(players = players.len()))]
    pub fn start(
        players: Vec<Player>,
        repository: GameRepository<S>,
        config: &BowlingConfig,
    ) -> Result<Self, BowlingError> {
        let game = create_new_game_with(players, config)?;
        let mut session = Self { game, repository };

        let roster = session.game.players().to_vec();
        if let Err(e) = session.repository.save_roster(&roster) {
            warn!(error = %e, "Failed to save roster");
        }
        if session.persist() {
            let id = session.game.id().to_string();
            if let Err(e) = session.repository.set_current_game(&id) {
                warn!(error = %e, "Failed to mark game as current");
            }
        }
        Ok(session)
    }

    /// Resumes the game marked current in the repository, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] or
    /// [`BowlingError::StateCorruption`] if the saved game cannot be used.
    #[instrument(skip(repository))]
    pub fn resume(repository: GameRepository<S>) -> Result<Option<Self>, BowlingError> {
        let Some(game) = repository.current_game()? else {
            return Ok(None);
        };
        info!(game_id = %game.id(), "Resuming game");
        Ok(Some(Self { game, repository }))
    }

    /// Returns the current snapshot.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the repository.
    pub fn repository(&self) -> &GameRepository<S> {
        &self.repository
    }

    /// Largest pin count the next roll may take.
    pub fn remaining_pins(&self) -> Option<u8> {
        remaining_pins(&self.game)
    }

    /// Per-player counts for the current game.
    pub fn stats(&self) -> Vec<PlayerGameStats> {
        game_stats(&self.game)
    }

    /// Validates and applies a roll, then saves the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::RollRejected`] for an illegal roll; the game
    /// is left exactly as it was.
    #[instrument(skip(self), fields(game_id = %self.game.id()))]
    pub fn roll(&mut self, pins: u8) -> Result<RollOutcome, BowlingError> {
        let next = self.game.roll(pins)?;
        let completed = next.is_complete() && !self.game.is_complete();
        self.game = next;

        let saved = self.persist();
        if completed {
            info!(scores = ?self.game.scores(), "Game finished");
            if let Err(e) = self.repository.clear_current_game() {
                warn!(error = %e, "Failed to clear current game");
            }
        }
        Ok(RollOutcome::new(pins, saved, completed))
    }

    /// Returns the repository, ending the session.
    pub fn into_repository(self) -> GameRepository<S> {
        self.repository
    }

    fn persist(&mut self) -> bool {
        match self.repository.save_game(&self.game) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to save game; continuing in memory");
                false
            }
        }
    }
}
