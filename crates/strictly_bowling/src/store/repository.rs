//! Repository mapping games and rosters onto a key-value store.

use super::KeyValueStore;
use crate::config::BowlingConfig;
use crate::error::{BowlingError, StoreError};
use crate::game::Game;
use crate::player::Player;
use crate::validator::validate_game_state;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Game and roster persistence over an injected store.
///
/// Keys are namespaced by the configured prefix:
/// `<prefix>:game:<id>`, `<prefix>:games`, `<prefix>:current`,
/// `<prefix>:roster`.
#[derive(Debug, Clone)]
pub struct GameRepository<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> GameRepository<S> {
    /// Creates a repository over `store` using the config's key prefix.
    #[instrument(skip(store, config), fields(prefix = %config.key_prefix()))]
    pub fn new(store: S, config: &BowlingConfig) -> Self {
        Self {
            store,
            prefix: config.key_prefix().clone(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}:{}", self.prefix, suffix)
    }

    fn game_key(&self, id: &str) -> String {
        self.key(&format!("game:{}", id))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, json)
    }

    /// Saves a game snapshot and records its id in the index.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    pub fn save_game(&mut self, game: &Game) -> Result<(), BowlingError> {
        let key = self.game_key(game.id());
        self.write(&key, game)?;

        let mut ids = self.list_game_ids()?;
        if !ids.iter().any(|id| id == game.id()) {
            ids.push(game.id().to_string());
            let index_key = self.key("games");
            self.write(&index_key, &ids)?;
        }

        debug!(complete = game.is_complete(), "Game saved");
        Ok(())
    }

    /// Loads a game snapshot by id.
    ///
    /// The snapshot is validated after loading; inconsistencies are
    /// reported, never repaired.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store or JSON fails, or
    /// [`BowlingError::StateCorruption`] if the snapshot is inconsistent.
    #[instrument(skip(self))]
    pub fn load_game(&self, id: &str) -> Result<Option<Game>, BowlingError> {
        let Some(game) = self.read::<Game>(&self.game_key(id))? else {
            debug!("Game not found");
            return Ok(None);
        };

        validate_game_state(&game).into_result().inspect_err(|e| {
            warn!(game_id = %id, problems = e.details().len(), "Loaded game is corrupt");
        })?;
        Ok(Some(game))
    }

    /// Removes a game, its index entry and the current-game pointer if it
    /// referenced this game.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    #[instrument(skip(self))]
    pub fn delete_game(&mut self, id: &str) -> Result<(), BowlingError> {
        let key = self.game_key(id);
        self.store.delete(&key)?;

        let mut ids = self.list_game_ids()?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() != before {
            let index_key = self.key("games");
            self.write(&index_key, &ids)?;
        }

        let current_key = self.key("current");
        if self.read::<String>(&current_key)?.as_deref() == Some(id) {
            self.store.delete(&current_key)?;
        }

        info!(game_id = %id, "Game deleted");
        Ok(())
    }

    /// Ids of every saved game, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store or JSON fails.
    pub fn list_game_ids(&self) -> Result<Vec<String>, BowlingError> {
        Ok(self.read::<Vec<String>>(&self.key("games"))?.unwrap_or_default())
    }

    /// Loads every indexed game, skipping ids whose snapshot has vanished.
    ///
    /// # Errors
    ///
    /// Fails on the first store error or corrupt snapshot.
    #[instrument(skip(self))]
    pub fn load_games(&self) -> Result<Vec<Game>, BowlingError> {
        let mut games = Vec::new();
        for id in self.list_game_ids()? {
            match self.load_game(&id)? {
                Some(game) => games.push(game),
                None => warn!(game_id = %id, "Indexed game is missing"),
            }
        }
        Ok(games)
    }

    /// Marks a game as the one in progress.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    pub fn set_current_game(&mut self, id: &str) -> Result<(), BowlingError> {
        let key = self.key("current");
        self.write(&key, &id)?;
        Ok(())
    }

    /// Loads the game marked as in progress, if any.
    ///
    /// # Errors
    ///
    /// As for [`GameRepository::load_game`].
    pub fn current_game(&self) -> Result<Option<Game>, BowlingError> {
        match self.read::<String>(&self.key("current"))? {
            Some(id) => self.load_game(&id),
            None => Ok(None),
        }
    }

    /// Clears the in-progress marker without deleting the game.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    pub fn clear_current_game(&mut self) -> Result<(), BowlingError> {
        let key = self.key("current");
        self.store.delete(&key)?;
        Ok(())
    }

    /// Remembers a roster for the next game.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    pub fn save_roster(&mut self, players: &[Player]) -> Result<(), BowlingError> {
        let key = self.key("roster");
        self.write(&key, &players)?;
        Ok(())
    }

    /// Returns the remembered roster, empty if none was saved.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store or JSON fails.
    pub fn load_roster(&self) -> Result<Vec<Player>, BowlingError> {
        Ok(self
            .read::<Vec<Player>>(&self.key("roster"))?
            .unwrap_or_default())
    }

    /// Removes everything from the underlying store.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::Persistence`] if the store fails.
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) -> Result<(), BowlingError> {
        self.store.clear()?;
        info!("Store cleared");
        Ok(())
    }
}
