//! Persistence layer for game snapshots and rosters.
//!
//! The engine itself never touches storage. Callers inject a
//! [`KeyValueStore`] into a [`GameRepository`], which maps games to
//! JSON values under string keys.

mod json_dir;
mod memory;
mod repository;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use repository::GameRepository;

use crate::error::StoreError;

/// Opaque string-keyed storage holding JSON text.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Removes every key.
    fn clear(&mut self) -> Result<(), StoreError>;
}
