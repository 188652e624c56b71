//! Directory-backed store: one JSON file per key.

use super::KeyValueStore;
use crate::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Store that keeps each key in `<dir>/<key>.json`.
///
/// Key bytes outside `[A-Za-z0-9-]` are written as `_XX` (uppercase hex),
/// `_` included, so distinct keys always map to distinct files.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!("Opened JSON directory store");
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

/// Escapes a key into a file stem.
fn encode_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02X}", byte));
        }
    }
    stem
}

impl KeyValueStore for JsonDirStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Wrote value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    fn clear(&mut self) -> Result<(), StoreError> {
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        store.set("bowling:game:1", "{\"a\":1}".to_string()).unwrap();
        assert_eq!(
            store.get("bowling:game:1").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("bowling_3Agame_3A1.json").exists());
    }

    #[test]
    fn test_similar_keys_stay_separate() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        store.set("a:b", "1".to_string()).unwrap();
        store.set("a_b", "2".to_string()).unwrap();
        store.set("a_3Ab", "3".to_string()).unwrap();
        assert_eq!(store.get("a:b").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("a_3Ab").unwrap().as_deref(), Some("3"));
        assert_eq!(store.dir(), dir.path());
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("game-1"), "game-1");
        assert_eq!(encode_key("a:b"), "a_3Ab");
        assert_eq!(encode_key("a_b"), "a_5Fb");
        assert_eq!(encode_key("x/y.z"), "x_2Fy_2Ez");
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_delete_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonDirStore::open(dir.path().join("nested")).unwrap();
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();
        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.clear().unwrap();
        assert_eq!(store.get("b").unwrap(), None);
    }
}
