//! Key-value store kept in a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tictactoe_model::{KeyValueStore, StoreError, StoreErrorKind};
use tracing::{debug, instrument, warn};

/// Stores string values in one JSON object file: `{"gameData": "..."}`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("State file does not exist yet");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let serde_json::Value::Object(entries) = serde_json::from_str(&text)? else {
            return Err(StoreError::malformed("State file is not a JSON object"));
        };
        entries
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(value) => Ok((key, value)),
                _ => Err(StoreError::malformed(format!(
                    "Value under {:?} is not a string",
                    key
                ))),
            })
            .collect()
    }

    /// Reads the map for a write, starting over if the file is corrupt.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_map() {
            Err(e) if e.kind == StoreErrorKind::Malformed => {
                warn!(error = %e, path = %self.path.display(), "Overwriting corrupt state file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    #[instrument(skip(self, map), fields(path = %self.path.display(), entries = map.len()))]
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("State file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
