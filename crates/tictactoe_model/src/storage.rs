//! Persistence contract for the game state.
//!
//! The machine keeps its whole state in a single slot of a string
//! key-value store. Stores are best-effort: the machine logs their
//! failures and carries on with the in-memory state.

use crate::error::StoreError;
use crate::state::GameState;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Default slot name.
pub const STORAGE_KEY: &str = "gameData";

/// A string key-value store holding the serialized game.
pub trait KeyValueStore {
    /// Reads the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the value under `key`. Deleting a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Serializes a state to its JSON blob.
#[instrument(skip(state))]
pub fn encode(state: &GameState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

/// Parses a JSON blob back into a state.
///
/// Anything that does not describe a state, including `null`, is
/// malformed.
#[instrument(skip(text), fields(len = text.len()))]
pub fn decode(text: &str) -> Result<GameState, StoreError> {
    let state = serde_json::from_str(text)?;
    debug!("Decoded saved state");
    Ok(state)
}

/// In-memory store.
///
/// Can be switched to fail every call, which stands in for a store that
/// is missing or full.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    unavailable: bool,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Makes every following call fail (or succeed again).
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Reads a value directly, bypassing availability.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::unavailable("memory store switched off"))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}
