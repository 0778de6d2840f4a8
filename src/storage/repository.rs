//! Game-state repository on top of a [`KeyValueStore`].

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use super::Persistence;
use crate::engine::PersistedState;

/// Key the whole snapshot is stored under
pub const GAME_STATE_KEY: &str = "gamestate";

/// Stores [`PersistedState`] as one JSON document
#[derive(Debug, Clone)]
pub struct JsonRepository<K> {
    store: K,
}

impl<K: KeyValueStore> JsonRepository<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}

impl<K: KeyValueStore> Persistence for JsonRepository<K> {
    fn load(&self) -> Result<Option<PersistedState>> {
        let Some(raw) = self.store.get(GAME_STATE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!("Saved game is corrupt, ignoring it: {e}");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string(state).context("Failed to serialize game state")?;
        self.store.set(GAME_STATE_KEY, &json)?;
        debug!(bytes = json.len(), "Saved game state");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
