//! Persistence: namespaced key/value stores and the game-state repository.

mod file;
mod kv;
mod repository;
pub mod transfer;

pub use file::{atomic_write, FileStore};
pub use kv::{KeyValueStore, MemoryStore};
pub use repository::{JsonRepository, GAME_STATE_KEY};

use anyhow::Result;

use crate::engine::PersistedState;

/// Default namespace prefix for stored keys
pub const DEFAULT_KEY_PREFIX: &str = "lgh_";

/// Where the engine loads and saves its snapshot.
///
/// `load` returns `Ok(None)` when nothing has been saved yet. The engine
/// treats any error as "start fresh" on load and logs it on save.
pub trait Persistence {
    fn load(&self) -> Result<Option<PersistedState>>;

    fn save(&self, state: &PersistedState) -> Result<()>;

    /// Remove everything this persistence layer has written
    fn clear(&self) -> Result<()>;
}
