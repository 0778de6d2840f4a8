//! Configuration loading and management

mod io;
mod settings;

pub use settings::{DisplaySettings, PlayerSettings, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;

/// Main configuration structure (`~/.habit-idle/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where game data lives
    #[serde(default)]
    pub storage: StorageSettings,

    /// Defaults for a fresh player
    #[serde(default)]
    pub player: PlayerSettings,

    /// Output options for the CLI
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Config {
    /// Data directory, falling back to `~/.habit-idle/data`
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            default_player_name: self.player.default_name.clone(),
            default_avatar: self.player.default_avatar.clone(),
        }
    }
}
