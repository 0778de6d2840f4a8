//! Settings sections

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_AVATAR, DEFAULT_PLAYER_NAME};
use crate::storage::DEFAULT_KEY_PREFIX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the stored keys. Unset means `~/.habit-idle/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Namespace prefix for stored keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "default_name")]
    pub default_name: String,

    #[serde(default = "default_avatar")]
    pub default_avatar: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            default_avatar: default_avatar(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Days covered by the XP trend in `status`
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            trend_days: default_trend_days(),
        }
    }
}

fn default_trend_days() -> u32 {
    30
}
