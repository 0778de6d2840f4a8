use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progression::levels::level_from_total_xp;

pub type PlayerId = String;

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEFAULT_AVATAR: &str = "🎮";

/// The single local player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    /// Cumulative XP across all levels
    pub total_xp: u64,
    /// Derived from `total_xp`
    pub level: u32,
    /// XP progress inside the current level, derived from `total_xp`
    pub current_xp: u64,
    pub coins: u64,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME, DEFAULT_AVATAR, Utc::now())
    }
}

impl Player {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: "player-1".to_string(),
            name: name.into(),
            avatar: avatar.into(),
            total_xp: 0,
            level: 1,
            current_xp: 0,
            coins: 0,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Replace the XP total and re-derive `level` / `current_xp`
    pub fn set_total_xp(&mut self, total_xp: u64) {
        let info = level_from_total_xp(total_xp);
        self.total_xp = total_xp;
        self.level = info.level;
        self.current_xp = info.current_xp;
    }
}
