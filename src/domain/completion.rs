use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::habit::HabitId;

pub type CompletionId = String;

/// One completion of a habit. Immutable; only removed by an uncomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub completed_at: DateTime<Utc>,
    /// XP actually granted, after the streak multiplier
    pub xp_gained: u64,
    /// Coins actually granted, after the streak multiplier
    pub coin_gained: u64,
    /// Streak count the multiplier was computed from
    pub streak: u32,
}

/// XP ledger entry, paired 1:1 with a [`Completion`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpEntry {
    pub id: String,
    pub habit_id: HabitId,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
    pub completion_id: CompletionId,
}
