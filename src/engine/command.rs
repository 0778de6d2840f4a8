//! Commands accepted by the engine and the events they produce.

use thiserror::Error;

use crate::domain::{
    CompletionId, HabitId, HabitPatch, NewHabit, NewReward, RewardId, RewardPatch,
    ValidationError,
};
use crate::progression::LevelUp;

/// A state change request
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPlayerName(String),
    SetPlayerAvatar(String),
    AddXp(u64),
    AddCoins(u64),

    CreateHabit(NewHabit),
    UpdateHabit { id: HabitId, patch: HabitPatch },
    DeleteHabit(HabitId),
    CompleteHabit(HabitId),
    UncompleteHabit(HabitId),

    AddReward(NewReward),
    UpdateReward { id: RewardId, patch: RewardPatch },
    UnlockReward(RewardId),
    DeleteReward(RewardId),
    PurchaseReward(RewardId),
}

/// What a command changed. An empty event list means the command was a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerRenamed { name: String },
    AvatarChanged { avatar: String },
    XpAwarded { amount: u64 },
    CoinsAwarded { amount: u64 },
    LevelUp(LevelUp),

    HabitCreated { habit_id: HabitId },
    HabitUpdated { habit_id: HabitId },
    HabitDeleted { habit_id: HabitId, completions_removed: usize },
    HabitCompleted {
        habit_id: HabitId,
        completion_id: CompletionId,
        xp_gained: u64,
        coin_gained: u64,
        multiplier: f64,
    },
    HabitUncompleted {
        habit_id: HabitId,
        xp_removed: u64,
        coins_removed: u64,
    },
    StreakExtended { habit_id: HabitId, count: u32 },

    RewardCreated { reward_id: RewardId },
    RewardUpdated { reward_id: RewardId },
    RewardUnlocked { reward_id: RewardId },
    RewardDeleted { reward_id: RewardId },
    RewardPurchased { reward_id: RewardId, cost: u64 },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
