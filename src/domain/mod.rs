//! Domain types: player, habits, completions, streaks, rewards and spending.
//!
//! Everything here is plain data with serde derives. State transitions live in
//! [`crate::engine`]; the pure progression math lives in [`crate::progression`].

mod completion;
mod error;
mod habit;
mod player;
mod reward;
mod streak;

pub use completion::{Completion, CompletionId, XpEntry};
pub use error::ValidationError;
pub use habit::{
    AnnualPattern, Difficulty, Frequency, Habit, HabitId, HabitPatch, LifeArea, MonthlyPattern,
    NewHabit, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
};
pub use player::{Player, PlayerId, DEFAULT_AVATAR, DEFAULT_PLAYER_NAME};
pub use reward::{default_rewards, NewReward, Priority, Reward, RewardId, RewardPatch, Spending};
pub use streak::Streak;

/// Generate a fresh identifier with a readable prefix (e.g. `habit-3f2a...`).
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}
