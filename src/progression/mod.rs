//! Progression rules: leveling curve, streak bonuses, scheduling and reports.
//!
//! Everything in here is pure and deterministic; callers pass in the state and
//! the date they care about.

pub mod levels;
pub mod schedule;
pub mod streaks;
pub mod summary;

pub use levels::{
    level_from_total_xp, progress_to_next_level, xp_required_for_level, LevelInfo, LevelProgress,
    LevelUp,
};
pub use schedule::is_scheduled_on;
pub use streaks::{apply_multiplier, streak_multiplier, StreakStatus};
pub use summary::{
    daily_summary, habit_xp_history, xp_trend, DailySummary, XpTrend, MAX_TREND_DAYS,
};
