//! Streak bonus and streak status
//!
//! Each consecutive completion adds 10% to the reward, capped at 2x.

use chrono::{Local, NaiveDate};

use crate::domain::Streak;

/// Bonus per streak step, in tenths of the base reward
const STEP_TENTHS: u64 = 1;

/// Multiplier cap, in tenths (2.0x)
const MAX_TENTHS: u64 = 20;

fn multiplier_tenths(current_streak: u32) -> u64 {
    (10 + current_streak as u64 * STEP_TENTHS).min(MAX_TENTHS)
}

/// `min(1 + streak * 0.1, 2.0)`
pub fn streak_multiplier(current_streak: u32) -> f64 {
    multiplier_tenths(current_streak) as f64 / 10.0
}

/// `floor(base * streak_multiplier(streak))`, computed in integer tenths so
/// the floor is exact.
pub fn apply_multiplier(base: u64, current_streak: u32) -> u64 {
    base.saturating_mul(multiplier_tenths(current_streak)) / 10
}

/// Display bucket for a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    /// 7 or more
    Hot,
    /// 3 to 6
    Cold,
    /// Below 3
    Broken,
}

impl StreakStatus {
    pub fn of(current: u32) -> Self {
        match current {
            7.. => Self::Hot,
            3..=6 => Self::Cold,
            _ => Self::Broken,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::Broken => "broken",
        }
    }
}

/// Local calendar day of the last completion
pub fn last_completed_day(streak: &Streak) -> Option<NaiveDate> {
    streak
        .last_completed_at
        .map(|at| at.with_timezone(&Local).date_naive())
}

/// A streak is live if the habit was last completed today or yesterday
pub fn is_active(streak: &Streak, today: NaiveDate) -> bool {
    let Some(last_day) = last_completed_day(streak) else {
        return false;
    };
    let days_since = (today - last_day).num_days();
    (0..=1).contains(&days_since)
}
