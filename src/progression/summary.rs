//! Reporting over the game state: today's summary and XP trends.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

use super::schedule::is_scheduled_on;
use crate::domain::XpEntry;
use crate::engine::GameState;

/// Progress for a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailySummary {
    /// Active habits due that day
    pub scheduled: usize,
    /// Distinct habits completed that day
    pub completed: usize,
    pub xp_earned: u64,
    pub coins_earned: u64,
    /// Rounded percentage; 0 when nothing is scheduled
    pub completion_rate: u32,
}

/// XP earned per day over a trailing window
#[derive(Debug, Clone, PartialEq)]
pub struct XpTrend {
    /// Oldest first, one entry per day, including days with zero XP
    pub days: Vec<(NaiveDate, u64)>,
    pub total: u64,
    pub average: u64,
}

fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

pub fn daily_summary(state: &GameState, date: NaiveDate) -> DailySummary {
    let completions: Vec<_> = state
        .completions
        .iter()
        .filter(|c| local_day(c.completed_at) == date)
        .collect();

    let completed = completions
        .iter()
        .map(|c| c.habit_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let scheduled = state
        .habits
        .iter()
        .filter(|h| h.active && is_scheduled_on(h, date))
        .count();

    let completion_rate = if scheduled > 0 {
        (completed as f64 * 100.0 / scheduled as f64).round() as u32
    } else {
        0
    };

    DailySummary {
        scheduled,
        completed,
        xp_earned: completions.iter().map(|c| c.xp_gained).sum(),
        coins_earned: completions.iter().map(|c| c.coin_gained).sum(),
        completion_rate,
    }
}

/// Longest window [`xp_trend`] will cover, about ten years
pub const MAX_TREND_DAYS: u32 = 3650;

/// Per-day XP from the ledger for the `days` days ending at `today`.
/// `days` is clamped to `1..=MAX_TREND_DAYS`.
pub fn xp_trend(state: &GameState, today: NaiveDate, days: u32) -> XpTrend {
    let days = days.clamp(1, MAX_TREND_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN);

    let mut buckets: BTreeMap<NaiveDate, u64> = start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|d| (d, 0))
        .collect();

    for entry in &state.xp_history {
        if let Some(total) = buckets.get_mut(&local_day(entry.timestamp)) {
            *total += entry.amount;
        }
    }

    let total: u64 = buckets.values().sum();
    XpTrend {
        average: total / u64::from(days),
        days: buckets.into_iter().collect(),
        total,
    }
}

/// Ledger entries for one habit at or after `since`, oldest first
pub fn habit_xp_history<'a>(
    state: &'a GameState,
    habit_id: &str,
    since: DateTime<Utc>,
) -> Vec<&'a XpEntry> {
    let mut entries: Vec<_> = state
        .xp_history
        .iter()
        .filter(|x| x.habit_id == habit_id && x.timestamp >= since)
        .collect();
    entries.sort_by_key(|x| x.timestamp);
    entries
}
