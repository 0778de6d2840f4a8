//! Coarse "is this habit due today?" predicates.
//!
//! These are display hints, not a calendar engine. Sub-monthly and annual
//! patterns are always considered due.

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::{Frequency, Habit, MonthlyPattern};

const BIWEEKLY_PERIOD_DAYS: i64 = 14;

pub fn is_scheduled_on(habit: &Habit, date: NaiveDate) -> bool {
    match &habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekly { target_days } => target_days.contains(&date.weekday()),
        Frequency::Biweekly => {
            let created = habit.created_at.with_timezone(&Local).date_naive();
            let elapsed = (date - created).num_days();
            elapsed >= 0 && elapsed % BIWEEKLY_PERIOD_DAYS == 0
        }
        Frequency::Monthly { pattern } => match pattern {
            MonthlyPattern::EveryWeek | MonthlyPattern::Every15Days => true,
            MonthlyPattern::FirstDay => date.day() == 1,
            MonthlyPattern::LastDay => date
                .succ_opt()
                .is_none_or(|next| next.month() != date.month()),
        },
        Frequency::Annual { .. } => true,
    }
}
