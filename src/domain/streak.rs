use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::habit::HabitId;

/// Per-habit streak record. `longest >= current` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub habit_id: HabitId,
    pub current: u32,
    pub longest: u32,
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl Streak {
    pub fn new(habit_id: impl Into<HabitId>) -> Self {
        Self {
            habit_id: habit_id.into(),
            current: 0,
            longest: 0,
            last_completed_at: None,
        }
    }

    /// Count one more completion
    pub fn extend(&mut self, at: DateTime<Utc>) {
        self.current += 1;
        self.longest = self.longest.max(self.current);
        self.last_completed_at = Some(at);
    }

    /// Undo one completion. The high-water mark is kept.
    pub fn retract(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_and_retract() {
        let mut streak = Streak::new("h");
        let now = Utc::now();
        streak.extend(now);
        streak.extend(now);
        assert_eq!((streak.current, streak.longest), (2, 2));

        streak.retract();
        streak.retract();
        streak.retract();
        assert_eq!((streak.current, streak.longest), (0, 2));
        assert_eq!(streak.last_completed_at, Some(now));
    }
}
