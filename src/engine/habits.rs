//! Habit lifecycle and completion transitions.
//!
//! Every function validates first and mutates after, so a returned error or an
//! empty event list leaves the state untouched.

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use super::command::GameEvent;
use super::state::GameState;
use crate::domain::{
    new_id, Completion, Habit, HabitPatch, NewHabit, Streak, ValidationError, XpEntry,
};
use crate::progression::{apply_multiplier, streak_multiplier, LevelUp};

impl GameState {
    pub(super) fn create_habit(
        &mut self,
        input: NewHabit,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>, ValidationError> {
        let habit = Habit::create(input, new_id("habit"), now)?;
        let habit_id = habit.id.clone();

        self.streaks
            .insert(habit_id.clone(), Streak::new(habit_id.clone()));
        self.habits.push(habit);

        Ok(vec![GameEvent::HabitCreated { habit_id }])
    }

    pub(super) fn update_habit(
        &mut self,
        id: &str,
        patch: HabitPatch,
    ) -> Result<Vec<GameEvent>, ValidationError> {
        patch.validate()?;
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            debug!(habit_id = id, "update ignored: habit not found");
            return Ok(Vec::new());
        };

        habit.apply_patch(patch);
        Ok(vec![GameEvent::HabitUpdated {
            habit_id: id.to_string(),
        }])
    }

    /// Remove a habit together with its completions, ledger entries and streak
    pub(super) fn delete_habit(&mut self, id: &str) -> Vec<GameEvent> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            debug!(habit_id = id, "delete ignored: habit not found");
            return Vec::new();
        }

        let completions_before = self.completions.len();
        self.completions.retain(|c| c.habit_id != id);
        self.xp_history.retain(|x| x.habit_id != id);
        self.streaks.remove(id);

        vec![GameEvent::HabitDeleted {
            habit_id: id.to_string(),
            completions_removed: completions_before - self.completions.len(),
        }]
    }

    /// Grant the habit's reward once per local calendar day
    pub(super) fn complete_habit(&mut self, id: &str, now: DateTime<Utc>) -> Vec<GameEvent> {
        let Some(habit) = self.habit(id) else {
            debug!(habit_id = id, "completion ignored: habit not found");
            return Vec::new();
        };
        if !habit.active {
            debug!(habit_id = id, "completion ignored: habit inactive");
            return Vec::new();
        }
        let today = now.with_timezone(&Local).date_naive();
        if self.completion_on(id, today).is_some() {
            debug!(habit_id = id, "completion ignored: already completed today");
            return Vec::new();
        }

        let current_streak = self.streak(id).map_or(0, |s| s.current);
        let xp_gained = apply_multiplier(habit.xp_reward, current_streak);
        let coin_gained = apply_multiplier(habit.coin_reward, current_streak);

        let completion = Completion {
            id: new_id("completion"),
            habit_id: id.to_string(),
            completed_at: now,
            xp_gained,
            coin_gained,
            streak: current_streak,
        };
        let completion_id = completion.id.clone();

        self.xp_history.push(XpEntry {
            id: new_id("xp"),
            habit_id: id.to_string(),
            amount: xp_gained,
            timestamp: now,
            completion_id: completion_id.clone(),
        });
        self.completions.push(completion);

        let old_total = self.player.total_xp;
        let new_total = old_total.saturating_add(xp_gained);
        self.player.set_total_xp(new_total);
        self.player.coins = self.player.coins.saturating_add(coin_gained);
        self.player.last_active_at = now;

        let streak = self
            .streaks
            .entry(id.to_string())
            .or_insert_with(|| Streak::new(id));
        streak.extend(now);
        let streak_count = streak.current;

        let mut events = vec![
            GameEvent::HabitCompleted {
                habit_id: id.to_string(),
                completion_id,
                xp_gained,
                coin_gained,
                multiplier: streak_multiplier(current_streak),
            },
            GameEvent::StreakExtended {
                habit_id: id.to_string(),
                count: streak_count,
            },
        ];
        if let Some(level_up) = LevelUp::between(old_total, new_total) {
            events.push(GameEvent::LevelUp(level_up));
        }
        events
    }

    /// Reverse today's completion of a habit exactly
    pub(super) fn uncomplete_habit(&mut self, id: &str, now: DateTime<Utc>) -> Vec<GameEvent> {
        let today = now.with_timezone(&Local).date_naive();
        let Some(completion) = self.completion_on(id, today).cloned() else {
            debug!(habit_id = id, "uncomplete ignored: no completion today");
            return Vec::new();
        };

        let total = self.player.total_xp.saturating_sub(completion.xp_gained);
        self.player.set_total_xp(total);
        self.player.coins = self.player.coins.saturating_sub(completion.coin_gained);
        self.player.last_active_at = now;

        self.completions.retain(|c| c.id != completion.id);
        self.xp_history.retain(|x| x.completion_id != completion.id);

        if let Some(streak) = self.streaks.get_mut(id) {
            streak.retract();
        }

        vec![GameEvent::HabitUncompleted {
            habit_id: id.to_string(),
            xp_removed: completion.xp_gained,
            coins_removed: completion.coin_gained,
        }]
    }
}
