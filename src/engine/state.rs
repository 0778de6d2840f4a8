//! The game state aggregate and its persisted form.

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    default_rewards, Completion, Habit, HabitId, Player, Priority, Reward, Spending, Streak,
    XpEntry,
};

/// Everything the engine owns. Read freely; mutate only through
/// [`super::GameEngine::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub habits: Vec<Habit>,
    pub completions: Vec<Completion>,
    pub xp_history: Vec<XpEntry>,
    pub streaks: HashMap<HabitId, Streak>,
    pub rewards: Vec<Reward>,
    pub priorities: Vec<Priority>,
    /// Most recent purchase first
    pub spending_history: Vec<Spending>,
    pub updated_at: DateTime<Utc>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::default(), Utc::now())
    }
}

impl GameState {
    /// Fresh state: the given player, no habits, the default reward catalog
    pub fn new(player: Player, now: DateTime<Utc>) -> Self {
        Self {
            player,
            habits: Vec::new(),
            completions: Vec::new(),
            xp_history: Vec::new(),
            streaks: HashMap::new(),
            rewards: default_rewards(),
            priorities: Vec::new(),
            spending_history: Vec::new(),
            updated_at: now,
        }
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn reward(&self, id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == id)
    }

    pub fn streak(&self, habit_id: &str) -> Option<&Streak> {
        self.streaks.get(habit_id)
    }

    /// The completion of `habit_id` on local calendar day `day`, if any
    pub fn completion_on(&self, habit_id: &str, day: NaiveDate) -> Option<&Completion> {
        self.completions
            .iter()
            .find(|c| c.habit_id == habit_id && c.completed_at.with_timezone(&Local).date_naive() == day)
    }

    pub fn completions_for(&self, habit_id: &str) -> impl Iterator<Item = &Completion> {
        self.completions.iter().filter(move |c| c.habit_id == habit_id)
    }

    /// Rewards shown in the store
    pub fn store_rewards(&self) -> impl Iterator<Item = &Reward> {
        self.rewards.iter().filter(|r| r.visible_in_store)
    }
}

/// Serializable snapshot. Every field is optional on read so older or partial
/// saves still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub player: Option<Player>,
    pub habits: Vec<Habit>,
    pub completions: Vec<Completion>,
    pub xp_history: Vec<XpEntry>,
    /// `(habit id, streak)` pairs
    pub streaks: Vec<(HabitId, Streak)>,
    pub rewards: Vec<Reward>,
    pub priorities: Vec<Priority>,
    pub spending_history: Vec<Spending>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl From<&GameState> for PersistedState {
    fn from(state: &GameState) -> Self {
        let mut streaks: Vec<_> = state
            .streaks
            .iter()
            .map(|(id, streak)| (id.clone(), streak.clone()))
            .collect();
        streaks.sort_by(|a, b| a.0.cmp(&b.0));

        PersistedState {
            player: Some(state.player.clone()),
            habits: state.habits.clone(),
            completions: state.completions.clone(),
            xp_history: state.xp_history.clone(),
            streaks,
            rewards: state.rewards.clone(),
            priorities: state.priorities.clone(),
            spending_history: state.spending_history.clone(),
            date_updated: Some(state.updated_at),
        }
    }
}

impl PersistedState {
    /// Rebuild the aggregate, filling gaps with defaults
    pub fn into_state(self, fallback_player: impl FnOnce() -> Player) -> GameState {
        let mut player = self.player.unwrap_or_else(fallback_player);
        // Level fields are derived; never trust the stored copy
        player.set_total_xp(player.total_xp);

        GameState {
            player,
            habits: self.habits,
            completions: self.completions,
            xp_history: self.xp_history,
            streaks: self.streaks.into_iter().collect(),
            rewards: if self.rewards.is_empty() {
                default_rewards()
            } else {
                self.rewards
            },
            priorities: self.priorities,
            spending_history: self.spending_history,
            updated_at: self.date_updated.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_loads_defaults() {
        let persisted: PersistedState = serde_json::from_str("{}").unwrap();
        let state = persisted.into_state(Player::default);

        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.coins, 0);
        assert!(state.habits.is_empty());
        assert_eq!(state.rewards.len(), 7);
    }

    #[test]
    fn test_streaks_round_trip_as_pairs() {
        let mut state = GameState::default();
        let mut streak = Streak::new("habit-a");
        streak.extend(Utc::now());
        state.streaks.insert("habit-a".into(), streak.clone());

        let json = serde_json::to_value(PersistedState::from(&state)).unwrap();
        assert_eq!(json["streaks"][0][0], "habit-a");
        assert_eq!(json["streaks"][0][1]["current"], 1);

        let back: PersistedState = serde_json::from_value(json).unwrap();
        let restored = back.into_state(Player::default);
        assert_eq!(restored.streak("habit-a"), Some(&streak));
        assert_eq!(restored.player, state.player);
    }

    #[test]
    fn test_stored_level_is_rederived() {
        let json = r#"{"player":{"name":"P","totalXp":1500,"level":9,"currentXp":1}}"#;
        let persisted: PersistedState = serde_json::from_str(json).unwrap();
        let state = persisted.into_state(Player::default);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.current_xp, 500);
    }

    #[test]
    fn test_completions_for_habit() {
        let mut state = GameState::default();
        let now = Utc::now();
        for (id, habit_id) in [("c1", "read"), ("c2", "run"), ("c3", "read")] {
            state.completions.push(Completion {
                id: id.into(),
                habit_id: habit_id.into(),
                completed_at: now,
                xp_gained: 10,
                coin_gained: 2,
                streak: 1,
            });
        }

        let ids: Vec<_> = state.completions_for("read").map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
        assert_eq!(state.completions_for("swim").count(), 0);
    }
}
