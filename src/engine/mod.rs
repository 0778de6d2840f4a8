//! Progression engine
//!
//! [`GameEngine`] is the single writer of the [`GameState`]. Every command runs
//! synchronously: validate, mutate, persist the whole snapshot, then notify
//! subscribers. Commands whose preconditions do not hold (unknown id, already
//! completed today, not enough coins) are silent no-ops and return no events.
//!
//! ```ignore
//! let store = JsonRepository::new(FileStore::open(&dir, "lgh_")?);
//! let mut engine = GameEngine::new(store, SystemClock);
//! let events = engine.dispatch(Command::CompleteHabit(habit_id))?;
//! ```

mod clock;
mod command;
mod demo;
mod habits;
mod rewards;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, EngineError, GameEvent};
pub use demo::{demo_state, DEMO_COINS};
pub use state::{GameState, PersistedState};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    Completion, HabitId, HabitPatch, NewHabit, Player, RewardId, Streak, DEFAULT_AVATAR,
    DEFAULT_PLAYER_NAME,
};
use crate::progression::{daily_summary, progress_to_next_level, DailySummary, LevelProgress};
use crate::storage::Persistence;

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&GameState, &[GameEvent])>;

/// Defaults applied when no saved state exists or after a reset
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub default_player_name: String,
    pub default_avatar: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            default_avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}

pub struct GameEngine<P: Persistence> {
    state: GameState,
    persistence: P,
    clock: Box<dyn Clock>,
    options: EngineOptions,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<P: Persistence> GameEngine<P> {
    pub fn new(persistence: P, clock: impl Clock + 'static) -> Self {
        Self::with_options(persistence, clock, EngineOptions::default())
    }

    /// Create an engine and load whatever the persistence layer has
    pub fn with_options(persistence: P, clock: impl Clock + 'static, options: EngineOptions) -> Self {
        let mut engine = Self {
            state: GameState::default(),
            persistence,
            clock: Box::new(clock),
            options,
            listeners: Vec::new(),
            next_subscription: 1,
        };
        engine.state = engine.load_state();
        engine
    }

    fn fresh_player(&self) -> Player {
        Player::new(
            self.options.default_player_name.clone(),
            self.options.default_avatar.clone(),
            self.clock.now(),
        )
    }

    /// Read the saved state. A failed or corrupt read yields a fresh state.
    fn load_state(&self) -> GameState {
        match self.persistence.load() {
            Ok(Some(persisted)) => persisted.into_state(|| self.fresh_player()),
            Ok(None) => {
                debug!("No saved game, starting fresh");
                GameState::new(self.fresh_player(), self.clock.now())
            }
            Err(e) => {
                warn!("Failed to load saved game, starting fresh: {e:#}");
                GameState::new(self.fresh_player(), self.clock.now())
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Apply a command. Returns the events it produced; none means no-op.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<GameEvent>, EngineError> {
        let now = self.clock.now();
        let state = &mut self.state;

        let events = match command {
            Command::SetPlayerName(name) => state.set_player_name(&name),
            Command::SetPlayerAvatar(avatar) => state.set_player_avatar(&avatar),
            Command::AddXp(amount) => state.add_xp(amount),
            Command::AddCoins(amount) => state.add_coins(amount),
            Command::CreateHabit(input) => state.create_habit(input, now)?,
            Command::UpdateHabit { id, patch } => state.update_habit(&id, patch)?,
            Command::DeleteHabit(id) => state.delete_habit(&id),
            Command::CompleteHabit(id) => state.complete_habit(&id, now),
            Command::UncompleteHabit(id) => state.uncomplete_habit(&id, now),
            Command::AddReward(input) => state.add_reward(input)?,
            Command::UpdateReward { id, patch } => state.update_reward(&id, patch)?,
            Command::UnlockReward(id) => state.unlock_reward(&id, now),
            Command::DeleteReward(id) => state.delete_reward(&id),
            Command::PurchaseReward(id) => state.purchase_reward(&id, now),
        };

        if !events.is_empty() {
            for event in &events {
                info!(?event, "Game event");
            }
            self.commit(&events);
        }
        Ok(events)
    }

    /// Persist the snapshot, then fan out to subscribers
    fn commit(&mut self, events: &[GameEvent]) {
        self.state.updated_at = self.clock.now();
        let snapshot = PersistedState::from(&self.state);
        if let Err(e) = self.persistence.save(&snapshot) {
            warn!("Failed to save game, keeping in-memory state: {e:#}");
        }
        self.notify(events);
    }

    fn notify(&mut self, events: &[GameEvent]) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, events);
        }
    }

    /// Register a callback run after every successful command, reload and reset
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&GameState, &[GameEvent]) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Re-read the persisted state, e.g. after an import
    pub fn reload(&mut self) {
        self.state = self.load_state();
        self.notify(&[]);
    }

    /// Wipe persisted data and start over with a fresh player and default rewards
    pub fn reset(&mut self) {
        if let Err(e) = self.persistence.clear() {
            warn!("Failed to clear saved game: {e:#}");
        }
        self.state = GameState::new(self.fresh_player(), self.clock.now());
        info!("Game reset");
        self.notify(&[]);
    }

    /// Replace everything with the demo data set and persist it
    pub fn seed_demo(&mut self) {
        self.state = demo_state(self.fresh_player(), self.clock.now());
        info!(habits = self.state.habits.len(), "Seeded demo data");
        self.commit(&[]);
    }

    // Shorthands for the common commands

    pub fn create_habit(&mut self, input: NewHabit) -> Result<Option<HabitId>, EngineError> {
        let events = self.dispatch(Command::CreateHabit(input))?;
        Ok(events.into_iter().find_map(|e| match e {
            GameEvent::HabitCreated { habit_id } => Some(habit_id),
            _ => None,
        }))
    }

    pub fn update_habit(&mut self, id: &str, patch: HabitPatch) -> Result<Vec<GameEvent>, EngineError> {
        self.dispatch(Command::UpdateHabit {
            id: id.to_string(),
            patch,
        })
    }

    pub fn delete_habit(&mut self, id: &str) -> Vec<GameEvent> {
        self.dispatch_infallible(Command::DeleteHabit(id.to_string()))
    }

    pub fn complete_habit(&mut self, id: &str) -> Vec<GameEvent> {
        self.dispatch_infallible(Command::CompleteHabit(id.to_string()))
    }

    pub fn uncomplete_habit(&mut self, id: &str) -> Vec<GameEvent> {
        self.dispatch_infallible(Command::UncompleteHabit(id.to_string()))
    }

    pub fn purchase_reward(&mut self, id: &RewardId) -> Vec<GameEvent> {
        self.dispatch_infallible(Command::PurchaseReward(id.clone()))
    }

    /// For commands that never validate input
    fn dispatch_infallible(&mut self, command: Command) -> Vec<GameEvent> {
        self.dispatch(command).unwrap_or_default()
    }

    // Queries

    pub fn completion_today(&self, habit_id: &str) -> Option<&Completion> {
        self.state.completion_on(habit_id, self.today())
    }

    pub fn streak(&self, habit_id: &str) -> Option<&Streak> {
        self.state.streak(habit_id)
    }

    pub fn level_progress(&self) -> LevelProgress {
        progress_to_next_level(self.state.player.total_xp)
    }

    pub fn summary_today(&self) -> DailySummary {
        daily_summary(&self.state, self.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{Duration, Local, TimeZone, Utc};

    use crate::domain::{Difficulty, LifeArea, NewReward, ValidationError};
    use crate::storage::{JsonRepository, KeyValueStore, MemoryStore};

    fn clock() -> ManualClock {
        ManualClock::new(
            Local
                .with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn engine_with_clock() -> (GameEngine<JsonRepository<MemoryStore>>, ManualClock) {
        let clock = clock();
        let engine = GameEngine::new(JsonRepository::new(MemoryStore::default()), clock.clone());
        (engine, clock)
    }

    fn add_habit(engine: &mut GameEngine<JsonRepository<MemoryStore>>, difficulty: Difficulty) -> HabitId {
        engine
            .create_habit(NewHabit::daily("Stretch", LifeArea::Health, difficulty))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_complete_grants_rewards_and_streak() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Medium);

        let events = engine.complete_habit(&id);
        assert!(matches!(
            events[0],
            GameEvent::HabitCompleted {
                xp_gained: 100,
                coin_gained: 25,
                ..
            }
        ));

        let state = engine.state();
        assert_eq!(state.player.total_xp, 100);
        assert_eq!(state.player.coins, 25);
        assert_eq!(state.completions.len(), 1);
        assert_eq!(state.xp_history.len(), 1);
        assert_eq!(state.xp_history[0].completion_id, state.completions[0].id);
        assert_eq!(engine.streak(&id).map(|s| (s.current, s.longest)), Some((1, 1)));
    }

    #[test]
    fn test_streak_multiplier_example() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Medium);
        engine.state.streaks.get_mut(&id).unwrap().current = 5;
        engine.state.streaks.get_mut(&id).unwrap().longest = 5;

        engine.complete_habit(&id);

        let completion = &engine.state().completions[0];
        assert_eq!(completion.xp_gained, 150);
        assert_eq!(completion.coin_gained, 37);
        assert_eq!(completion.streak, 5);
        assert_eq!(engine.streak(&id).unwrap().current, 6);
    }

    #[test]
    fn test_multiplier_capped_at_double() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Hard);
        engine.state.streaks.get_mut(&id).unwrap().current = 50;
        engine.state.streaks.get_mut(&id).unwrap().longest = 50;

        let events = engine.complete_habit(&id);
        assert!(matches!(
            events[0],
            GameEvent::HabitCompleted {
                xp_gained: 400,
                coin_gained: 100,
                multiplier,
                ..
            } if multiplier == 2.0
        ));
    }

    #[test]
    fn test_second_completion_same_day_is_noop() {
        let (mut engine, clock) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Easy);

        engine.complete_habit(&id);
        let after_first = engine.state().clone();

        clock.advance(Duration::hours(10));
        assert!(engine.complete_habit(&id).is_empty());
        assert_eq!(engine.state().completions.len(), 1);
        assert_eq!(engine.state().player, after_first.player);
    }

    #[test]
    fn test_next_day_completion_allowed() {
        let (mut engine, clock) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Easy);

        engine.complete_habit(&id);
        clock.advance(Duration::days(1));
        engine.complete_habit(&id);

        assert_eq!(engine.state().completions.len(), 2);
        // 40 + floor(40 * 1.1)
        assert_eq!(engine.state().player.total_xp, 84);
        assert_eq!(engine.streak(&id).unwrap().current, 2);
    }

    #[test]
    fn test_unknown_or_inactive_habit_is_noop() {
        let (mut engine, _) = engine_with_clock();
        assert!(engine.complete_habit("habit-missing").is_empty());

        let id = add_habit(&mut engine, Difficulty::Easy);
        engine
            .update_habit(
                &id,
                HabitPatch {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(engine.complete_habit(&id).is_empty());
        assert_eq!(engine.state().player.total_xp, 0);
    }

    #[test]
    fn test_complete_then_uncomplete_round_trip() {
        let (mut engine, clock) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::MediumHard);

        // Build some history on earlier days
        engine.complete_habit(&id);
        clock.advance(Duration::days(1));
        engine.complete_habit(&id);
        clock.advance(Duration::days(1));

        let before = engine.state().clone();
        let longest_before = engine.streak(&id).unwrap().longest;

        engine.complete_habit(&id);
        let longest_after_complete = engine.streak(&id).unwrap().longest;
        let events = engine.uncomplete_habit(&id);
        assert!(matches!(events[0], GameEvent::HabitUncompleted { .. }));

        let after = engine.state();
        assert_eq!(after.player.total_xp, before.player.total_xp);
        assert_eq!(after.player.level, before.player.level);
        assert_eq!(after.player.coins, before.player.coins);
        assert_eq!(after.completions, before.completions);
        assert_eq!(after.xp_history, before.xp_history);
        assert_eq!(
            after.streak(&id).unwrap().current,
            before.streak(&id).unwrap().current
        );
        assert_eq!(after.streak(&id).unwrap().longest, longest_after_complete);
        assert!(longest_after_complete >= longest_before);
    }

    #[test]
    fn test_uncomplete_without_completion_today_is_noop() {
        let (mut engine, clock) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Easy);
        engine.complete_habit(&id);

        clock.advance(Duration::days(1));
        assert!(engine.uncomplete_habit(&id).is_empty());
        assert_eq!(engine.state().completions.len(), 1);
    }

    #[test]
    fn test_uncomplete_clamps_at_zero() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Hard);
        engine.complete_habit(&id);

        // Spend the coins, then undo
        engine.state.player.coins = 10;
        engine.uncomplete_habit(&id);

        assert_eq!(engine.state().player.coins, 0);
        assert_eq!(engine.state().player.total_xp, 0);
        assert_eq!(engine.state().player.level, 1);
    }

    #[test]
    fn test_fresh_player_progress_example() {
        let (mut engine, _) = engine_with_clock();
        engine.dispatch(Command::AddXp(150)).unwrap();

        let progress = engine.level_progress();
        assert_eq!(engine.state().player.level, 1);
        assert_eq!(engine.state().player.current_xp, 150);
        assert_eq!(progress.total, 1000);
        assert!((progress.percentage - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_up_event() {
        let (mut engine, _) = engine_with_clock();
        engine.dispatch(Command::AddXp(970)).unwrap();
        let id = add_habit(&mut engine, Difficulty::Easy);

        let events = engine.complete_habit(&id);
        assert!(events.contains(&GameEvent::LevelUp(crate::progression::LevelUp {
            old_level: 1,
            new_level: 2
        })));
        assert_eq!(engine.state().player.level, 2);
        assert_eq!(engine.state().player.current_xp, 10);
    }

    #[test]
    fn test_purchase_debits_and_logs() {
        let (mut engine, _) = engine_with_clock();
        engine.dispatch(Command::AddCoins(250)).unwrap();

        let events = engine.purchase_reward(&"reward-rest".to_string());
        assert_eq!(
            events,
            vec![GameEvent::RewardPurchased {
                reward_id: "reward-rest".into(),
                cost: 200
            }]
        );
        assert_eq!(engine.state().player.coins, 50);
        assert_eq!(engine.state().spending_history.len(), 1);
        assert_eq!(engine.state().spending_history[0].reward_name, "Rest Day");

        engine.dispatch(Command::AddCoins(100)).unwrap();
        engine.purchase_reward(&"reward-coffee".to_string());
        assert_eq!(engine.state().spending_history[0].reward_id, "reward-coffee");
        // Rewards are reusable
        assert!(engine.state().reward("reward-coffee").is_some());
    }

    #[test]
    fn test_purchase_without_enough_coins_is_noop() {
        let (mut engine, _) = engine_with_clock();
        engine.dispatch(Command::AddCoins(99)).unwrap();

        assert!(engine.purchase_reward(&"reward-coffee".to_string()).is_empty());
        assert!(engine.purchase_reward(&"reward-nope".to_string()).is_empty());
        assert_eq!(engine.state().player.coins, 99);
        assert!(engine.state().spending_history.is_empty());
    }

    #[test]
    fn test_delete_habit_cascades() {
        let (mut engine, clock) = engine_with_clock();
        let doomed = add_habit(&mut engine, Difficulty::Easy);
        let kept = add_habit(&mut engine, Difficulty::Medium);

        for _ in 0..3 {
            engine.complete_habit(&doomed);
            engine.complete_habit(&kept);
            clock.advance(Duration::days(1));
        }
        assert_eq!(engine.state().completions.len(), 6);

        let events = engine.delete_habit(&doomed);
        assert_eq!(
            events,
            vec![GameEvent::HabitDeleted {
                habit_id: doomed.clone(),
                completions_removed: 3
            }]
        );

        let state = engine.state();
        assert!(state.habit(&doomed).is_none());
        assert!(state.streak(&doomed).is_none());
        assert!(state.completions.iter().all(|c| c.habit_id == kept));
        assert!(state.xp_history.iter().all(|x| x.habit_id == kept));
        assert_eq!(state.completions.len(), 3);
        assert_eq!(state.streak(&kept).unwrap().current, 3);
    }

    #[test]
    fn test_validation_errors_do_not_mutate() {
        let (mut engine, _) = engine_with_clock();
        let before = engine.state().clone();

        let err = engine
            .create_habit(NewHabit::daily("", LifeArea::Work, Difficulty::Easy))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(ValidationError::EmptyName)));

        let id = add_habit(&mut engine, Difficulty::Easy);
        let snapshot = engine.state().clone();
        let err = engine
            .update_habit(
                &id,
                HabitPatch {
                    name: Some("n".repeat(101)),
                    difficulty: Some(Difficulty::Hard),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(ValidationError::NameTooLong(101))));
        assert_eq!(engine.state().habits, snapshot.habits);
        assert_eq!(before.habits.len(), 0);
    }

    #[test]
    fn test_reward_management() {
        let (mut engine, clock) = engine_with_clock();
        let events = engine
            .dispatch(Command::AddReward(NewReward {
                name: "Concert".into(),
                description: "Live music".into(),
                icon: "🎸".into(),
                cost: 500,
            }))
            .unwrap();
        let GameEvent::RewardCreated { reward_id } = &events[0] else {
            panic!("expected RewardCreated, got {events:?}");
        };
        let reward_id = reward_id.clone();
        assert_eq!(engine.state().rewards.len(), 8);

        engine.dispatch(Command::UnlockReward(reward_id.clone())).unwrap();
        let reward = engine.state().reward(&reward_id).unwrap();
        assert!(reward.unlocked);
        assert_eq!(reward.unlocked_at, Some(clock.now()));

        engine
            .dispatch(Command::UpdateReward {
                id: reward_id.clone(),
                patch: crate::domain::RewardPatch {
                    cost: Some(450),
                    visible_in_store: Some(false),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(engine.state().reward(&reward_id).unwrap().cost, 450);
        assert_eq!(engine.state().store_rewards().count(), 7);

        engine.dispatch(Command::DeleteReward(reward_id.clone())).unwrap();
        assert!(engine.state().reward(&reward_id).is_none());
    }

    #[test]
    fn test_subscribers_notified_after_mutation_only() {
        let (mut engine, _) = engine_with_clock();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = engine.subscribe(move |state, events| {
            sink.borrow_mut().push((state.player.coins, events.len()));
        });

        engine.dispatch(Command::AddCoins(5)).unwrap();
        engine.purchase_reward(&"reward-spa".to_string());
        assert_eq!(*seen.borrow(), vec![(5, 1)]);

        assert!(engine.unsubscribe(sub));
        assert!(!engine.unsubscribe(sub));
        engine.dispatch(Command::AddCoins(5)).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_state_is_persisted_and_reloaded() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Medium);
        engine.complete_habit(&id);
        engine.dispatch(Command::SetPlayerName("Robin".into())).unwrap();

        let saved = engine.persistence().store().get("gamestate").unwrap();
        assert!(saved.is_some());

        let store = engine.persistence().store().clone();
        let reopened = GameEngine::new(JsonRepository::new(store), clock());
        assert_eq!(reopened.state().player.name, "Robin");
        assert_eq!(reopened.state().player.total_xp, 100);
        assert_eq!(reopened.streak(&id).unwrap().current, 1);
        assert!(reopened.completion_today(&id).is_some());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut engine, _) = engine_with_clock();
        let id = add_habit(&mut engine, Difficulty::Medium);
        engine.complete_habit(&id);
        engine.dispatch(Command::DeleteReward("reward-spa".into())).unwrap();

        engine.reset();

        let state = engine.state();
        assert!(state.habits.is_empty());
        assert_eq!(state.player.total_xp, 0);
        assert_eq!(state.rewards.len(), 7);
        assert!(engine.persistence().store().keys().unwrap().is_empty());
    }

    #[test]
    fn test_seed_demo_persists() {
        let (mut engine, _) = engine_with_clock();
        engine.seed_demo();
        assert_eq!(engine.state().habits.len(), 8);
        assert_eq!(engine.state().player.coins, DEMO_COINS);

        engine.reload();
        assert_eq!(engine.state().habits.len(), 8);
    }

    #[test]
    fn test_corrupt_save_starts_fresh() {
        let store = MemoryStore::default();
        store.set("gamestate", "{not json").unwrap();
        let engine = GameEngine::new(JsonRepository::new(store), clock());
        assert_eq!(engine.state().player.total_xp, 0);
        assert_eq!(engine.state().rewards.len(), 7);
    }
}
