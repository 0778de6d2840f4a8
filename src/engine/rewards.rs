//! Player, reward store and purchase transitions.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::command::GameEvent;
use super::state::GameState;
use crate::domain::{new_id, NewReward, Reward, RewardPatch, Spending, ValidationError};
use crate::progression::LevelUp;

impl GameState {
    pub(super) fn set_player_name(&mut self, name: &str) -> Vec<GameEvent> {
        let name = name.trim();
        if name.is_empty() || name == self.player.name {
            return Vec::new();
        }
        self.player.name = name.to_string();
        vec![GameEvent::PlayerRenamed {
            name: name.to_string(),
        }]
    }

    pub(super) fn set_player_avatar(&mut self, avatar: &str) -> Vec<GameEvent> {
        let avatar = avatar.trim();
        if avatar.is_empty() || avatar == self.player.avatar {
            return Vec::new();
        }
        self.player.avatar = avatar.to_string();
        vec![GameEvent::AvatarChanged {
            avatar: avatar.to_string(),
        }]
    }

    pub(super) fn add_xp(&mut self, amount: u64) -> Vec<GameEvent> {
        if amount == 0 {
            return Vec::new();
        }
        let old_total = self.player.total_xp;
        let new_total = old_total.saturating_add(amount);
        self.player.set_total_xp(new_total);

        let mut events = vec![GameEvent::XpAwarded { amount }];
        if let Some(level_up) = LevelUp::between(old_total, new_total) {
            events.push(GameEvent::LevelUp(level_up));
        }
        events
    }

    pub(super) fn add_coins(&mut self, amount: u64) -> Vec<GameEvent> {
        if amount == 0 {
            return Vec::new();
        }
        self.player.coins = self.player.coins.saturating_add(amount);
        vec![GameEvent::CoinsAwarded { amount }]
    }

    pub(super) fn add_reward(&mut self, input: NewReward) -> Result<Vec<GameEvent>, ValidationError> {
        let reward = Reward::create(input, new_id("reward"))?;
        let reward_id = reward.id.clone();
        self.rewards.push(reward);
        Ok(vec![GameEvent::RewardCreated { reward_id }])
    }

    pub(super) fn update_reward(
        &mut self,
        id: &str,
        patch: RewardPatch,
    ) -> Result<Vec<GameEvent>, ValidationError> {
        patch.validate()?;
        let Some(reward) = self.rewards.iter_mut().find(|r| r.id == id) else {
            debug!(reward_id = id, "update ignored: reward not found");
            return Ok(Vec::new());
        };
        reward.apply_patch(patch);
        Ok(vec![GameEvent::RewardUpdated {
            reward_id: id.to_string(),
        }])
    }

    pub(super) fn unlock_reward(&mut self, id: &str, now: DateTime<Utc>) -> Vec<GameEvent> {
        let Some(reward) = self.rewards.iter_mut().find(|r| r.id == id) else {
            debug!(reward_id = id, "unlock ignored: reward not found");
            return Vec::new();
        };
        if reward.unlocked {
            return Vec::new();
        }
        reward.unlocked = true;
        reward.unlocked_at = Some(now);
        vec![GameEvent::RewardUnlocked {
            reward_id: id.to_string(),
        }]
    }

    /// Removes the reward from the store. Past spending records are kept.
    pub(super) fn delete_reward(&mut self, id: &str) -> Vec<GameEvent> {
        let before = self.rewards.len();
        self.rewards.retain(|r| r.id != id);
        if self.rewards.len() == before {
            debug!(reward_id = id, "delete ignored: reward not found");
            return Vec::new();
        }
        vec![GameEvent::RewardDeleted {
            reward_id: id.to_string(),
        }]
    }

    /// Debit the reward's cost and log the purchase, newest first
    pub(super) fn purchase_reward(&mut self, id: &str, now: DateTime<Utc>) -> Vec<GameEvent> {
        let Some(reward) = self.reward(id) else {
            debug!(reward_id = id, "purchase ignored: reward not found");
            return Vec::new();
        };
        if self.player.coins < reward.cost {
            debug!(
                reward_id = id,
                cost = reward.cost,
                coins = self.player.coins,
                "purchase ignored: not enough coins"
            );
            return Vec::new();
        }

        let spending = Spending {
            id: new_id("spending"),
            reward_id: reward.id.clone(),
            reward_name: reward.name.clone(),
            reward_icon: reward.icon.clone(),
            cost_coins: reward.cost,
            purchased_at: now,
        };
        let cost = reward.cost;

        self.player.coins -= cost;
        self.player.last_active_at = now;
        self.spending_history.insert(0, spending);

        vec![GameEvent::RewardPurchased {
            reward_id: id.to_string(),
            cost,
        }]
    }
}
