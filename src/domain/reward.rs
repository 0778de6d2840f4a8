//! Rewards store, spending ledger and the (unused) priority list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::habit::LifeArea;

pub type RewardId = String;

/// A reusable store item bought with coins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub cost: u64,
    #[serde(default = "default_visible")]
    pub visible_in_store: bool,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

fn default_visible() -> bool {
    true
}

impl Reward {
    fn seeded(id: &str, name: &str, description: &str, icon: &str, cost: u64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            cost,
            visible_in_store: true,
            unlocked: false,
            unlocked_at: None,
        }
    }

    /// Build a user-defined reward. New rewards are visible and locked.
    pub fn create(input: NewReward, id: RewardId) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyRewardName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            description: input.description,
            icon: input.icon,
            cost: input.cost,
            visible_in_store: true,
            unlocked: false,
            unlocked_at: None,
        })
    }

    pub fn apply_patch(&mut self, patch: RewardPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(visible) = patch.visible_in_store {
            self.visible_in_store = visible;
        }
    }
}

/// Input for creating a reward
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewReward {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub cost: u64,
}

/// Editable reward fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RewardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub cost: Option<u64>,
    pub visible_in_store: Option<bool>,
}

impl RewardPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(ValidationError::EmptyRewardName),
            _ => Ok(()),
        }
    }
}

/// A purchase. Name, icon and cost are copied at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spending {
    pub id: String,
    pub reward_id: RewardId,
    pub reward_name: String,
    pub reward_icon: String,
    pub cost_coins: u64,
    pub purchased_at: DateTime<Utc>,
}

/// Life-area priority. Persisted and carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub id: String,
    pub area: LifeArea,
    /// 1-5, lower is more important
    pub priority: u8,
    pub color: String,
}

/// The seeded reward catalog, used whenever no rewards exist
pub fn default_rewards() -> Vec<Reward> {
    vec![
        Reward::seeded(
            "reward-coffee",
            "Coffee Break",
            "Take a break with your favorite coffee",
            "☕",
            100,
        ),
        Reward::seeded(
            "reward-movie",
            "Movie Night",
            "Watch your favorite movie",
            "🎬",
            100,
        ),
        Reward::seeded(
            "reward-shopping",
            "Shopping Spree",
            "Buy something you like",
            "🛍️",
            150,
        ),
        Reward::seeded(
            "reward-gaming",
            "Gaming Session",
            "Play your favorite game",
            "🎮",
            100,
        ),
        Reward::seeded("reward-rest", "Rest Day", "Take a full day off", "😴", 200),
        Reward::seeded(
            "reward-travel",
            "Travel Adventure",
            "Plan a small trip",
            "✈️",
            250,
        ),
        Reward::seeded(
            "reward-spa",
            "Spa Day",
            "Relax and pamper yourself",
            "💆",
            180,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let rewards = default_rewards();
        assert_eq!(rewards.len(), 7);
        assert!(rewards.iter().all(|r| r.visible_in_store && !r.unlocked));
        assert!(rewards.iter().all(|r| !r.icon.is_empty() && r.cost > 0));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let input = NewReward {
            name: "  ".into(),
            cost: 10,
            ..Default::default()
        };
        assert_eq!(
            Reward::create(input, "r".into()),
            Err(ValidationError::EmptyRewardName)
        );
    }
}
