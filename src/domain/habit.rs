//! Habit definitions: life areas, frequencies, difficulty tiers and patches.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

pub type HabitId = String;

/// Maximum habit name length, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum habit description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Life area a habit belongs to (grouping and display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeArea {
    Health,
    Work,
    Relationships,
    Learning,
    Finance,
    Personal,
}

impl LifeArea {
    pub const ALL: [LifeArea; 6] = [
        LifeArea::Health,
        LifeArea::Work,
        LifeArea::Relationships,
        LifeArea::Learning,
        LifeArea::Finance,
        LifeArea::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Work => "work",
            Self::Relationships => "relationships",
            Self::Learning => "learning",
            Self::Finance => "finance",
            Self::Personal => "personal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for LifeArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty tier. Determines the base XP and coin reward of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    EasyMedium,
    Medium,
    MediumHard,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::EasyMedium,
        Difficulty::Medium,
        Difficulty::MediumHard,
        Difficulty::Hard,
    ];

    /// Base `(xp, coins)` granted by one completion at this tier
    pub fn base_rewards(&self) -> (u64, u64) {
        match self {
            Self::Easy => (40, 8),
            Self::EasyMedium => (60, 15),
            Self::Medium => (100, 25),
            Self::MediumHard => (140, 35),
            Self::Hard => (200, 50),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::EasyMedium => "easy-medium",
            Self::Medium => "medium",
            Self::MediumHard => "medium-hard",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-pattern for monthly habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthlyPattern {
    EveryWeek,
    Every15Days,
    FirstDay,
    LastDay,
}

/// Sub-pattern for annual habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnualPattern {
    EveryMonth,
    Every3Months,
    Every6Months,
    Every12Months,
}

/// How often a habit is meant to be done
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly {
        #[serde(rename = "targetDays", default)]
        target_days: Vec<Weekday>,
    },
    Biweekly,
    Monthly { pattern: MonthlyPattern },
    Annual { pattern: AnnualPattern },
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly { .. } => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly { .. } => "Monthly",
            Self::Annual { .. } => "Annual",
        }
    }
}

/// A user-defined habit
///
/// Reads both the tagged frequency (`"frequency": {"type": "monthly", ...}`)
/// and the flat form used by older saves (`"frequency": "monthly"` with
/// `monthlyFrequency`, `annualFrequency` or `targetDays` beside it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredHabit")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub area: LifeArea,
    pub frequency: Frequency,
    pub difficulty: Difficulty,
    pub xp_reward: u64,
    pub coin_reward: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// On-disk habit, either frequency shape
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHabit {
    id: HabitId,
    name: String,
    #[serde(default)]
    description: String,
    area: LifeArea,
    frequency: StoredFrequency,
    difficulty: Difficulty,
    xp_reward: u64,
    coin_reward: u64,
    created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    target_days: Option<Vec<Weekday>>,
    #[serde(default)]
    monthly_frequency: Option<MonthlyPattern>,
    #[serde(default)]
    annual_frequency: Option<AnnualPattern>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFrequency {
    Tagged(Frequency),
    Flat(FrequencyKind),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum FrequencyKind {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Annual,
}

impl From<StoredHabit> for Habit {
    fn from(stored: StoredHabit) -> Self {
        let frequency = match stored.frequency {
            StoredFrequency::Tagged(frequency) => frequency,
            StoredFrequency::Flat(FrequencyKind::Daily) => Frequency::Daily,
            StoredFrequency::Flat(FrequencyKind::Weekly) => Frequency::Weekly {
                target_days: stored.target_days.unwrap_or_default(),
            },
            StoredFrequency::Flat(FrequencyKind::Biweekly) => Frequency::Biweekly,
            StoredFrequency::Flat(FrequencyKind::Monthly) => Frequency::Monthly {
                pattern: stored.monthly_frequency.unwrap_or(MonthlyPattern::EveryWeek),
            },
            StoredFrequency::Flat(FrequencyKind::Annual) => Frequency::Annual {
                pattern: stored.annual_frequency.unwrap_or(AnnualPattern::Every12Months),
            },
        };

        Self {
            id: stored.id,
            name: stored.name,
            description: stored.description,
            area: stored.area,
            frequency,
            difficulty: stored.difficulty,
            xp_reward: stored.xp_reward,
            coin_reward: stored.coin_reward,
            created_at: stored.created_at,
            active: stored.active,
        }
    }
}

impl Habit {
    /// Build a habit from validated input. Rewards come from the difficulty table.
    pub fn create(input: NewHabit, id: HabitId, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = validate_name(&input.name)?;
        validate_description(&input.description)?;
        let (xp_reward, coin_reward) = input.difficulty.base_rewards();

        Ok(Self {
            id,
            name,
            description: input.description,
            area: input.area,
            frequency: input.frequency,
            difficulty: input.difficulty,
            xp_reward,
            coin_reward,
            created_at: now,
            active: true,
        })
    }

    /// Merge a validated patch. Rewards follow the difficulty table when it changes.
    pub fn apply_patch(&mut self, patch: HabitPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(area) = patch.area {
            self.area = area;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(difficulty) = patch.difficulty {
            if difficulty != self.difficulty {
                let (xp, coins) = difficulty.base_rewards();
                self.xp_reward = xp;
                self.coin_reward = coins;
            }
            self.difficulty = difficulty;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

/// Input for creating a habit
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub area: LifeArea,
    pub frequency: Frequency,
    pub difficulty: Difficulty,
}

impl NewHabit {
    pub fn daily(name: impl Into<String>, area: LifeArea, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            area,
            frequency: Frequency::Daily,
            difficulty,
        }
    }
}

/// Fields of a habit that may change after creation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub area: Option<LifeArea>,
    pub frequency: Option<Frequency>,
    pub difficulty: Option<Difficulty>,
    pub active: Option<bool>,
}

impl HabitPatch {
    /// Validate every field that is present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong(len));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong(len));
    }
    Ok(())
}
