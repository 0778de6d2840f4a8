//! Deterministic demo data: eight habits with a month of back-dated history.

use chrono::{DateTime, Datelike, Duration, Local, Utc, Weekday};

use super::state::GameState;
use crate::domain::{
    AnnualPattern, Difficulty, Frequency, Habit, LifeArea, MonthlyPattern, NewHabit, Player,
    Streak,
};

/// Coin balance the demo player ends with
pub const DEMO_COINS: u64 = 450;

/// Days of history replayed
const HISTORY_DAYS: i64 = 30;

struct DemoHabit {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    area: LifeArea,
    frequency: Frequency,
    difficulty: Difficulty,
    age_days: i64,
    /// Whether the habit was done `offset` days before now on `weekday`
    done: fn(i64, Weekday) -> bool,
}

fn catalog() -> Vec<DemoHabit> {
    vec![
        DemoHabit {
            id: "habit-daily-exercise",
            name: "Morning Exercise",
            description: "30 minute routine",
            area: LifeArea::Health,
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
            age_days: 45,
            done: |offset, _| offset % 5 != 3,
        },
        DemoHabit {
            id: "habit-daily-meditation",
            name: "Meditation",
            description: "10 minutes a day",
            area: LifeArea::Health,
            frequency: Frequency::Daily,
            difficulty: Difficulty::EasyMedium,
            age_days: 30,
            done: |offset, _| offset % 4 != 2,
        },
        DemoHabit {
            id: "habit-weekly-code",
            name: "Coding Challenge",
            description: "Solve a programming problem",
            area: LifeArea::Learning,
            frequency: Frequency::Weekly {
                target_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
            },
            difficulty: Difficulty::Medium,
            age_days: 20,
            done: |_, day| matches!(day, Weekday::Mon | Weekday::Wed | Weekday::Fri),
        },
        DemoHabit {
            id: "habit-weekly-gym",
            name: "Gym Session",
            description: "Full workout",
            area: LifeArea::Health,
            frequency: Frequency::Weekly {
                target_days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat],
            },
            difficulty: Difficulty::MediumHard,
            age_days: 25,
            done: |offset, day| {
                matches!(day, Weekday::Tue | Weekday::Thu | Weekday::Sat) && offset % 3 != 0
            },
        },
        DemoHabit {
            id: "habit-monthly-planning",
            name: "Monthly Planning",
            description: "Review monthly goals",
            area: LifeArea::Personal,
            frequency: Frequency::Monthly {
                pattern: MonthlyPattern::FirstDay,
            },
            difficulty: Difficulty::Hard,
            age_days: 60,
            done: |offset, _| offset == 5,
        },
        DemoHabit {
            id: "habit-monthly-review",
            name: "Review Finances",
            description: "Go over spending and income",
            area: LifeArea::Finance,
            frequency: Frequency::Monthly {
                pattern: MonthlyPattern::LastDay,
            },
            difficulty: Difficulty::Medium,
            age_days: 40,
            done: |offset, _| offset == 5,
        },
        DemoHabit {
            id: "habit-biweekly-cleaning",
            name: "Deep Cleaning",
            description: "Clean the whole house",
            area: LifeArea::Personal,
            frequency: Frequency::Biweekly,
            difficulty: Difficulty::Medium,
            age_days: 35,
            done: |offset, _| offset % 14 == 0,
        },
        DemoHabit {
            id: "habit-annual-checkup",
            name: "Health Checkup",
            description: "Yearly medical exam",
            area: LifeArea::Health,
            frequency: Frequency::Annual {
                pattern: AnnualPattern::Every6Months,
            },
            difficulty: Difficulty::Easy,
            age_days: 90,
            done: |_, _| false,
        },
    ]
}

/// Build the demo state by replaying completions oldest first, so XP, streaks
/// and the ledger stay consistent with what the engine would have produced.
pub fn demo_state(mut player: Player, now: DateTime<Utc>) -> GameState {
    player.created_at = now - Duration::days(90);
    player.last_active_at = now;
    let mut state = GameState::new(player, now);
    let catalog = catalog();

    for demo in &catalog {
        let input = NewHabit {
            name: demo.name.to_string(),
            description: demo.description.to_string(),
            area: demo.area,
            frequency: demo.frequency.clone(),
            difficulty: demo.difficulty,
        };
        // Catalog names and descriptions are always valid
        if let Ok(habit) = Habit::create(input, demo.id.to_string(), now - Duration::days(demo.age_days)) {
            state.streaks.insert(habit.id.clone(), Streak::new(habit.id.clone()));
            state.habits.push(habit);
        }
    }

    for offset in (0..HISTORY_DAYS).rev() {
        let at = now - Duration::days(offset);
        let weekday = at.with_timezone(&Local).weekday();
        for demo in catalog.iter().filter(|d| offset < d.age_days) {
            if (demo.done)(offset, weekday) {
                state.complete_habit(demo.id, at);
            }
        }
    }

    state.player.coins = DEMO_COINS;
    state.player.last_active_at = now;
    state.updated_at = now;
    state
}
