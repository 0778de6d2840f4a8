//! Habit commands

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, Utc, Weekday};

use habit_idle::domain::{
    AnnualPattern, Difficulty, Frequency, Habit, HabitPatch, LifeArea, MonthlyPattern, NewHabit,
};
use habit_idle::engine::GameEvent;
use habit_idle::progression::streaks::is_active;
use habit_idle::progression::{habit_xp_history, is_scheduled_on, StreakStatus};

use super::{resolve_habit, AppContext};
use crate::commands::HabitFields;

fn parse_area(s: &str) -> Result<LifeArea> {
    LifeArea::from_str(s).ok_or_else(|| {
        let valid: Vec<_> = LifeArea::ALL.iter().map(|a| a.as_str()).collect();
        anyhow!("Unknown area '{}' (expected one of: {})", s, valid.join(", "))
    })
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    Difficulty::from_str(s).ok_or_else(|| {
        let valid: Vec<_> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        anyhow!("Unknown difficulty '{}' (expected one of: {})", s, valid.join(", "))
    })
}

fn parse_monthly(s: &str) -> Result<MonthlyPattern> {
    Ok(match s {
        "every-week" => MonthlyPattern::EveryWeek,
        "every-15-days" => MonthlyPattern::Every15Days,
        "first-day" => MonthlyPattern::FirstDay,
        "last-day" => MonthlyPattern::LastDay,
        other => bail!("Unknown monthly pattern: {}", other),
    })
}

fn parse_annual(s: &str) -> Result<AnnualPattern> {
    Ok(match s {
        "every-month" => AnnualPattern::EveryMonth,
        "every-3-months" => AnnualPattern::Every3Months,
        "every-6-months" => AnnualPattern::Every6Months,
        "every-12-months" => AnnualPattern::Every12Months,
        other => bail!("Unknown annual pattern: {}", other),
    })
}

/// Build a frequency from `--frequency`, `--days` and `--pattern`
fn parse_frequency(kind: &str, days: &[String], pattern: Option<&str>) -> Result<Frequency> {
    match kind.to_lowercase().as_str() {
        "daily" => Ok(Frequency::Daily),
        "weekly" => {
            let target_days = days
                .iter()
                .map(|d| {
                    d.trim()
                        .parse::<Weekday>()
                        .map_err(|_| anyhow!("Unknown weekday: {}", d))
                })
                .collect::<Result<Vec<_>>>()?;
            if target_days.is_empty() {
                bail!("Weekly habits need --days (e.g. --days Mon,Wed,Fri)");
            }
            Ok(Frequency::Weekly { target_days })
        }
        "biweekly" => Ok(Frequency::Biweekly),
        "monthly" => Ok(Frequency::Monthly {
            pattern: parse_monthly(pattern.unwrap_or("every-week"))?,
        }),
        "annual" => Ok(Frequency::Annual {
            pattern: parse_annual(pattern.unwrap_or("every-12-months"))?,
        }),
        other => bail!("Unknown frequency: {}", other),
    }
}

fn describe_frequency(frequency: &Frequency) -> String {
    match frequency {
        Frequency::Weekly { target_days } => {
            let days: Vec<_> = target_days.iter().map(|d| d.to_string()).collect();
            format!("Weekly ({})", days.join(", "))
        }
        Frequency::Monthly { pattern } => format!("Monthly ({:?})", pattern),
        Frequency::Annual { pattern } => format!("Annual ({:?})", pattern),
        other => other.label().to_string(),
    }
}

pub fn habit_add_command(ctx: &AppContext, name: String, fields: HabitFields) -> Result<()> {
    let input = NewHabit {
        name,
        description: fields.description.unwrap_or_default(),
        area: parse_area(fields.area.as_deref().unwrap_or("personal"))?,
        frequency: parse_frequency(
            fields.frequency.as_deref().unwrap_or("daily"),
            &fields.days,
            fields.pattern.as_deref(),
        )?,
        difficulty: parse_difficulty(fields.difficulty.as_deref().unwrap_or("medium"))?,
    };

    let mut engine = ctx.engine()?;
    let Some(id) = engine.create_habit(input)? else {
        bail!("Habit was not created");
    };
    if let Some(habit) = engine.state().habit(&id) {
        println!(
            "Added '{}' ({}): {} XP, {} coins per completion",
            habit.name, habit.id, habit.xp_reward, habit.coin_reward
        );
    }
    Ok(())
}

pub fn habit_list_command(ctx: &AppContext, all: bool, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let today = engine.today();
    let habits: Vec<&Habit> = engine
        .state()
        .habits
        .iter()
        .filter(|h| all || h.active)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&habits)?);
        return Ok(());
    }

    if habits.is_empty() {
        println!("No habits yet. Add one with: habit-idle habit add <name>");
        return Ok(());
    }

    for habit in habits {
        let done = if engine.completion_today(&habit.id).is_some() {
            "x"
        } else if is_scheduled_on(habit, today) {
            " "
        } else {
            "-"
        };
        let streak = engine.streak(&habit.id).map_or(0, |s| s.current);
        let paused = if habit.active { "" } else { " (paused)" };
        println!(
            "[{}] {} {}{} | {} | {} | streak {}",
            done,
            habit.id,
            habit.name,
            paused,
            habit.area,
            describe_frequency(&habit.frequency),
            streak
        );
    }
    Ok(())
}

pub fn habit_show_command(ctx: &AppContext, query: &str, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let state = engine.state();
    let habit = resolve_habit(state, query)?;
    let streak = engine.streak(&habit.id);
    let since = Utc::now() - Duration::days(i64::from(ctx.config.display.trend_days));
    let history = habit_xp_history(state, &habit.id, since);
    let completions = state.completions_for(&habit.id).count();

    if json {
        let value = serde_json::json!({
            "habit": habit,
            "streak": streak,
            "completedToday": engine.completion_today(&habit.id).is_some(),
            "totalCompletions": completions,
            "recentXp": history,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", habit.name, habit.id);
    if !habit.description.is_empty() {
        println!("  {}", habit.description);
    }
    println!("  Area:       {}", habit.area);
    println!("  Frequency:  {}", describe_frequency(&habit.frequency));
    println!(
        "  Difficulty: {} ({} XP, {} coins)",
        habit.difficulty, habit.xp_reward, habit.coin_reward
    );
    println!("  Active:     {}", if habit.active { "yes" } else { "no" });
    println!("  Completed:  {} times", completions);
    if let Some(streak) = streak {
        let live = if is_active(streak, engine.today()) { "" } else { ", inactive" };
        println!(
            "  Streak:     {} ({}{}), longest {}",
            streak.current,
            StreakStatus::of(streak.current).label(),
            live,
            streak.longest
        );
    }
    let total: u64 = history.iter().map(|x| x.amount).sum();
    println!(
        "  Last {} days: {} completions, {} XP",
        ctx.config.display.trend_days,
        history.len(),
        total
    );
    Ok(())
}

pub fn habit_edit_command(
    ctx: &AppContext,
    query: &str,
    name: Option<String>,
    fields: HabitFields,
    active: Option<bool>,
) -> Result<()> {
    let mut engine = ctx.engine()?;
    let habit = resolve_habit(engine.state(), query)?;
    let id = habit.id.clone();

    let frequency = match fields.frequency.as_deref() {
        Some(kind) => Some(parse_frequency(kind, &fields.days, fields.pattern.as_deref())?),
        None => None,
    };
    let patch = HabitPatch {
        name,
        description: fields.description,
        area: fields.area.as_deref().map(parse_area).transpose()?,
        frequency,
        difficulty: fields.difficulty.as_deref().map(parse_difficulty).transpose()?,
        active,
    };
    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    engine.update_habit(&id, patch)?;
    println!("Updated {}.", id);
    Ok(())
}

pub fn habit_rm_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let habit = resolve_habit(engine.state(), query)?;
    let (id, name) = (habit.id.clone(), habit.name.clone());

    for event in engine.delete_habit(&id) {
        if let GameEvent::HabitDeleted {
            completions_removed,
            ..
        } = event
        {
            println!("Deleted '{}' and {} completions.", name, completions_removed);
        }
    }
    Ok(())
}

pub fn habit_done_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let habit = resolve_habit(engine.state(), query)?;
    let (id, name, active) = (habit.id.clone(), habit.name.clone(), habit.active);

    let events = engine.complete_habit(&id);
    if events.is_empty() {
        if !active {
            println!("'{}' is paused.", name);
        } else {
            println!("'{}' is already done today.", name);
        }
        return Ok(());
    }

    for event in events {
        match event {
            GameEvent::HabitCompleted {
                xp_gained,
                coin_gained,
                multiplier,
                ..
            } => println!(
                "Done: {} (+{} XP, +{} coins, x{:.1})",
                name, xp_gained, coin_gained, multiplier
            ),
            GameEvent::StreakExtended { count, .. } => println!("Streak: {}", count),
            GameEvent::LevelUp(level_up) => {
                println!("Level up! {} -> {}", level_up.old_level, level_up.new_level)
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn habit_undo_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let habit = resolve_habit(engine.state(), query)?;
    let (id, name) = (habit.id.clone(), habit.name.clone());

    let events = engine.uncomplete_habit(&id);
    match events.first() {
        Some(GameEvent::HabitUncompleted {
            xp_removed,
            coins_removed,
            ..
        }) => println!(
            "Undone: {} (-{} XP, -{} coins)",
            name, xp_removed, coins_removed
        ),
        _ => println!("'{}' was not completed today.", name),
    }
    Ok(())
}
