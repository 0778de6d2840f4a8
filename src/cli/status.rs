//! Status command implementation

use anyhow::Result;

use habit_idle::progression::{is_scheduled_on, xp_trend, StreakStatus};

use super::{progress_bar, AppContext};

/// Show the player, today's habits and the XP trend
pub fn status_command(ctx: &AppContext, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let state = engine.state();
    let player = &state.player;
    let progress = engine.level_progress();
    let summary = engine.summary_today();
    let today = engine.today();
    let trend = xp_trend(state, today, ctx.config.display.trend_days);

    if json {
        let value = serde_json::json!({
            "player": player,
            "progress": progress,
            "today": {
                "date": today,
                "scheduled": summary.scheduled,
                "completed": summary.completed,
                "xpEarned": summary.xp_earned,
                "coinsEarned": summary.coins_earned,
                "completionRate": summary.completion_rate,
            },
            "trend": {
                "days": trend.days.len(),
                "total": trend.total,
                "average": trend.average,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}  Level {}", player.avatar, player.name, player.level);
    println!(
        "  {} {}/{} XP ({:.0}%)",
        progress_bar(progress.percentage, 20),
        progress.current,
        progress.total,
        progress.percentage
    );
    println!("  Total XP: {}   Coins: {}", player.total_xp, player.coins);
    println!();

    println!(
        "Today ({}): {}/{} done, {}%  +{} XP  +{} coins",
        today.format("%a %Y-%m-%d"),
        summary.completed,
        summary.scheduled,
        summary.completion_rate,
        summary.xp_earned,
        summary.coins_earned
    );
    for habit in state
        .habits
        .iter()
        .filter(|h| h.active && is_scheduled_on(h, today))
    {
        let mark = if engine.completion_today(&habit.id).is_some() {
            "x"
        } else {
            " "
        };
        let streak = engine.streak(&habit.id).map_or(0, |s| s.current);
        println!(
            "  [{}] {} (streak {}, {})",
            mark,
            habit.name,
            streak,
            StreakStatus::of(streak).label()
        );
    }
    println!();

    println!(
        "Last {} days: {} XP, {} XP/day on average",
        trend.days.len(),
        trend.total,
        trend.average
    );
    Ok(())
}
