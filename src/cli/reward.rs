//! Reward store commands

use anyhow::{bail, Result};

use habit_idle::domain::{NewReward, RewardPatch};
use habit_idle::engine::{Command, GameEvent};

use super::{resolve_reward, AppContext};

pub fn reward_list_command(ctx: &AppContext, all: bool, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let state = engine.state();
    let coins = state.player.coins;
    let rewards: Vec<_> = state
        .rewards
        .iter()
        .filter(|r| all || r.visible_in_store)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rewards)?);
        return Ok(());
    }

    println!("Coins: {}\n", coins);
    if rewards.is_empty() {
        println!("The store is empty.");
        return Ok(());
    }
    for reward in rewards {
        let affordable = if coins >= reward.cost { "$" } else { " " };
        let mut flags = Vec::new();
        if reward.unlocked {
            flags.push("unlocked");
        }
        if !reward.visible_in_store {
            flags.push("hidden");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "{} {:>5}  {} {} ({}){}",
            affordable, reward.cost, reward.icon, reward.name, reward.id, flags
        );
        if !reward.description.is_empty() {
            println!("          {}", reward.description);
        }
    }
    Ok(())
}

pub fn reward_add_command(
    ctx: &AppContext,
    name: String,
    cost: u64,
    icon: String,
    description: String,
) -> Result<()> {
    let mut engine = ctx.engine()?;
    let events = engine.dispatch(Command::AddReward(NewReward {
        name,
        description,
        icon,
        cost,
    }))?;
    if let Some(GameEvent::RewardCreated { reward_id }) = events.first() {
        println!("Added reward {}.", reward_id);
    }
    Ok(())
}

pub fn reward_edit_command(ctx: &AppContext, query: &str, patch: RewardPatch) -> Result<()> {
    if patch == RewardPatch::default() {
        println!("Nothing to change.");
        return Ok(());
    }
    let mut engine = ctx.engine()?;
    let id = resolve_reward(engine.state(), query)?.id.clone();
    engine.dispatch(Command::UpdateReward {
        id: id.clone(),
        patch,
    })?;
    println!("Updated {}.", id);
    Ok(())
}

pub fn reward_rm_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let reward = resolve_reward(engine.state(), query)?;
    let (id, name) = (reward.id.clone(), reward.name.clone());
    engine.dispatch(Command::DeleteReward(id))?;
    println!("Removed '{}' from the store.", name);
    Ok(())
}

pub fn reward_buy_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let reward = resolve_reward(engine.state(), query)?;
    let (id, name, icon, cost) = (
        reward.id.clone(),
        reward.name.clone(),
        reward.icon.clone(),
        reward.cost,
    );

    if engine.purchase_reward(&id).is_empty() {
        bail!(
            "Not enough coins for '{}': costs {}, you have {}",
            name,
            cost,
            engine.state().player.coins
        );
    }
    println!(
        "Enjoy your {} {}! {} coins left.",
        icon,
        name,
        engine.state().player.coins
    );
    Ok(())
}

pub fn reward_unlock_command(ctx: &AppContext, query: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let id = resolve_reward(engine.state(), query)?.id.clone();
    let events = engine.dispatch(Command::UnlockReward(id.clone()))?;
    if events.is_empty() {
        println!("{} is already unlocked.", id);
    } else {
        println!("Unlocked {}.", id);
    }
    Ok(())
}

pub fn reward_history_command(ctx: &AppContext, limit: Option<usize>, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let history = &engine.state().spending_history;
    let shown = &history[..limit.unwrap_or(history.len()).min(history.len())];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No purchases yet.");
        return Ok(());
    }
    let total: u64 = history.iter().map(|s| s.cost_coins).sum();
    for spending in shown {
        println!(
            "{}  {:>5}  {} {}",
            spending.purchased_at.format("%Y-%m-%d %H:%M"),
            spending.cost_coins,
            spending.reward_icon,
            spending.reward_name
        );
    }
    println!("\nTotal spent: {} coins", total);
    Ok(())
}
