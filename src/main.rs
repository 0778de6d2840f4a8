use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod commands;

use cli::AppContext;
use commands::{Commands, DataCommands, HabitCommands, PlayerCommands, RewardCommands};

#[derive(Parser)]
#[command(name = "habit-idle")]
#[command(about = "Gamified habit tracker: earn XP and coins, level up, buy rewards")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.habit-idle/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = match cli.command {
        Some(Commands::Init { force }) => {
            return cli::init::init_command(cli.config.as_deref(), cli.data_dir.as_deref(), force);
        }
        other => other,
    };

    let ctx = AppContext::load(cli.config.as_deref(), cli.data_dir)?;

    match command {
        Some(Commands::Init { .. }) => {}
        Some(Commands::Status { json }) => cli::status::status_command(&ctx, json)?,
        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add { name, fields } => cli::habit::habit_add_command(&ctx, name, fields)?,
            HabitCommands::List { all, json } => cli::habit::habit_list_command(&ctx, all, json)?,
            HabitCommands::Show { habit, json } => cli::habit::habit_show_command(&ctx, &habit, json)?,
            HabitCommands::Edit {
                habit,
                name,
                fields,
                pause,
                resume,
            } => {
                let active = match (pause, resume) {
                    (true, _) => Some(false),
                    (_, true) => Some(true),
                    _ => None,
                };
                cli::habit::habit_edit_command(&ctx, &habit, name, fields, active)?
            }
            HabitCommands::Rm { habit } => cli::habit::habit_rm_command(&ctx, &habit)?,
            HabitCommands::Done { habit } => cli::habit::habit_done_command(&ctx, &habit)?,
            HabitCommands::Undo { habit } => cli::habit::habit_undo_command(&ctx, &habit)?,
        },
        Some(Commands::Reward { command }) => match command {
            RewardCommands::List { all, json } => cli::reward::reward_list_command(&ctx, all, json)?,
            RewardCommands::Add {
                name,
                cost,
                icon,
                description,
            } => cli::reward::reward_add_command(&ctx, name, cost, icon, description)?,
            RewardCommands::Edit {
                reward,
                name,
                cost,
                icon,
                description,
                hide,
                show,
            } => {
                let visible = match (hide, show) {
                    (true, _) => Some(false),
                    (_, true) => Some(true),
                    _ => None,
                };
                let patch = habit_idle::domain::RewardPatch {
                    name,
                    description,
                    icon,
                    cost,
                    visible_in_store: visible,
                };
                cli::reward::reward_edit_command(&ctx, &reward, patch)?
            }
            RewardCommands::Rm { reward } => cli::reward::reward_rm_command(&ctx, &reward)?,
            RewardCommands::Buy { reward } => cli::reward::reward_buy_command(&ctx, &reward)?,
            RewardCommands::Unlock { reward } => cli::reward::reward_unlock_command(&ctx, &reward)?,
            RewardCommands::History { limit, json } => {
                cli::reward::reward_history_command(&ctx, limit, json)?
            }
        },
        Some(Commands::Player { command }) => match command {
            PlayerCommands::Rename { name } => cli::player::player_rename_command(&ctx, name)?,
            PlayerCommands::Avatar { avatar } => cli::player::player_avatar_command(&ctx, avatar)?,
        },
        Some(Commands::Data { command }) => match command {
            DataCommands::Export { output } => cli::data::export_command(&ctx, output)?,
            DataCommands::Import { file, yes } => cli::data::import_command(&ctx, &file, yes)?,
            DataCommands::Reset { yes } => cli::data::reset_command(&ctx, yes)?,
            DataCommands::Seed { yes } => cli::data::seed_command(&ctx, yes)?,
        },
        None => {
            // Default: show status
            cli::status::status_command(&ctx, false)?;
        }
    }

    Ok(())
}
