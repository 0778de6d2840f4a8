//! CLI command implementations

pub mod data;
pub mod habit;
pub mod init;
pub mod player;
pub mod reward;
pub mod status;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use habit_idle::config::Config;
use habit_idle::domain::{Habit, Reward};
use habit_idle::engine::{GameEngine, GameState, SystemClock};
use habit_idle::storage::{FileStore, JsonRepository};

pub type Engine = GameEngine<JsonRepository<FileStore>>;

/// Loaded config plus the resolved data directory
pub struct AppContext {
    pub config: Config,
    pub data_dir: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::load_from(config_path)?;
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
        Ok(Self { config, data_dir })
    }

    pub fn store(&self) -> Result<FileStore> {
        FileStore::open(&self.data_dir, self.config.storage.key_prefix.clone())
    }

    pub fn engine(&self) -> Result<Engine> {
        let repository = JsonRepository::new(self.store()?);
        Ok(GameEngine::with_options(
            repository,
            SystemClock,
            self.config.engine_options(),
        ))
    }
}

/// Ask a yes/no question on stdin. Anything but "y"/"yes" is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Find a habit by exact id, unique id prefix, or case-insensitive name
pub fn resolve_habit<'a>(state: &'a GameState, query: &str) -> Result<&'a Habit> {
    if let Some(habit) = state.habit(query) {
        return Ok(habit);
    }
    let matches: Vec<_> = state
        .habits
        .iter()
        .filter(|h| h.id.starts_with(query) || h.name.eq_ignore_ascii_case(query.trim()))
        .collect();
    match matches.as_slice() {
        [habit] => Ok(habit),
        [] => bail!("Habit not found: {}", query),
        _ => bail!("'{}' matches {} habits, use the id", query, matches.len()),
    }
}

/// Find a reward by exact id, unique id prefix, or case-insensitive name
pub fn resolve_reward<'a>(state: &'a GameState, query: &str) -> Result<&'a Reward> {
    if let Some(reward) = state.reward(query) {
        return Ok(reward);
    }
    let matches: Vec<_> = state
        .rewards
        .iter()
        .filter(|r| r.id.starts_with(query) || r.name.eq_ignore_ascii_case(query.trim()))
        .collect();
    match matches.as_slice() {
        [reward] => Ok(reward),
        [] => bail!("Reward not found: {}", query),
        _ => bail!("'{}' matches {} rewards, use the id", query, matches.len()),
    }
}

/// Text progress bar, `width` cells wide
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
