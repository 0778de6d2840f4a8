//! CLI command definitions for habit-idle.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and data directory
    Init {
        /// Overwrite an existing config file with defaults
        #[arg(long)]
        force: bool,
    },

    /// Show the player, today's habits and recent XP
    Status {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },

    /// Create, edit and complete habits
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },

    /// Browse and buy rewards
    Reward {
        #[command(subcommand)]
        command: RewardCommands,
    },

    /// Change the player's name or avatar
    Player {
        #[command(subcommand)]
        command: PlayerCommands,
    },

    /// Export, import, reset or seed the stored data
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
}

/// Frequency and area arguments shared by `habit add` and `habit edit`
#[derive(clap::Args, Default)]
pub struct HabitFields {
    /// Longer description
    #[arg(long)]
    pub description: Option<String>,
    /// health, work, relationships, learning, finance or personal
    #[arg(long, short = 'a')]
    pub area: Option<String>,
    /// easy, easy-medium, medium, medium-hard or hard
    #[arg(long, short = 'd')]
    pub difficulty: Option<String>,
    /// daily, weekly, biweekly, monthly or annual
    #[arg(long, short = 'f')]
    pub frequency: Option<String>,
    /// Target weekdays for weekly habits (comma-separated, e.g. Mon,Wed,Fri)
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,
    /// Sub-pattern for monthly (every-week, every-15-days, first-day, last-day)
    /// or annual (every-month, every-3-months, every-6-months, every-12-months) habits
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Add a habit
    Add {
        name: String,
        #[command(flatten)]
        fields: HabitFields,
    },
    /// List habits
    List {
        /// Include inactive habits
        #[arg(long)]
        all: bool,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Show one habit with its streak and recent XP
    Show {
        /// Habit id, id prefix or exact name
        habit: String,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Edit a habit
    Edit {
        habit: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: HabitFields,
        /// Pause the habit (it can no longer be completed)
        #[arg(long, conflicts_with = "resume")]
        pause: bool,
        /// Reactivate a paused habit
        #[arg(long)]
        resume: bool,
    },
    /// Delete a habit and its history
    Rm { habit: String },
    /// Mark a habit as done today
    Done { habit: String },
    /// Undo today's completion of a habit
    Undo { habit: String },
}

#[derive(Subcommand)]
pub enum RewardCommands {
    /// List rewards in the store
    List {
        /// Include hidden rewards
        #[arg(long)]
        all: bool,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Add a custom reward
    Add {
        name: String,
        /// Price in coins
        #[arg(long)]
        cost: u64,
        #[arg(long, default_value = "")]
        icon: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a reward
    Edit {
        reward: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cost: Option<u64>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Hide the reward from the store
        #[arg(long, conflicts_with = "show")]
        hide: bool,
        /// Show a hidden reward in the store again
        #[arg(long)]
        show: bool,
    },
    /// Remove a reward from the store
    Rm { reward: String },
    /// Spend coins on a reward
    Buy { reward: String },
    /// Mark a reward as unlocked
    Unlock { reward: String },
    /// Show past purchases, newest first
    History {
        /// Limit number of results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PlayerCommands {
    /// Change the player's name
    Rename { name: String },
    /// Change the player's avatar
    Avatar { avatar: String },
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Write every stored key to a JSON file
    Export {
        /// Output file (defaults to habit-idle-export-YYYY-MM-DD.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Replace all stored data with the contents of an export file
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete all progress and start over
    Reset {
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Replace all data with a demo data set
    Seed {
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
