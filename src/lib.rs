//! habit-idle - gamified habit tracking
//!
//! Completing habits earns XP and coins. XP drives an exponential leveling
//! curve, consecutive completions build a streak bonus of up to 2x, and coins
//! buy rewards from a personal store.
//!
//! ## Layout
//!
//! - [`domain`]: plain data types (player, habits, completions, rewards)
//! - [`progression`]: pure rules (levels, streak multiplier, schedules, reports)
//! - [`engine`]: the [`engine::GameEngine`] state holder that applies commands
//! - [`storage`]: key/value stores, the game-state repository, export/import
//! - [`config`]: `~/.habit-idle/config.toml`

pub mod config;
pub mod domain;
pub mod engine;
pub mod progression;
pub mod storage;

pub use domain::*;
