//! Shared test utilities for engine and storage integration tests

#![allow(dead_code)]

use chrono::{Local, TimeZone, Utc};
use tempfile::TempDir;

use habit_idle::domain::{Difficulty, HabitId, LifeArea, NewHabit};
use habit_idle::engine::{GameEngine, ManualClock};
use habit_idle::storage::{FileStore, JsonRepository};

pub type FileEngine = GameEngine<JsonRepository<FileStore>>;

/// A clock fixed at 09:00 local time on a Monday
pub fn monday_morning() -> ManualClock {
    let at = Local
        .with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
        .single()
        .expect("unambiguous local time");
    ManualClock::new(at.with_timezone(&Utc))
}

/// A file-backed engine in a fresh temp directory
pub fn file_engine(clock: &ManualClock) -> (TempDir, FileEngine) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = open_engine(&dir, clock);
    (dir, engine)
}

/// Open another engine on the same data directory
pub fn open_engine(dir: &TempDir, clock: &ManualClock) -> FileEngine {
    let store = FileStore::open(dir.path(), "lgh_").expect("Failed to open store");
    GameEngine::new(JsonRepository::new(store), clock.clone())
}

pub fn add_daily(engine: &mut FileEngine, name: &str, difficulty: Difficulty) -> HabitId {
    engine
        .create_habit(NewHabit::daily(name, LifeArea::Health, difficulty))
        .expect("valid habit")
        .expect("habit created")
}
