//! XP and Level system
//!
//! Level `n` costs `floor(1000 * 1.1^(n-1))` XP. Levels start at 1 and the
//! player's level is derived from cumulative XP only.

use serde::{Deserialize, Serialize};

/// XP needed to clear level 1
pub const BASE_XP_FOR_LEVEL: u64 = 1000;

/// Growth factor per level
pub const XP_MULTIPLIER: f64 = 1.1;

/// Level and progress inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    pub current_xp: u64,
}

/// Progress bar data for the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current: u64,
    pub total: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

/// A level up event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

impl LevelUp {
    /// Compare the levels of two XP totals
    pub fn between(old_total_xp: u64, new_total_xp: u64) -> Option<Self> {
        let old_level = level_from_total_xp(old_total_xp).level;
        let new_level = level_from_total_xp(new_total_xp).level;
        (new_level > old_level).then_some(Self {
            old_level,
            new_level,
        })
    }
}

/// XP required to go from `level` to `level + 1`. Level 0 is treated as 1.
pub fn xp_required_for_level(level: u32) -> u64 {
    let exponent = level.max(1) - 1;
    // `as` saturates, so absurd levels clamp to u64::MAX instead of wrapping
    (BASE_XP_FOR_LEVEL as f64 * XP_MULTIPLIER.powf(exponent as f64)).floor() as u64
}

/// Walk the curve until the remaining XP no longer fills the next level
pub fn level_from_total_xp(total_xp: u64) -> LevelInfo {
    let mut level = 1u32;
    let mut accumulated = 0u64;

    loop {
        let needed = xp_required_for_level(level);
        match accumulated.checked_add(needed) {
            Some(next) if next <= total_xp => {
                accumulated = next;
                level += 1;
            }
            _ => {
                return LevelInfo {
                    level,
                    current_xp: total_xp - accumulated,
                };
            }
        }
    }
}

/// Total XP at which `level` starts
pub fn total_xp_for_level(level: u32) -> u64 {
    (1..level.max(1))
        .map(xp_required_for_level)
        .fold(0u64, |acc, xp| acc.saturating_add(xp))
}

pub fn progress_to_next_level(total_xp: u64) -> LevelProgress {
    let info = level_from_total_xp(total_xp);
    let total = xp_required_for_level(info.level);

    LevelProgress {
        current: info.current_xp,
        total,
        percentage: info.current_xp as f64 * 100.0 / total as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_required_for_level() {
        assert_eq!(xp_required_for_level(1), 1000);
        assert_eq!(xp_required_for_level(2), 1100);
        assert_eq!(xp_required_for_level(3), 1210);
        assert_eq!(xp_required_for_level(0), 1000);
    }

    #[test]
    fn test_requirement_strictly_increasing() {
        for level in 1..300 {
            assert!(
                xp_required_for_level(level + 1) > xp_required_for_level(level),
                "level {level}"
            );
        }
    }

    #[test]
    fn test_level_from_total_xp() {
        assert_eq!(
            level_from_total_xp(0),
            LevelInfo {
                level: 1,
                current_xp: 0
            }
        );
        assert_eq!(level_from_total_xp(999).level, 1);
        assert_eq!(
            level_from_total_xp(1000),
            LevelInfo {
                level: 2,
                current_xp: 0
            }
        );
        assert_eq!(
            level_from_total_xp(2_150),
            LevelInfo {
                level: 3,
                current_xp: 50
            }
        );
    }

    #[test]
    fn test_current_xp_stays_below_requirement() {
        let samples = (0..50_000u64)
            .step_by(137)
            .chain([u64::MAX / 2, u64::MAX - 1, u64::MAX]);
        for total in samples {
            let info = level_from_total_xp(total);
            assert!(info.current_xp < xp_required_for_level(info.level), "total {total}");
        }
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut last = 0;
        for total in (0..200_000u64).step_by(97) {
            let level = level_from_total_xp(total).level;
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_total_xp_for_level_matches_walk() {
        for level in 1..40 {
            let start = total_xp_for_level(level);
            assert_eq!(
                level_from_total_xp(start),
                LevelInfo {
                    level,
                    current_xp: 0
                }
            );
        }
    }

    #[test]
    fn test_progress_fresh_player() {
        let progress = progress_to_next_level(150);
        assert_eq!(progress.current, 150);
        assert_eq!(progress.total, 1000);
        assert!((progress.percentage - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_up_between() {
        assert_eq!(LevelUp::between(900, 950), None);
        assert_eq!(
            LevelUp::between(900, 2_200),
            Some(LevelUp {
                old_level: 1,
                new_level: 3
            })
        );
    }
}
