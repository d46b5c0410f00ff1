//! Cumulative user statistics and the level table.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::day::DayType;

/// Minimum-XP thresholds per level, ascending. Index 0 is level 1.
pub const LEVEL_THRESHOLDS: [u64; 10] = [
    0, 100, 250, 500, 1000, 2000, 4000, 8000, 16000, 32000,
];

/// Level (1-10) implied by a total XP amount.
pub fn level_for_xp(total_xp: u64) -> u32 {
    let mut level = 1;
    for (index, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if total_xp >= *threshold {
            level = index as u32 + 1;
        } else {
            break;
        }
    }
    level
}

/// XP still needed to reach the next level, `None` at the level cap.
pub fn xp_to_next_level(total_xp: u64) -> Option<u64> {
    let level = level_for_xp(total_xp);
    LEVEL_THRESHOLDS
        .get(level as usize)
        .map(|threshold| threshold - total_xp)
}

/// Cumulative counters for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Total XP earned
    pub total_xp: u64,
    /// Level derived from total XP
    pub level: u32,
    /// Current streak length (days)
    pub current_streak: u32,
    /// Longest streak ever (days)
    pub longest_streak: u32,
    /// Total tasks completed
    pub tasks_completed: u64,
    /// Total chains completed
    pub chains_completed: u64,
    /// Count of perfect days
    pub perfect_days: u32,
    /// Count of good-enough days
    pub good_enough_days: u32,
    /// Count of zero days
    pub zero_days: u32,
    /// Running average of reported energy levels
    pub average_energy: f64,
    /// Number of energy samples behind the average
    pub energy_samples: u64,
    /// Hour of day (0-23) with the most completions
    pub most_productive_hour: Option<u8>,
    /// Day of week with the most completions
    pub most_productive_day: Option<Weekday>,
}

impl UserStats {
    /// Fresh stats for a new user.
    pub fn new() -> Self {
        Self {
            total_xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            tasks_completed: 0,
            chains_completed: 0,
            perfect_days: 0,
            good_enough_days: 0,
            zero_days: 0,
            average_energy: 0.0,
            energy_samples: 0,
            most_productive_hour: None,
            most_productive_day: None,
        }
    }

    /// Apply a completion's XP total: add XP, rederive level, bump counters.
    ///
    /// `completed_chain` marks the final task of a chain.
    pub fn record_completion(&mut self, xp_total: u64, completed_chain: bool) {
        self.total_xp += xp_total;
        self.level = level_for_xp(self.total_xp);
        self.tasks_completed += 1;
        if completed_chain {
            self.chains_completed += 1;
        }
    }

    /// Undo a habit toggle: the one sanctioned decrement path.
    pub fn revert_completion(&mut self, xp_total: u64) {
        self.total_xp = self.total_xp.saturating_sub(xp_total);
        self.level = level_for_xp(self.total_xp);
        self.tasks_completed = self.tasks_completed.saturating_sub(1);
    }

    /// Fold a reported energy level into the running average.
    pub fn record_energy_sample(&mut self, energy: u8) {
        let count = self.energy_samples as f64;
        self.average_energy = (self.average_energy * count + energy as f64) / (count + 1.0);
        self.energy_samples += 1;
    }

    /// Mirror a streak advance into the streak counters.
    pub fn record_streak(&mut self, current: u32) {
        self.current_streak = current;
        self.longest_streak = self.longest_streak.max(current);
    }

    /// Fold a day classification into the day counters.
    pub fn record_day(&mut self, day_type: DayType) {
        match day_type {
            DayType::Perfect => self.perfect_days += 1,
            DayType::Good | DayType::Okay | DayType::MinimumViable => {
                self.good_enough_days += 1
            }
            DayType::Zero => self.zero_days += 1,
        }
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::new()
    }
}
