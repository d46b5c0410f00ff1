//! Achievement catalog and unlock checking.
//!
//! The catalog is a static configuration table the core reads but never
//! mutates. At the current size a linear scan per check is plenty; index by
//! condition type if the catalog ever grows past a few dozen entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::reward::Rarity;
use crate::stats::UserStats;

/// Condition that unlocks an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AchievementCondition {
    /// Total tasks completed reaches the threshold
    TasksCompleted(u64),
    /// Longest streak reaches the threshold (true count, not visible)
    StreakDays(u32),
    /// Level reaches the threshold
    LevelReached(u32),
    /// Perfect-day count reaches the threshold
    PerfectDays(u32),
    /// Chains completed reaches the threshold
    ChainsCompleted(u64),
    /// Total XP reaches the threshold
    XpTotal(u64),
}

impl AchievementCondition {
    /// Whether the stats satisfy this condition.
    pub fn is_satisfied(&self, stats: &UserStats) -> bool {
        match self {
            AchievementCondition::TasksCompleted(n) => stats.tasks_completed >= *n,
            AchievementCondition::StreakDays(n) => stats.longest_streak >= *n,
            AchievementCondition::LevelReached(n) => stats.level >= *n,
            AchievementCondition::PerfectDays(n) => stats.perfect_days >= *n,
            AchievementCondition::ChainsCompleted(n) => stats.chains_completed >= *n,
            AchievementCondition::XpTotal(n) => stats.total_xp >= *n,
        }
    }
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Unlock condition
    pub condition: AchievementCondition,
    /// Rarity tier
    pub rarity: Rarity,
    /// XP granted on unlock
    pub xp_reward: u32,
    /// Hidden until unlocked
    pub hidden: bool,
}

/// Per-user unlock record, created once when the condition first holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievement {
    /// Catalog id
    pub achievement_id: String,
    /// When the condition was first satisfied
    pub unlocked_at: DateTime<Utc>,
    /// Whether the unlock animation has been shown
    pub celebrated: bool,
}

impl UserAchievement {
    /// Record an unlock at the current time.
    pub fn unlock(achievement: &Achievement, clock: &dyn Clock) -> Self {
        Self {
            achievement_id: achievement.id.to_string(),
            unlocked_at: clock.now(),
            celebrated: false,
        }
    }
}

/// The fixed achievement catalog.
pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: "first-task",
        name: "First Step",
        condition: AchievementCondition::TasksCompleted(1),
        rarity: Rarity::Common,
        xp_reward: 10,
        hidden: false,
    },
    Achievement {
        id: "ten-tasks",
        name: "Getting Going",
        condition: AchievementCondition::TasksCompleted(10),
        rarity: Rarity::Common,
        xp_reward: 25,
        hidden: false,
    },
    Achievement {
        id: "hundred-tasks",
        name: "Centurion",
        condition: AchievementCondition::TasksCompleted(100),
        rarity: Rarity::Rare,
        xp_reward: 100,
        hidden: false,
    },
    Achievement {
        id: "thousand-tasks",
        name: "Unstoppable",
        condition: AchievementCondition::TasksCompleted(1000),
        rarity: Rarity::Legendary,
        xp_reward: 500,
        hidden: true,
    },
    Achievement {
        id: "streak-3",
        name: "Three in a Row",
        condition: AchievementCondition::StreakDays(3),
        rarity: Rarity::Common,
        xp_reward: 25,
        hidden: false,
    },
    Achievement {
        id: "streak-7",
        name: "Full Week",
        condition: AchievementCondition::StreakDays(7),
        rarity: Rarity::Uncommon,
        xp_reward: 50,
        hidden: false,
    },
    Achievement {
        id: "streak-30",
        name: "A Whole Month",
        condition: AchievementCondition::StreakDays(30),
        rarity: Rarity::Epic,
        xp_reward: 200,
        hidden: false,
    },
    Achievement {
        id: "streak-100",
        name: "Century Streak",
        condition: AchievementCondition::StreakDays(100),
        rarity: Rarity::Legendary,
        xp_reward: 500,
        hidden: true,
    },
    Achievement {
        id: "level-5",
        name: "Halfway Up",
        condition: AchievementCondition::LevelReached(5),
        rarity: Rarity::Uncommon,
        xp_reward: 50,
        hidden: false,
    },
    Achievement {
        id: "level-10",
        name: "Top of the Table",
        condition: AchievementCondition::LevelReached(10),
        rarity: Rarity::Epic,
        xp_reward: 250,
        hidden: false,
    },
    Achievement {
        id: "perfect-day",
        name: "Perfect Day",
        condition: AchievementCondition::PerfectDays(1),
        rarity: Rarity::Uncommon,
        xp_reward: 50,
        hidden: false,
    },
    Achievement {
        id: "perfect-week",
        name: "Seven Perfect Days",
        condition: AchievementCondition::PerfectDays(7),
        rarity: Rarity::Epic,
        xp_reward: 200,
        hidden: true,
    },
    Achievement {
        id: "first-chain",
        name: "Chain Reaction",
        condition: AchievementCondition::ChainsCompleted(1),
        rarity: Rarity::Common,
        xp_reward: 25,
        hidden: false,
    },
    Achievement {
        id: "ten-chains",
        name: "Link Master",
        condition: AchievementCondition::ChainsCompleted(10),
        rarity: Rarity::Rare,
        xp_reward: 100,
        hidden: false,
    },
    Achievement {
        id: "xp-10k",
        name: "Ten Thousand Club",
        condition: AchievementCondition::XpTotal(10_000),
        rarity: Rarity::Rare,
        xp_reward: 150,
        hidden: false,
    },
];

/// Scan the catalog for conditions newly satisfied by `stats`.
///
/// Entries already present in `unlocked` are skipped. The caller creates a
/// [`UserAchievement`] for each returned entry and applies its XP reward.
pub fn check_unlocks(
    stats: &UserStats,
    unlocked: &[UserAchievement],
) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|achievement| {
            achievement.condition.is_satisfied(stats)
                && !unlocked
                    .iter()
                    .any(|record| record.achievement_id == achievement.id)
        })
        .collect()
}
