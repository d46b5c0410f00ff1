//! XP reward calculation.
//!
//! Computes the XP delta for a completed task: an immutable base from the
//! task's priority plus independently evaluated bonuses, with a
//! variable-ratio random bonus and an independent loot roll layered on top.
//! The unpredictable parts are the point, not an accident: rewards on an
//! unpredictable schedule sustain the habit loop better than fixed ones.
//!
//! Called exactly once per completion, after the task's status transition.
//! Nothing in this module fails; a bonus whose condition did not hold is
//! absent from the list, never a zero entry.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::random::RewardRng;
use crate::stats::{level_for_xp, UserStats};
use crate::streak::Streak;
use crate::task::{Priority, Task};

/// Variable-ratio tiers: cumulative probability thresholds and payouts.
/// 5% pay 50, next 10% pay 25, next 15% pay 10, the rest nothing.
const VARIABLE_RATIO_TIERS: [(f64, u32); 3] = [(0.05, 50), (0.15, 25), (0.30, 10)];

/// Tunables for the reward formula. Defaults carry the production values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Early-bird bonus for completions between 05:00 and 08:59
    pub early_bird_bonus: u32,
    /// Night-owl bonus for completions between 22:00 and 04:59
    pub night_owl_bonus: u32,
    /// Bonus for beating a due date by more than `deadline_beat_hours`
    pub deadline_beat_bonus: u32,
    /// Hours ahead of the due date that count as beating it
    pub deadline_beat_hours: i64,
    /// XP per streak day
    pub streak_bonus_per_day: u32,
    /// Streak days counted toward the bonus
    pub streak_bonus_cap_days: u32,
    /// Bonus for completing a critical-priority task
    pub critical_bonus: u32,
    /// Bonus for finishing under the estimate
    pub speed_bonus: u32,
    /// Loot chance at level 0
    pub base_loot_chance: f64,
    /// Additional loot chance per level
    pub loot_chance_per_level: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            early_bird_bonus: 25,
            night_owl_bonus: 25,
            deadline_beat_bonus: 15,
            deadline_beat_hours: 24,
            streak_bonus_per_day: 5,
            streak_bonus_cap_days: 7,
            critical_bonus: 10,
            speed_bonus: 5,
            base_loot_chance: 0.15,
            loot_chance_per_level: 0.01,
        }
    }
}

/// One bonus contribution with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpBonus {
    /// Why the bonus applied
    pub reason: String,
    /// Amount contributed
    pub amount: u32,
}

/// Level change detected during a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// Level before the reward
    pub from: u32,
    /// Level after the reward
    pub to: u32,
}

/// Loot rarity, rarest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// What a loot drop grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootKind {
    /// Extra XP on top of the reward
    BonusXp,
    /// Streak shields to bank
    StreakShield,
}

/// Ephemeral loot record. Informational: the caller applies the grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    /// What the drop grants
    pub kind: LootKind,
    /// XP amount or shield count, per `kind`
    pub value: u32,
    /// Task that produced the drop
    pub task_id: String,
    /// Drop rarity
    pub rarity: Rarity,
}

/// Complete reward for one task completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpReward {
    /// The task's immutable base XP
    pub base: u32,
    /// All bonuses that applied
    pub bonuses: Vec<XpBonus>,
    /// `base` plus the sum of all bonus amounts
    pub total: u32,
    /// Independent loot roll result
    pub loot: Option<LootDrop>,
    /// Level change implied by applying `total` to the stats
    pub level_up: Option<LevelUp>,
}

/// Reward calculator.
pub struct RewardCalculator {
    config: RewardConfig,
}

impl RewardCalculator {
    /// Create a calculator with the default config.
    pub fn new() -> Self {
        Self {
            config: RewardConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Compute the XP reward for a completed task.
    ///
    /// A missing streak or missing actual duration simply omits the
    /// corresponding bonus. The variable-ratio bonus and the loot roll each
    /// consume independent draws from `rng`.
    pub fn calculate_xp(
        &self,
        task: &Task,
        stats: &UserStats,
        streak: Option<&Streak>,
        rng: &mut dyn RewardRng,
    ) -> XpReward {
        let base = task.base_xp;
        let mut bonuses = Vec::new();

        if let Some(completed_at) = task.completed_at {
            let hour = completed_at.hour();
            if (5..9).contains(&hour) {
                bonuses.push(XpBonus {
                    reason: "early bird".to_string(),
                    amount: self.config.early_bird_bonus,
                });
            }
            if hour >= 22 || hour < 5 {
                bonuses.push(XpBonus {
                    reason: "night owl".to_string(),
                    amount: self.config.night_owl_bonus,
                });
            }
            if let Some(due_at) = task.due_at {
                let lead = due_at - completed_at;
                if lead.num_hours() > self.config.deadline_beat_hours {
                    bonuses.push(XpBonus {
                        reason: "beat the deadline".to_string(),
                        amount: self.config.deadline_beat_bonus,
                    });
                }
            }
        }

        if let Some(streak) = streak {
            if streak.current_count > 0 {
                let days = streak.current_count.min(self.config.streak_bonus_cap_days);
                bonuses.push(XpBonus {
                    reason: format!("{}-day streak", streak.current_count),
                    amount: days * self.config.streak_bonus_per_day,
                });
            }
        }

        if task.priority == Priority::Critical {
            bonuses.push(XpBonus {
                reason: "critical task done".to_string(),
                amount: self.config.critical_bonus,
            });
        }

        if task.beat_estimate() {
            bonuses.push(XpBonus {
                reason: "faster than estimated".to_string(),
                amount: self.config.speed_bonus,
            });
        }

        let roll = rng.next_f64();
        for (threshold, amount) in VARIABLE_RATIO_TIERS {
            if roll < threshold {
                bonuses.push(XpBonus {
                    reason: "lucky bonus".to_string(),
                    amount,
                });
                break;
            }
        }

        let total = base + bonuses.iter().map(|bonus| bonus.amount).sum::<u32>();

        let level_before = level_for_xp(stats.total_xp);
        let level_after = level_for_xp(stats.total_xp + total as u64);
        let level_up = if level_after > level_before {
            tracing::debug!(from = level_before, to = level_after, "level up");
            Some(LevelUp {
                from: level_before,
                to: level_after,
            })
        } else {
            None
        };

        let loot = self.roll_loot(task, stats.level, rng);

        XpReward {
            base,
            bonuses,
            total,
            loot,
            level_up,
        }
    }

    /// Independent loot roll. Higher levels drop loot more often.
    fn roll_loot(&self, task: &Task, level: u32, rng: &mut dyn RewardRng) -> Option<LootDrop> {
        let chance = self.config.base_loot_chance + level as f64 * self.config.loot_chance_per_level;
        if rng.next_f64() >= chance {
            return None;
        }

        let rarity_roll = rng.next_f64();
        let rarity = if rarity_roll < 0.001 {
            Rarity::Legendary
        } else if rarity_roll < 0.01 {
            Rarity::Epic
        } else if rarity_roll < 0.05 {
            Rarity::Rare
        } else if rarity_roll < 0.30 {
            Rarity::Uncommon
        } else {
            Rarity::Common
        };

        // Legendary and epic alternate between shields and a large XP grant;
        // lower rarities are flat XP.
        let (kind, value) = match rarity {
            Rarity::Legendary => {
                if rng.next_f64() < 0.5 {
                    (LootKind::StreakShield, 3)
                } else {
                    (LootKind::BonusXp, 100)
                }
            }
            Rarity::Epic => {
                if rng.next_f64() < 0.5 {
                    (LootKind::StreakShield, 2)
                } else {
                    (LootKind::BonusXp, 75)
                }
            }
            Rarity::Rare => (LootKind::BonusXp, 50),
            Rarity::Uncommon => (LootKind::BonusXp, 25),
            Rarity::Common => (LootKind::BonusXp, 10),
        };

        tracing::debug!(rarity = rarity.name(), value, "loot drop");
        Some(LootDrop {
            kind,
            value,
            task_id: task.id.clone(),
            rarity,
        })
    }
}

impl Default for RewardCalculator {
    fn default() -> Self {
        Self::new()
    }
}
