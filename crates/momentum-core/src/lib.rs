//! # Momentum Core Library
//!
//! This library provides the reward and scheduling decision engine for
//! Momentum, an ADHD-oriented personal productivity application. The host
//! application owns storage, UI and integrations; this crate is pure
//! computation over snapshots the caller passes in.
//!
//! ## Architecture
//!
//! - **Scoring**: ranks candidate tasks against a situational context
//!   (energy, location, mood, time budget, deadlines)
//! - **Reward**: computes XP for a completion -- fixed base, stacking
//!   bonuses, a variable-ratio random bonus and an independent loot roll
//! - **Streak**: consecutive-day continuity with a shield pool that absorbs
//!   missed days, and a capped UI-facing count
//! - **Day evaluation & recovery**: classifies finished days into five
//!   buckets and produces non-punitive re-engagement messaging after gaps
//!
//! All engines are stateless and synchronous. Wall-clock time and
//! randomness are injected ([`Clock`], [`RewardRng`]) so every decision is
//! reproducible under test.
//!
//! ## Key Components
//!
//! - [`suggest`] / [`score_task`]: task ranking
//! - [`RewardCalculator`]: XP and loot for completions
//! - [`Streak`]: the continuity state machine
//! - [`evaluate_day`] / [`welcome_back`] / [`analyze_streak`]: day boundary
//!   handling

pub mod achievements;
pub mod clock;
pub mod context;
pub mod day;
pub mod error;
pub mod random;
pub mod recovery;
pub mod reward;
pub mod scoring;
pub mod stats;
pub mod streak;
pub mod task;

pub use achievements::{check_unlocks, Achievement, AchievementCondition, UserAchievement, CATALOG};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{Location, Mood, TimeOfDay, UserContext};
pub use day::{evaluate_day, DayEvaluation, DayRating, DayType, MinimumViableDay};
pub use error::{CoreError, InvalidStateError, Result, ValidationError};
pub use random::{RewardRng, SeededRng, SequenceRng, ThreadRngSource};
pub use recovery::{analyze_streak, detect_patterns, welcome_back, DayPatterns, RecoveryMessage, StreakAnalysis};
pub use reward::{
    LevelUp, LootDrop, LootKind, Rarity, RewardCalculator, RewardConfig, XpBonus, XpReward,
};
pub use scoring::{score_task, suggest, TaskScore};
pub use stats::{level_for_xp, xp_to_next_level, UserStats, LEVEL_THRESHOLDS};
pub use streak::{Streak, StreakAdvance, StreakKind, StreakOutcome, VISIBLE_STREAK_CAP};
pub use task::{ChainLink, ContextTag, Priority, Task, TaskStatus};
