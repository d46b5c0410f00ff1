//! Day evaluation.
//!
//! Classifies a finished day into one of five qualitative buckets from the
//! completion rate and minimum-viable-day satisfaction. The buckets are
//! deliberately generous at the bottom: a single completed task is never a
//! zero day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

/// Qualitative day classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// 90%+ completion with a real plan (3+ tasks)
    Perfect,
    /// 70%+ completion
    Good,
    /// 40%+ completion, or at least two tasks done
    Okay,
    /// The minimum viable day was hit, or at least one task done
    MinimumViable,
    /// Nothing qualifying happened
    Zero,
}

impl DayType {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            DayType::Perfect => "perfect",
            DayType::Good => "good",
            DayType::Okay => "okay",
            DayType::MinimumViable => "minimum_viable",
            DayType::Zero => "zero",
        }
    }
}

/// The configured set of tasks whose completion of any one keeps a day from
/// being zero. Entries may name task ids or chain ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinimumViableDay {
    /// Task or chain ids that satisfy the MVD
    pub task_ids: Vec<String>,
}

impl MinimumViableDay {
    /// Create an MVD over the given ids.
    pub fn new(task_ids: Vec<String>) -> Self {
        Self { task_ids }
    }

    /// Whether any completed task (or a member of a listed chain) satisfies
    /// the MVD.
    pub fn is_achieved(&self, tasks: &[Task]) -> bool {
        tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .any(|task| {
                self.task_ids.contains(&task.id)
                    || task
                        .chain
                        .as_ref()
                        .is_some_and(|link| self.task_ids.contains(&link.chain_id))
            })
    }
}

/// Result of evaluating one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEvaluation {
    /// Classification bucket
    pub day_type: DayType,
    /// Tasks completed that day
    pub tasks_completed: u32,
    /// Tasks planned (skipped tasks excluded)
    pub tasks_planned: u32,
    /// `tasks_completed / tasks_planned`, 0 when nothing was planned
    pub completion_rate: f64,
    /// Whether the minimum viable day was satisfied
    pub mvd_achieved: bool,
    /// Encouraging summary for the UI
    pub message: String,
    /// XP earned from the day's completions
    pub xp_earned: u64,
}

/// Immutable historical record of one day. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRating {
    /// Calendar date
    pub date: NaiveDate,
    /// Classification bucket
    pub day_type: DayType,
    /// Reported energy that day (1-5)
    pub energy: Option<u8>,
    /// Tasks completed
    pub tasks_completed: u32,
    /// XP earned
    pub xp_earned: u64,
    /// Free-text note
    pub note: Option<String>,
}

impl DayRating {
    /// Record an evaluation as a historical rating.
    pub fn from_evaluation(date: NaiveDate, evaluation: &DayEvaluation, energy: Option<u8>) -> Self {
        Self {
            date,
            day_type: evaluation.day_type,
            energy,
            tasks_completed: evaluation.tasks_completed,
            xp_earned: evaluation.xp_earned,
            note: None,
        }
    }
}

/// Classify a finished day.
///
/// Thresholds are evaluated in order, first match wins. Skipped tasks are
/// excluded from the planned denominator; an empty plan is a rate of 0 and
/// falls through to the MVD/zero branches, never a division error.
pub fn evaluate_day(tasks: &[Task], mvd: Option<&MinimumViableDay>) -> DayEvaluation {
    let tasks_planned = tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Skipped)
        .count() as u32;
    let completed: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .collect();
    let tasks_completed = completed.len() as u32;

    let completion_rate = if tasks_planned == 0 {
        0.0
    } else {
        tasks_completed as f64 / tasks_planned as f64
    };

    let mvd_achieved = mvd.is_some_and(|mvd| mvd.is_achieved(tasks));
    let xp_earned: u64 = completed.iter().map(|task| task.base_xp as u64).sum();

    let day_type = if completion_rate >= 0.9 && tasks_planned >= 3 {
        DayType::Perfect
    } else if completion_rate >= 0.7 {
        DayType::Good
    } else if completion_rate >= 0.4 || tasks_completed >= 2 {
        DayType::Okay
    } else if mvd_achieved || tasks_completed >= 1 {
        DayType::MinimumViable
    } else {
        DayType::Zero
    };

    let message = match day_type {
        DayType::Perfect => format!(
            "Perfect day -- {} of {} done. That was the whole plan.",
            tasks_completed, tasks_planned
        ),
        DayType::Good => format!(
            "Strong day: {} of {} done.",
            tasks_completed, tasks_planned
        ),
        DayType::Okay => format!("Solid progress: {} done.", tasks_completed),
        DayType::MinimumViable => {
            "You kept the day alive. That counts.".to_string()
        }
        DayType::Zero => "Today is logged. Tomorrow is a fresh start.".to_string(),
    };

    DayEvaluation {
        day_type,
        tasks_completed,
        tasks_planned,
        completion_rate,
        mvd_achieved,
        message,
        xp_earned,
    }
}
