//! Suggestion scoring.
//!
//! Scores a candidate task against the current context so the caller can
//! surface the best next action. Scoring is additive across independent
//! capped factors, each contributing a human-readable reason:
//!
//! 1. Priority: 40 (critical) down to 5 (someday)
//! 2. Energy match: 25 max, -5 per level of mismatch, floored at 0
//! 3. Time fit: 20 if the task fits the budget, 10 within 1.5x
//! 4. Location/context match: 15
//! 5. Mood match: 15
//! 6. Time-of-day preference: up to 10
//! 7. Due-date urgency: up to 30, independent of priority
//! 8. Quick win: 10 for tasks of five minutes or less
//!
//! No factor is negative, so the total never is. The scorer only looks at
//! pending tasks; [`suggest`] pre-filters by status.

use serde::{Deserialize, Serialize};

use crate::context::{Mood, TimeOfDay, UserContext};
use crate::random::RewardRng;
use crate::task::{ContextTag, Priority, Task, TaskStatus};

/// Maximum energy-match contribution.
const ENERGY_MATCH_MAX: i32 = 25;
/// Cost per level of energy mismatch.
const ENERGY_MISMATCH_STEP: i32 = 5;

/// Score and explanation for one candidate task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskScore {
    /// Scored task id
    pub task_id: String,
    /// Total suitability score
    pub score: i32,
    /// One entry per contributing factor
    pub reasons: Vec<String>,
}

/// Priority contribution (5-40 points).
pub fn priority_score(task: &Task) -> i32 {
    task.priority.score_weight()
}

/// Energy-match contribution (0-25 points).
///
/// Exact match earns the maximum; each level of difference costs 5.
/// Skipped entirely when the context has no reported energy.
pub fn energy_match_score(task: &Task, ctx: &UserContext) -> Option<i32> {
    let energy = ctx.energy?;
    let difference = (task.energy_required as i32 - energy as i32).abs();
    Some((ENERGY_MATCH_MAX - difference * ENERGY_MISMATCH_STEP).max(0))
}

/// Time-fit contribution (0, 10 or 20 points).
///
/// Full credit when the task fits the available budget entirely, half
/// credit when it fits within 1.5x of it.
pub fn time_fit_score(task: &Task, ctx: &UserContext) -> Option<i32> {
    let budget = ctx.available_minutes?;
    let estimate = task.estimated_minutes;
    if estimate <= budget {
        Some(20)
    } else if estimate as f64 <= budget as f64 * 1.5 {
        Some(10)
    } else {
        Some(0)
    }
}

/// Location/context-match contribution (0 or 15 points).
///
/// The `Anywhere` tag matches regardless of location; otherwise any of the
/// task's context tags workable from the current location earns the credit.
pub fn location_match_score(task: &Task, ctx: &UserContext) -> i32 {
    if task.context_tags.contains(&ContextTag::Anywhere) {
        return 15;
    }
    let Some(location) = ctx.location else {
        return 0;
    };
    let permitted = location.permitted_tags();
    if task.context_tags.iter().any(|tag| permitted.contains(tag)) {
        15
    } else {
        0
    }
}

/// Whether the task satisfies the mood's predicate.
pub fn mood_matches(task: &Task, mood: Mood) -> bool {
    match mood {
        Mood::Focused => task.estimated_minutes >= 25 || task.energy_required >= 4,
        Mood::Scattered => task.estimated_minutes <= 10,
        Mood::Creative => task
            .tags
            .iter()
            .any(|tag| matches!(tag.as_str(), "creative" | "brainstorm" | "writing" | "design")),
        Mood::Tired => task.energy_required == 1 && task.estimated_minutes <= 10,
        Mood::Anxious => {
            task.estimated_minutes <= 15 && !task.tags.iter().any(|tag| tag == "creative")
        }
        Mood::Motivated => matches!(task.priority, Priority::Critical | Priority::High),
    }
}

/// Mood-match contribution (0 or 15 points).
pub fn mood_score(task: &Task, ctx: &UserContext) -> Option<i32> {
    let mood = ctx.mood?;
    Some(if mood_matches(task, mood) { 15 } else { 0 })
}

/// Time-of-day preference (0-10 points).
///
/// Mornings favor demanding work, afternoons routine blocks, evenings
/// wind-down tasks, nights only the smallest ones.
pub fn time_of_day_score(task: &Task, ctx: &UserContext) -> i32 {
    match ctx.time_of_day {
        TimeOfDay::Morning => {
            if task.energy_required >= 4 {
                10
            } else if task.energy_required == 3 {
                5
            } else {
                0
            }
        }
        TimeOfDay::Afternoon => {
            if (15..=60).contains(&task.estimated_minutes) {
                5
            } else {
                0
            }
        }
        TimeOfDay::Evening => {
            if task.energy_required <= 2 {
                8
            } else {
                0
            }
        }
        TimeOfDay::Night => {
            if task.estimated_minutes <= 10 {
                5
            } else {
                0
            }
        }
    }
}

/// Due-date urgency (0-30 points), independent of priority.
pub fn due_urgency_score(task: &Task, ctx: &UserContext) -> Option<i32> {
    let due_at = task.due_at?;
    let now = ctx.timestamp;
    let score = if due_at < now {
        30 // Overdue
    } else {
        let hours_left = (due_at - now).num_hours();
        if hours_left < 24 {
            25
        } else if hours_left < 72 {
            15
        } else if hours_left < 24 * 7 {
            5
        } else {
            0
        }
    };
    Some(score)
}

/// Quick-win bonus (0 or 10 points) for five-minute tasks.
pub fn quick_win_score(task: &Task) -> i32 {
    if task.estimated_minutes <= 5 {
        10
    } else {
        0
    }
}

/// Score one task against the context.
///
/// Deterministic; the only inputs are the task and the snapshot. A task
/// with no due date, no context match and no mood match still scores from
/// priority and energy alone.
pub fn score_task(task: &Task, ctx: &UserContext) -> TaskScore {
    let mut score = 0;
    let mut reasons = Vec::new();

    let priority = priority_score(task);
    score += priority;
    reasons.push(format!("{} priority (+{})", task.priority.name(), priority));

    if let Some(energy) = energy_match_score(task, ctx) {
        if energy > 0 {
            score += energy;
            if energy == ENERGY_MATCH_MAX {
                reasons.push(format!("matches your energy (+{})", energy));
            } else {
                reasons.push(format!("close to your energy (+{})", energy));
            }
        }
    }

    if let Some(fit) = time_fit_score(task, ctx) {
        if fit == 20 {
            score += fit;
            reasons.push(format!("fits your available time (+{})", fit));
        } else if fit > 0 {
            score += fit;
            reasons.push(format!("close to your available time (+{})", fit));
        }
    }

    let location = location_match_score(task, ctx);
    if location > 0 {
        score += location;
        reasons.push(format!("doable where you are (+{})", location));
    }

    if let Some(mood) = mood_score(task, ctx) {
        if mood > 0 {
            score += mood;
            reasons.push(format!("suits your mood (+{})", mood));
        }
    }

    let tod = time_of_day_score(task, ctx);
    if tod > 0 {
        score += tod;
        reasons.push(format!("good for the {} (+{})", ctx.time_of_day.name(), tod));
    }

    if let Some(urgency) = due_urgency_score(task, ctx) {
        if urgency > 0 {
            score += urgency;
            let label = if urgency == 30 {
                "overdue"
            } else if urgency == 25 {
                "due within 24 hours"
            } else if urgency == 15 {
                "due within 3 days"
            } else {
                "due this week"
            };
            reasons.push(format!("{} (+{})", label, urgency));
        }
    }

    let quick = quick_win_score(task);
    if quick > 0 {
        score += quick;
        reasons.push(format!("quick win (+{})", quick));
    }

    TaskScore {
        task_id: task.id.clone(),
        score,
        reasons,
    }
}

/// Rank pending tasks for the current context.
///
/// Filters to pending tasks, scores each, sorts descending by score with a
/// stable sort (ties keep input order) and truncates to `limit`. A
/// scattered mood shuffles the candidate set first so ties land in a fresh
/// order each call; scores themselves stay deterministic.
pub fn suggest(
    tasks: &[Task],
    ctx: &UserContext,
    limit: usize,
    rng: &mut impl RewardRng,
) -> Vec<TaskScore> {
    let mut candidates: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Pending)
        .collect();

    if ctx.mood == Some(Mood::Scattered) {
        rng.shuffle(&mut candidates);
    }

    let mut scored: Vec<TaskScore> = candidates
        .iter()
        .map(|task| score_task(task, ctx))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}
