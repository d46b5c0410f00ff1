//! Re-engagement after gaps.
//!
//! Produces welcome-back messaging after an absence of any length and
//! recomputes streak state from the historical day log. The copy here is a
//! content table, but its tone is a hard requirement: no loss framing, no
//! shame, whatever the gap. The streak either quietly survives on shields
//! or quietly starts again.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::day::{DayRating, DayType};

/// Welcome-back copy for one gap length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryMessage {
    /// Headline
    pub message: String,
    /// Supporting line
    pub sub_message: String,
    /// One concrete next step
    pub suggested_action: String,
}

/// Look up the welcome-back copy for a gap of `days_missed` days.
///
/// Breakpoints: 0, 1, up to 3, up to 7, up to 30, beyond. The copy gets
/// more reassuring as the gap grows, never less.
pub fn welcome_back(days_missed: u32) -> RecoveryMessage {
    let (message, sub_message, suggested_action) = match days_missed {
        0 => (
            "Right on schedule.",
            "Momentum is already on your side today.",
            "Pick up where you left off.",
        ),
        1 => (
            "Welcome back!",
            "One day off is rest, not a setback.",
            "Knock out one quick task to get rolling.",
        ),
        2..=3 => (
            "Good to see you.",
            "A few days away happens to everyone. Everything is where you left it.",
            "Start with the smallest thing on your list.",
        ),
        4..=7 => (
            "Hey, you're here. That's the hard part.",
            "The list kept itself warm. Nothing expired.",
            "Pick one five-minute task. Just one.",
        ),
        8..=30 => (
            "Welcome back -- genuinely glad you're here.",
            "Life got big for a while. The app waited.",
            "Do one tiny thing today. Tomorrow can be tiny too.",
        ),
        _ => (
            "A fresh start, on your terms.",
            "However long it's been, today counts the same as any other day.",
            "Choose a single small task and call that a win.",
        ),
    };

    RecoveryMessage {
        message: message.to_string(),
        sub_message: sub_message.to_string(),
        suggested_action: suggested_action.to_string(),
    }
}

/// Streak state recomputed from the day-rating log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakAnalysis {
    /// Consecutive non-zero days ending at the most recent rating
    pub current_streak: u32,
    /// Days between today and the last non-zero day
    pub days_since_last_activity: i64,
    /// Whether the gap exceeds one day
    pub is_streak_broken: bool,
    /// Whether the available shields could cover the gap
    pub can_recover: bool,
    /// Welcome-back headline for the gap
    pub recovery_message: String,
}

/// Recompute streak state from the append-only day log.
///
/// Walks ratings most-recent-first, counting consecutive non-zero days and
/// stopping at the first zero-type day or at a gap of more than one day
/// between ratings. Recovery is possible when the gap exceeds one day and
/// the shield pool covers the missed days.
pub fn analyze_streak(
    ratings: &[DayRating],
    shields_available: u32,
    clock: &dyn Clock,
) -> StreakAnalysis {
    let today = clock.now().date_naive();

    let mut sorted: Vec<&DayRating> = ratings.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut current_streak = 0u32;
    let mut previous_date: Option<chrono::NaiveDate> = None;
    for rating in &sorted {
        if rating.day_type == DayType::Zero {
            break;
        }
        if let Some(previous) = previous_date {
            let gap = (previous - rating.date).num_days();
            if gap > 1 {
                break;
            }
        }
        current_streak += 1;
        previous_date = Some(rating.date);
    }

    let days_since_last_activity = sorted
        .iter()
        .find(|rating| rating.day_type != DayType::Zero)
        .map(|rating| (today - rating.date).num_days())
        .unwrap_or(0);

    let gap = days_since_last_activity;
    let is_streak_broken = gap > 1;
    let can_recover = is_streak_broken && shields_available as i64 >= gap - 1;

    StreakAnalysis {
        current_streak,
        days_since_last_activity,
        is_streak_broken,
        can_recover,
        recovery_message: welcome_back(gap.max(0) as u32).message,
    }
}

/// Advisory patterns observed in the day log. Best-effort only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPatterns {
    /// Weekday with the highest average XP
    pub best_weekday: Option<chrono::Weekday>,
    /// Whether weekends are mostly zero days
    pub weekend_zero_days: bool,
}

/// Detect coarse weekly patterns in the day log.
///
/// Heuristic output for nudging copy, not a contract: the best weekday is
/// the one with the highest average XP over the ratings present, and the
/// weekend flag trips when at least half of the logged weekend days are
/// zero days (minimum two weekend ratings).
pub fn detect_patterns(ratings: &[DayRating]) -> DayPatterns {
    let mut xp_by_weekday: [(u64, u32); 7] = [(0, 0); 7];
    let mut weekend_total = 0u32;
    let mut weekend_zero = 0u32;

    for rating in ratings {
        let weekday = rating.date.weekday();
        let slot = &mut xp_by_weekday[weekday.num_days_from_monday() as usize];
        slot.0 += rating.xp_earned;
        slot.1 += 1;

        if matches!(weekday, chrono::Weekday::Sat | chrono::Weekday::Sun) {
            weekend_total += 1;
            if rating.day_type == DayType::Zero {
                weekend_zero += 1;
            }
        }
    }

    let best_weekday = xp_by_weekday
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .max_by(|(_, (xp_a, count_a)), (_, (xp_b, count_b))| {
            let avg_a = *xp_a as f64 / *count_a as f64;
            let avg_b = *xp_b as f64 / *count_b as f64;
            avg_a.partial_cmp(&avg_b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .and_then(|(index, _)| weekday_from_monday_index(index));

    DayPatterns {
        best_weekday,
        weekend_zero_days: weekend_total >= 2 && weekend_zero * 2 >= weekend_total,
    }
}

fn weekday_from_monday_index(index: usize) -> Option<chrono::Weekday> {
    use chrono::Weekday::*;
    [Mon, Tue, Wed, Thu, Fri, Sat, Sun].get(index).copied()
}
