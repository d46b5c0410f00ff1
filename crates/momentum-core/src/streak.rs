//! Streak ledger.
//!
//! Tracks consecutive-day continuity with a finite pool of shields that can
//! absorb missed days. The state machine is implicit in the
//! `current_count`/`last_activity_date` pair: zero, active (last activity
//! today or yesterday), broken-but-recoverable (gap covered by shields), or
//! broken. Advancement happens once per day-boundary evaluation, never per
//! task.
//!
//! The UI-facing count is capped at [`VISIBLE_STREAK_CAP`] so a broken long
//! streak never reads as a three-digit loss; the true count stays internal
//! for longest-streak bookkeeping and achievement thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{InvalidStateError, Result};

/// Cap applied to the UI-facing streak count.
pub const VISIBLE_STREAK_CAP: u32 = 7;

/// Which continuity metric a streak tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    /// Any qualifying activity during the day
    DailyActivity,
    /// Completing a full task chain
    ChainCompletion,
    /// Hitting the daily focus-time target
    FocusTime,
}

/// One continuity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Streak {
    /// Metric this streak tracks
    pub kind: StreakKind,
    /// True consecutive-day count
    pub current_count: u32,
    /// Longest count ever reached
    pub longest_count: u32,
    /// Last qualifying activity, if any
    pub last_activity_date: Option<DateTime<Utc>>,
    /// Shields ready to absorb missed days
    pub shields_available: u32,
    /// Shields consumed over the streak's lifetime
    pub shields_used: u32,
    /// When the current run started
    pub started_at: DateTime<Utc>,
}

/// What an advancement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// First qualifying day of a fresh streak
    Started,
    /// Today was already recorded; activity date refreshed
    AlreadyRecorded,
    /// Consecutive day, count incremented
    Extended,
    /// Gap absorbed by shields, count incremented
    SurvivedWithShields,
    /// Gap exceeded the shield pool, count restarted
    Reset,
    /// Below the daily minimum; nothing applied
    NoChange,
}

/// Record of one advancement, for the caller's log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakAdvance {
    /// What happened
    pub outcome: StreakOutcome,
    /// Count before the advancement
    pub count_before: u32,
    /// Count after the advancement
    pub count_after: u32,
    /// Shields consumed by this advancement
    pub shields_consumed: u32,
}

impl Streak {
    /// Create an empty streak.
    pub fn new(kind: StreakKind, clock: &dyn Clock) -> Self {
        Self {
            kind,
            current_count: 0,
            longest_count: 0,
            last_activity_date: None,
            shields_available: 0,
            shields_used: 0,
            started_at: clock.now(),
        }
    }

    /// UI-facing count, capped at [`VISIBLE_STREAK_CAP`].
    pub fn visible_count(&self) -> u32 {
        self.current_count.min(VISIBLE_STREAK_CAP)
    }

    /// Bank additional shields. Grants are additive; shields never expire.
    pub fn add_shields(&mut self, count: u32) {
        self.shields_available += count;
    }

    /// Advance the streak at a day boundary.
    ///
    /// Calendar dates are compared, not timestamps, so a 23:50 activity
    /// followed by a 00:10 one still counts as consecutive days. A
    /// `last_activity_date` ahead of the clock is a caller error.
    pub fn advance(
        &mut self,
        tasks_completed_today: u32,
        minimum_required: u32,
        clock: &dyn Clock,
    ) -> Result<StreakAdvance> {
        let now = clock.now();
        let qualifies = tasks_completed_today >= minimum_required;
        let count_before = self.current_count;

        let Some(last_activity) = self.last_activity_date else {
            // Fresh streak: nothing recorded yet
            if qualifies {
                self.current_count = 1;
                self.longest_count = self.longest_count.max(1);
                self.last_activity_date = Some(now);
                self.started_at = now;
                return Ok(self.advance_record(StreakOutcome::Started, count_before, 0));
            }
            return Ok(self.advance_record(StreakOutcome::NoChange, count_before, 0));
        };

        if last_activity > now {
            return Err(InvalidStateError::ActivityInFuture {
                last_activity,
                now,
            }
            .into());
        }

        let days_since_activity = now
            .date_naive()
            .signed_duration_since(last_activity.date_naive())
            .num_days();

        match days_since_activity {
            0 => {
                if qualifies {
                    self.last_activity_date = Some(now);
                    Ok(self.advance_record(StreakOutcome::AlreadyRecorded, count_before, 0))
                } else {
                    Ok(self.advance_record(StreakOutcome::NoChange, count_before, 0))
                }
            }
            1 => {
                if qualifies {
                    self.current_count += 1;
                    self.longest_count = self.longest_count.max(self.current_count);
                    self.last_activity_date = Some(now);
                    Ok(self.advance_record(StreakOutcome::Extended, count_before, 0))
                } else {
                    // Still at risk; a later advancement settles it via the gap rule
                    Ok(self.advance_record(StreakOutcome::NoChange, count_before, 0))
                }
            }
            _ => {
                let missed_days = (days_since_activity - 1) as u32;
                if self.shields_available >= missed_days {
                    self.shields_available -= missed_days;
                    self.shields_used += missed_days;
                    self.current_count += 1;
                    self.longest_count = self.longest_count.max(self.current_count);
                    self.last_activity_date = Some(now);
                    tracing::debug!(
                        missed_days,
                        remaining = self.shields_available,
                        "streak survived on shields"
                    );
                    Ok(self.advance_record(
                        StreakOutcome::SurvivedWithShields,
                        count_before,
                        missed_days,
                    ))
                } else {
                    tracing::debug!(missed_days, count_before, "streak reset");
                    self.current_count = if qualifies { 1 } else { 0 };
                    self.started_at = now;
                    if qualifies {
                        self.last_activity_date = Some(now);
                    }
                    Ok(self.advance_record(StreakOutcome::Reset, count_before, 0))
                }
            }
        }
    }

    fn advance_record(
        &self,
        outcome: StreakOutcome,
        count_before: u32,
        shields_consumed: u32,
    ) -> StreakAdvance {
        StreakAdvance {
            outcome,
            count_before,
            count_after: self.current_count,
            shields_consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap() + Duration::days(offset)
    }

    fn active_streak(count: u32, last_offset: i64, shields: u32) -> Streak {
        Streak {
            kind: StreakKind::DailyActivity,
            current_count: count,
            longest_count: count,
            last_activity_date: Some(day(last_offset)),
            shields_available: shields,
            shields_used: 0,
            started_at: day(last_offset - count as i64),
        }
    }

    #[test]
    fn test_fresh_streak_starts_at_one() {
        let clock = FixedClock::new(day(0));
        let mut streak = Streak::new(StreakKind::DailyActivity, &clock);
        let advance = streak.advance(2, 1, &clock).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Started);
        assert_eq!(streak.current_count, 1);
        assert_eq!(streak.longest_count, 1);
    }

    #[test]
    fn test_fresh_streak_below_minimum_stays_zero() {
        let clock = FixedClock::new(day(0));
        let mut streak = Streak::new(StreakKind::DailyActivity, &clock);
        let advance = streak.advance(0, 1, &clock).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::NoChange);
        assert_eq!(streak.current_count, 0);
    }

    #[test]
    fn test_same_day_refreshes_without_increment() {
        let mut streak = active_streak(3, 0, 0);
        let later = FixedClock::new(day(0) + Duration::hours(5));
        let advance = streak.advance(1, 1, &later).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::AlreadyRecorded);
        assert_eq!(streak.current_count, 3);
        assert_eq!(streak.last_activity_date, Some(later.now()));
    }

    #[test]
    fn test_consecutive_day_increments() {
        let mut streak = active_streak(3, -1, 0);
        let advance = streak.advance(1, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Extended);
        assert_eq!(streak.current_count, 4);
        assert_eq!(streak.longest_count, 4);
    }

    #[test]
    fn test_consecutive_day_below_minimum_holds() {
        let mut streak = active_streak(3, -1, 0);
        let advance = streak.advance(0, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::NoChange);
        assert_eq!(streak.current_count, 3);
        assert_eq!(streak.last_activity_date, Some(day(-1)));
    }

    #[test]
    fn test_one_missed_day_covered_by_shield() {
        // currentCount=5, one shield, last activity 2 days ago: gap of 1
        let mut streak = active_streak(5, -2, 1);
        let advance = streak.advance(1, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::SurvivedWithShields);
        assert_eq!(advance.shields_consumed, 1);
        assert_eq!(streak.current_count, 6);
        assert_eq!(streak.shields_available, 0);
        assert_eq!(streak.shields_used, 1);
    }

    #[test]
    fn test_shield_conservation() {
        let mut streak = active_streak(5, -4, 5);
        let pool_before = streak.shields_available + streak.shields_used;
        streak.advance(1, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(streak.shields_available + streak.shields_used, pool_before);
        assert_eq!(streak.shields_used, 3); // Gap of 3 missed days
    }

    #[test]
    fn test_gap_beyond_shields_resets_to_one() {
        // Three-day gap, no shields, today qualifies
        let mut streak = active_streak(5, -4, 0);
        let advance = streak.advance(1, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Reset);
        assert_eq!(streak.current_count, 1);
        assert_eq!(streak.started_at, day(0));
        assert_eq!(streak.longest_count, 5); // History preserved
    }

    #[test]
    fn test_gap_beyond_shields_without_activity_resets_to_zero() {
        let mut streak = active_streak(5, -4, 0);
        let advance = streak.advance(0, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Reset);
        assert_eq!(streak.current_count, 0);
    }

    #[test]
    fn test_partial_shield_pool_does_not_cover() {
        // Gap of 3 missed days, only 2 shields: reset, shields untouched
        let mut streak = active_streak(5, -4, 2);
        let advance = streak.advance(1, 1, &FixedClock::new(day(0))).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Reset);
        assert_eq!(streak.shields_available, 2);
        assert_eq!(streak.shields_used, 0);
    }

    #[test]
    fn test_future_activity_date_is_invalid_state() {
        let mut streak = active_streak(5, 1, 0);
        let err = streak.advance(1, 1, &FixedClock::new(day(0))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::InvalidState(InvalidStateError::ActivityInFuture { .. })
        ));
    }

    #[test]
    fn test_visible_count_caps_at_seven() {
        let mut streak = active_streak(3, 0, 0);
        assert_eq!(streak.visible_count(), 3);
        streak.current_count = 7;
        assert_eq!(streak.visible_count(), 7);
        streak.current_count = 100;
        assert_eq!(streak.visible_count(), 7);
    }

    #[test]
    fn test_add_shields_is_additive() {
        let clock = FixedClock::new(day(0));
        let mut streak = Streak::new(StreakKind::FocusTime, &clock);
        streak.add_shields(2);
        streak.add_shields(3);
        assert_eq!(streak.shields_available, 5);
    }

    #[test]
    fn test_calendar_dates_not_timestamps() {
        // 23:50 yesterday then 00:10 today is a consecutive day
        let last = Utc.with_ymd_and_hms(2025, 6, 1, 23, 50, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 0, 10, 0).unwrap();
        let mut streak = active_streak(2, 0, 0);
        streak.last_activity_date = Some(last);
        let advance = streak.advance(1, 1, &FixedClock::new(now)).unwrap();
        assert_eq!(advance.outcome, StreakOutcome::Extended);
        assert_eq!(streak.current_count, 3);
    }
}
