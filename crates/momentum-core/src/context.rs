//! Situational context snapshot.
//!
//! [`UserContext`] is an ephemeral view of the user's state used by the
//! suggestion scorer. Time-of-day and day-of-week are always recomputed from
//! the injected clock at capture time, never carried over from a previous
//! snapshot.

use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::task::{validate_energy, ContextTag};

/// Wall-clock bucket of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-04:59
    Night,
}

impl TimeOfDay {
    /// Classify a wall-clock hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// At home
    Home,
    /// At the workplace
    Work,
    /// Out running errands
    Errand,
}

impl Location {
    /// Context tags workable from this location.
    ///
    /// `Anywhere` is always workable and is also matched directly by the
    /// scorer, independent of location.
    pub fn permitted_tags(&self) -> &'static [ContextTag] {
        match self {
            Location::Home => &[
                ContextTag::Home,
                ContextTag::Anywhere,
                ContextTag::Phone,
                ContextTag::Computer,
            ],
            Location::Work => &[
                ContextTag::Work,
                ContextTag::Anywhere,
                ContextTag::Phone,
                ContextTag::Computer,
            ],
            Location::Errand => &[ContextTag::Errand, ContextTag::Anywhere, ContextTag::Phone],
        }
    }
}

/// Self-reported mood, used by the suggestion scorer's mood predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Ready for deep work
    Focused,
    /// Attention is bouncing; favor short tasks and variety
    Scattered,
    /// In a making mood
    Creative,
    /// Low battery
    Tired,
    /// Needs small, contained wins
    Anxious,
    /// Ready to tackle the big stuff
    Motivated,
}

/// Ephemeral snapshot of the user's situational state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    /// When this snapshot was captured
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Derived wall-clock bucket
    pub time_of_day: TimeOfDay,
    /// Derived day of week
    pub weekday: Weekday,
    /// Current location, if known
    pub location: Option<Location>,
    /// Current energy level (1-5), if reported
    pub energy: Option<u8>,
    /// Current mood, if reported
    pub mood: Option<Mood>,
    /// Minutes available before the next commitment
    pub available_minutes: Option<u32>,
    /// Whether focus mode is on
    pub focus_mode: bool,
}

impl UserContext {
    /// Capture a fresh snapshot from the clock.
    pub fn capture(clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            timestamp: now,
            time_of_day: TimeOfDay::from_hour(now.hour()),
            weekday: now.weekday(),
            location: None,
            energy: None,
            mood: None,
            available_minutes: None,
            focus_mode: false,
        }
    }

    /// Recompute the derived time fields from the clock.
    ///
    /// Situational fields (location, energy, mood) are kept; time-of-day and
    /// weekday are never trusted from the previous snapshot.
    pub fn refresh(&mut self, clock: &dyn Clock) {
        let now = clock.now();
        self.timestamp = now;
        self.time_of_day = TimeOfDay::from_hour(now.hour());
        self.weekday = now.weekday();
    }

    /// Set the reported energy level, validating the 1-5 range.
    pub fn with_energy(mut self, energy: i64) -> Result<Self> {
        self.energy = Some(validate_energy(energy)?);
        Ok(self)
    }

    /// Set the current location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the current mood.
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Set the available-minutes budget.
    pub fn with_available_minutes(mut self, minutes: u32) -> Self {
        self.available_minutes = Some(minutes);
        self
    }

    /// Set the focus-mode flag.
    pub fn with_focus_mode(mut self, on: bool) -> Self {
        self.focus_mode = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(3), TimeOfDay::Night);
    }

    #[test]
    fn test_capture_derives_time_fields() {
        // 2025-06-02 is a Monday; 09:30 UTC is morning
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let ctx = UserContext::capture(&FixedClock::new(at));
        assert_eq!(ctx.time_of_day, TimeOfDay::Morning);
        assert_eq!(ctx.weekday, Weekday::Mon);
        assert!(ctx.energy.is_none());
        assert!(!ctx.focus_mode);
    }

    #[test]
    fn test_refresh_recomputes_not_carries() {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let mut clock = FixedClock::new(at);
        let mut ctx = UserContext::capture(&clock)
            .with_mood(Mood::Focused)
            .with_available_minutes(45);

        clock.advance(Duration::hours(9)); // 18:30, Evening
        ctx.refresh(&clock);

        assert_eq!(ctx.time_of_day, TimeOfDay::Evening);
        // Situational fields survive a refresh
        assert_eq!(ctx.mood, Some(Mood::Focused));
        assert_eq!(ctx.available_minutes, Some(45));
    }

    #[test]
    fn test_energy_validation() {
        let ctx = UserContext::capture(&FixedClock::new(Utc::now()));
        assert!(ctx.clone().with_energy(0).is_err());
        assert!(ctx.clone().with_energy(6).is_err());
        assert_eq!(ctx.with_energy(3).unwrap().energy, Some(3));
    }

    #[test]
    fn test_location_permits_anywhere() {
        for location in [Location::Home, Location::Work, Location::Errand] {
            assert!(location.permitted_tags().contains(&ContextTag::Anywhere));
        }
    }
}
