//! Round-trip tests for the snapshot types the host application persists.

use chrono::{Duration, TimeZone, Utc};
use momentum_core::{
    Clock, ContextTag, DayRating, DayType, FixedClock, Mood, Priority, Streak, StreakKind, Task,
    UserContext, UserStats,
};

#[test]
fn test_task_round_trips() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap());
    let mut task = Task::new("Invoice Acme Co", Priority::High, 30, 3, &clock)
        .unwrap()
        .with_due(clock.now() + Duration::days(2))
        .with_context_tags(vec![ContextTag::Computer, ContextTag::Anywhere])
        .with_tags(vec!["consulting".to_string()]);
    task.complete(Some(25), &clock).unwrap();

    let json = serde_json::to_string(&task).unwrap();
    let back: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, task.id);
    assert_eq!(back.status, task.status);
    assert_eq!(back.base_xp, task.base_xp);
    assert_eq!(back.actual_minutes, Some(25));
    assert_eq!(back.context_tags, task.context_tags);
}

#[test]
fn test_task_tolerates_missing_tag_fields() {
    // Older snapshots may predate the tag lists
    let json = r#"{
        "id": "task-1",
        "title": "Legacy task",
        "status": "pending",
        "priority": "medium",
        "estimated_minutes": 20,
        "actual_minutes": null,
        "due_at": null,
        "scheduled_at": null,
        "created_at": "2025-06-02T09:00:00Z",
        "completed_at": null,
        "energy_required": 3,
        "base_xp": 30,
        "chain": null
    }"#;
    let task: Task = serde_json::from_str(json).unwrap();
    assert!(task.context_tags.is_empty());
    assert!(task.tags.is_empty());
}

#[test]
fn test_context_and_stats_round_trip() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap());
    let ctx = UserContext::capture(&clock)
        .with_energy(4)
        .unwrap()
        .with_mood(Mood::Motivated)
        .with_available_minutes(90);
    let json = serde_json::to_string(&ctx).unwrap();
    let back: UserContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back.mood, Some(Mood::Motivated));
    assert_eq!(back.time_of_day, ctx.time_of_day);

    let mut stats = UserStats::new();
    stats.record_completion(150, true);
    stats.record_energy_sample(4);
    let json = serde_json::to_string(&stats).unwrap();
    let back: UserStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back.total_xp, 150);
    assert_eq!(back.level, 2);
    assert_eq!(back.chains_completed, 1);
}

#[test]
fn test_streak_and_day_rating_round_trip() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap());
    let mut streak = Streak::new(StreakKind::FocusTime, &clock);
    streak.add_shields(2);
    streak.advance(1, 1, &clock).unwrap();

    let json = serde_json::to_string(&streak).unwrap();
    let back: Streak = serde_json::from_str(&json).unwrap();
    assert_eq!(back.kind, StreakKind::FocusTime);
    assert_eq!(back.current_count, 1);
    assert_eq!(back.shields_available, 2);

    let rating = DayRating {
        date: clock.now().date_naive(),
        day_type: DayType::Good,
        energy: Some(3),
        tasks_completed: 4,
        xp_earned: 160,
        note: Some("productive morning".to_string()),
    };
    let json = serde_json::to_string(&rating).unwrap();
    let back: DayRating = serde_json::from_str(&json).unwrap();
    assert_eq!(back.day_type, DayType::Good);
    assert_eq!(back.xp_earned, 160);
}
