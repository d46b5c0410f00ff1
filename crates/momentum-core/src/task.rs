//! Task types and lifecycle.
//!
//! Tasks follow strict status transitions:
//!
//!   PENDING ────────> IN_PROGRESS ────────> COMPLETED
//!      |  ^                |
//!      |  |                +──> SKIPPED / DEFERRED
//!      |  |                          |
//!      |  +──────────────────────────+  (re-activation)
//!      |
//!      +──> COMPLETED / SKIPPED / DEFERRED  (direct from pending)
//!
//! COMPLETED is terminal. `completed_at` and `actual_minutes` are written
//! exactly once, at completion. `base_xp` is derived from priority at
//! creation and never recalculated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{InvalidStateError, Result, ValidationError};

/// Lowest energy level a task may require.
pub const MIN_ENERGY: u8 = 1;
/// Highest energy level a task may require.
pub const MAX_ENERGY: u8 = 5;

/// Task status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is waiting to be started (initial status)
    Pending,
    /// Task is actively being worked
    InProgress,
    /// Task is completed (terminal status)
    Completed,
    /// Task was skipped for the day
    Skipped,
    /// Task was pushed to a later day
    Deferred,
}

impl TaskStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        match self {
            TaskStatus::Pending => matches!(
                to,
                TaskStatus::InProgress
                    | TaskStatus::Completed
                    | TaskStatus::Skipped
                    | TaskStatus::Deferred
            ),
            TaskStatus::InProgress => matches!(
                to,
                TaskStatus::Completed | TaskStatus::Skipped | TaskStatus::Deferred
            ),
            TaskStatus::Skipped | TaskStatus::Deferred => {
                matches!(to, TaskStatus::Pending | TaskStatus::InProgress)
            }
            TaskStatus::Completed => false, // Terminal status
        }
    }

    /// Whether completion is allowed from this status.
    pub fn is_completable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Task priority, totally ordered with critical highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Someday/maybe backlog
    Someday,
    /// Low priority
    Low,
    /// Medium priority (default)
    Medium,
    /// High priority
    High,
    /// Critical, must happen
    Critical,
}

impl Priority {
    /// Suggestion-scoring weight for this priority.
    pub fn score_weight(&self) -> i32 {
        match self {
            Priority::Critical => 40,
            Priority::High => 30,
            Priority::Medium => 20,
            Priority::Low => 10,
            Priority::Someday => 5,
        }
    }

    /// Base XP granted when a task of this priority is completed.
    ///
    /// Fixed at task creation; later priority edits do not change the
    /// task's `base_xp`.
    pub fn base_xp(&self) -> u32 {
        match self {
            Priority::Critical => 50,
            Priority::High => 40,
            Priority::Medium => 30,
            Priority::Low => 20,
            Priority::Someday => 10,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Someday => "someday",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Where a task can be done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextTag {
    /// Needs to be at home
    Home,
    /// Needs to be at the workplace
    Work,
    /// Needs to be out running errands
    Errand,
    /// Doable anywhere
    Anywhere,
    /// Needs a phone
    Phone,
    /// Needs a computer
    Computer,
}

/// Membership of a task in an ordered chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Chain identifier
    pub chain_id: String,
    /// Zero-based position within the chain
    pub position: u32,
    /// Whether this is the last task of the chain
    pub is_final: bool,
    /// Task to surface when this one completes (activation is the caller's job)
    pub triggers_task_id: Option<String>,
}

/// A unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Current status
    pub status: TaskStatus,
    /// Priority for ordering and base XP
    pub priority: Priority,
    /// Estimated duration in minutes
    pub estimated_minutes: u32,
    /// Actual duration in minutes, set once at completion
    pub actual_minutes: Option<u32>,
    /// Due timestamp
    pub due_at: Option<DateTime<Utc>>,
    /// Scheduled timestamp
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, set once at completion
    pub completed_at: Option<DateTime<Utc>>,
    /// Required energy level (1-5)
    pub energy_required: u8,
    /// Where this task can be done
    #[serde(default)]
    pub context_tags: Vec<ContextTag>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// XP granted at completion, derived from priority at creation
    pub base_xp: u32,
    /// Chain membership, if any
    pub chain: Option<ChainLink>,
}

impl Task {
    /// Create a new pending task.
    ///
    /// `base_xp` is fixed here from the priority and never recalculated.
    pub fn new(
        title: impl Into<String>,
        priority: Priority,
        estimated_minutes: u32,
        energy_required: u8,
        clock: &dyn Clock,
    ) -> Result<Self> {
        validate_energy(energy_required as i64)?;
        let now = clock.now();
        Ok(Self {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            status: TaskStatus::Pending,
            priority,
            estimated_minutes,
            actual_minutes: None,
            due_at: None,
            scheduled_at: None,
            created_at: now,
            completed_at: None,
            energy_required,
            context_tags: Vec::new(),
            tags: Vec::new(),
            base_xp: priority.base_xp(),
            chain: None,
        })
    }

    /// Set the due timestamp.
    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Set the scheduled timestamp.
    pub fn with_scheduled(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    /// Set context tags.
    pub fn with_context_tags(mut self, tags: Vec<ContextTag>) -> Self {
        self.context_tags = tags;
        self
    }

    /// Set free-form tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Attach chain membership.
    pub fn with_chain(mut self, chain: ChainLink) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Transition to a new status, rejecting disallowed moves.
    pub fn transition_to(&mut self, to: TaskStatus) -> Result<()> {
        if !self.status.can_transition_to(&to) {
            return Err(InvalidStateError::InvalidTransition {
                from: self.status,
                to,
            }
            .into());
        }
        self.status = to;
        Ok(())
    }

    /// Start working the task.
    pub fn start(&mut self) -> Result<()> {
        self.transition_to(TaskStatus::InProgress)
    }

    /// Complete the task, recording completion time and actual duration.
    ///
    /// Allowed only from pending or in-progress; `completed_at` and
    /// `actual_minutes` are written here and nowhere else.
    pub fn complete(&mut self, actual_minutes: Option<u32>, clock: &dyn Clock) -> Result<()> {
        if !self.status.is_completable() {
            return Err(InvalidStateError::NotCompletable {
                task_id: self.id.clone(),
                status: self.status,
            }
            .into());
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(clock.now());
        self.actual_minutes = actual_minutes;
        Ok(())
    }

    /// Skip the task for the day.
    pub fn skip(&mut self) -> Result<()> {
        self.transition_to(TaskStatus::Skipped)
    }

    /// Push the task to a later day.
    pub fn defer(&mut self) -> Result<()> {
        self.transition_to(TaskStatus::Deferred)
    }

    /// Whether this task finished faster than estimated.
    pub fn beat_estimate(&self) -> bool {
        matches!(self.actual_minutes, Some(actual) if actual < self.estimated_minutes)
    }

    /// Whether this is the final task of its chain.
    pub fn completes_chain(&self) -> bool {
        matches!(&self.chain, Some(link) if link.is_final)
    }
}

/// Validate an energy level against the 1-5 scale.
pub fn validate_energy(value: i64) -> Result<u8> {
    if value < MIN_ENERGY as i64 || value > MAX_ENERGY as i64 {
        return Err(ValidationError::EnergyOutOfRange {
            value,
            min: MIN_ENERGY,
            max: MAX_ENERGY,
        }
        .into());
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::Utc;

    fn clock() -> FixedClock {
        FixedClock::new(Utc::now())
    }

    #[test]
    fn test_new_task_is_pending_with_base_xp() {
        let task = Task::new("Write invoice", Priority::High, 20, 3, &clock()).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.base_xp, 40);
        assert!(task.completed_at.is_none());
        assert!(task.actual_minutes.is_none());
    }

    #[test]
    fn test_base_xp_per_priority() {
        assert_eq!(Priority::Critical.base_xp(), 50);
        assert_eq!(Priority::High.base_xp(), 40);
        assert_eq!(Priority::Medium.base_xp(), 30);
        assert_eq!(Priority::Low.base_xp(), 20);
        assert_eq!(Priority::Someday.base_xp(), 10);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert!(Priority::Low > Priority::Someday);
    }

    #[test]
    fn test_energy_out_of_range_rejected() {
        assert!(Task::new("t", Priority::Low, 10, 0, &clock()).is_err());
        assert!(Task::new("t", Priority::Low, 10, 6, &clock()).is_err());
        assert!(Task::new("t", Priority::Low, 10, 5, &clock()).is_ok());
    }

    #[test]
    fn test_complete_from_pending_and_in_progress() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        assert!(task.complete(Some(12), &c).is_ok());
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.actual_minutes, Some(12));
        assert!(task.completed_at.is_some());

        let mut task = Task::new("b", Priority::Medium, 15, 2, &c).unwrap();
        task.start().unwrap();
        assert!(task.complete(None, &c).is_ok());
    }

    #[test]
    fn test_complete_twice_is_invalid_state() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        task.complete(Some(10), &c).unwrap();
        let err = task.complete(Some(20), &c).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::InvalidState(InvalidStateError::NotCompletable { .. })
        ));
        // First completion record is untouched
        assert_eq!(task.actual_minutes, Some(10));
    }

    #[test]
    fn test_complete_from_skipped_rejected() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        task.skip().unwrap();
        assert!(task.complete(None, &c).is_err());
    }

    #[test]
    fn test_deferred_reactivates() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        task.defer().unwrap();
        assert!(task.transition_to(TaskStatus::Pending).is_ok());
        assert!(task.start().is_ok());
    }

    #[test]
    fn test_completed_is_terminal() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        task.complete(None, &c).unwrap();
        assert!(task.transition_to(TaskStatus::Pending).is_err());
        assert!(task.transition_to(TaskStatus::InProgress).is_err());
    }

    #[test]
    fn test_beat_estimate() {
        let c = clock();
        let mut task = Task::new("a", Priority::Medium, 15, 2, &c).unwrap();
        assert!(!task.beat_estimate());
        task.complete(Some(10), &c).unwrap();
        assert!(task.beat_estimate());
    }

    #[test]
    fn test_completes_chain() {
        let c = clock();
        let task = Task::new("a", Priority::Medium, 15, 2, &c)
            .unwrap()
            .with_chain(ChainLink {
                chain_id: "morning-routine".to_string(),
                position: 2,
                is_final: true,
                triggers_task_id: None,
            });
        assert!(task.completes_chain());
    }
}
