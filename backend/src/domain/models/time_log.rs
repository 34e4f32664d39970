use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timer_mode::TimerMode;

#[derive(Debug, thiserror::Error)]
pub enum TimeLogValidationError {
    #[error("End time must not precede start time")]
    EndBeforeStart,
}

/// An immutable record of one completed or manually ended session.
///
/// Created only when a session finishes against a goal, never mutated
/// afterwards, and deleted only by cascade when the owning goal goes away.
/// `duration` counts the ticked seconds of the session, which for a
/// manually ended session can be shorter than the wall-clock window
/// between `start_time` and `end_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainTimeLog {
    pub id: String,
    pub goal_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: u32,
    pub mode: TimerMode,
}

impl DomainTimeLog {
    /// Create a new time log record for a goal
    pub fn new(
        goal_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        duration: u32,
        mode: TimerMode,
    ) -> Result<Self, TimeLogValidationError> {
        if end_time < start_time {
            return Err(TimeLogValidationError::EndBeforeStart);
        }
        Ok(Self {
            id: Self::generate_id(),
            goal_id: goal_id.to_string(),
            start_time,
            end_time,
            duration,
            mode,
        })
    }

    pub fn generate_id() -> String {
        format!("log::{}", Uuid::new_v4())
    }
}
