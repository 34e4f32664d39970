use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_log::DomainTimeLog;
use super::todo::DomainTodo;

/// Minimum goal name length after trimming.
pub const MIN_NAME_LEN: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Goal name must be at least 3 characters")]
    NameTooShort,
    #[error("Todo title cannot be empty")]
    EmptyTodoTitle,
}

/// Root aggregate for one tracked objective.
///
/// Owns its todos and time logs by value, in insertion order. The statistics
/// read off a goal (`time_spent`, `todos_count`, `goal_percentage`) are
/// always recomputed from the owned collections at read time; nothing
/// derived is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainGoal {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub todos: Vec<DomainTodo>,
    pub time_logs: Vec<DomainTimeLog>,
}

impl DomainGoal {
    /// Validate and create a new goal with no todos or time logs yet
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Result<Self, GoalValidationError> {
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_NAME_LEN {
            return Err(GoalValidationError::NameTooShort);
        }
        Ok(Self {
            id: Self::generate_id(),
            name: trimmed.to_string(),
            created_at,
            todos: Vec::new(),
            time_logs: Vec::new(),
        })
    }

    pub fn generate_id() -> String {
        format!("goal::{}", Uuid::new_v4())
    }

    /// Total seconds recorded against this goal
    pub fn time_spent(&self) -> u64 {
        self.time_logs.iter().map(|log| u64::from(log.duration)).sum()
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    pub fn completed_todos_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_completed).count()
    }

    /// Percentage of completed todos in [0, 100]; 0 when the goal has none
    pub fn goal_percentage(&self) -> f64 {
        if self.todos.is_empty() {
            return 0.0;
        }
        100.0 * self.completed_todos_count() as f64 / self.todos.len() as f64
    }
}
