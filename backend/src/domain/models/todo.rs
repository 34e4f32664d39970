use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single actionable item belonging to a goal.
///
/// Todos have no existence outside their owning goal; they are created
/// attached to one and removed when it is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainTodo {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub is_completed: bool,
}

impl DomainTodo {
    /// Create a new incomplete todo attached to a goal
    pub fn new(goal_id: &str, title: &str) -> Self {
        Self {
            id: Self::generate_id(),
            goal_id: goal_id.to_string(),
            title: title.trim().to_string(),
            is_completed: false,
        }
    }

    pub fn generate_id() -> String {
        format!("todo::{}", Uuid::new_v4())
    }

    /// Flip the completion flag. The owning goal's percentage picks this up
    /// on its next read; nothing derived is stored.
    pub fn toggle_completed(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
