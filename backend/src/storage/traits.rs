//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use crate::domain::models::goal::DomainGoal;

/// Error raised by a durable store.
///
/// Write failures must reach the caller; in-memory and persisted state are
/// not allowed to diverge silently.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("corrupt record in {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

/// Trait defining the interface for goal aggregate storage operations
///
/// A goal is stored together with the todos and time logs it owns. An
/// implementation must write the aggregate all-or-nothing and delete it as
/// a cascade, so that todos and time logs can never outlive their goal.
pub trait GoalStore: Send + Sync {
    /// Store a new goal aggregate, including its initial todos
    fn store_goal(&self, goal: &DomainGoal) -> Result<(), StoreError>;

    /// Retrieve a specific goal by ID
    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>, StoreError>;

    /// List all goals ordered by created_at descending (most recent first)
    fn list_goals(&self) -> Result<Vec<DomainGoal>, StoreError>;

    /// Persist the current state of an existing goal aggregate
    fn update_goal(&self, goal: &DomainGoal) -> Result<(), StoreError>;

    /// Delete a goal and cascade to all of its todos and time logs.
    /// Returns true if the goal was found and deleted, false otherwise
    fn delete_goal(&self, goal_id: &str) -> Result<bool, StoreError>;
}
