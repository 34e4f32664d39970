//! Test utilities for storage and service tests.
//!
//! Provides RAII-based cleanup so test data is removed even when a test
//! panics: the temporary directory lives exactly as long as the helper.

use anyhow::Result;
use chrono::Utc;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::goal_repository::GoalRepository;
use crate::domain::models::goal::DomainGoal;
use crate::domain::models::todo::DomainTodo;
use crate::storage::traits::GoalStore;

/// Temporary data directory plus the connection pointed at it.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper bundling a fresh environment with a repository instance.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub goal_repo: GoalRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let goal_repo = GoalRepository::new(env.connection.clone());
        Ok(Self { env, goal_repo })
    }

    /// Create and store a goal with no todos yet.
    pub fn create_test_goal(&self, name: &str) -> Result<DomainGoal> {
        let goal = DomainGoal::new(name, Utc::now())?;
        self.goal_repo.store_goal(&goal)?;
        Ok(goal)
    }

    /// Create and store a goal together with its initial todos.
    pub fn create_test_goal_with_todos(
        &self,
        name: &str,
        titles: &[&str],
    ) -> Result<DomainGoal> {
        let mut goal = DomainGoal::new(name, Utc::now())?;
        for title in titles {
            goal.todos.push(DomainTodo::new(&goal.id, title));
        }
        self.goal_repo.store_goal(&goal)?;
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
            // Environment dropped here
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_helper_stores_goals() -> Result<()> {
        let helper = TestHelper::new()?;
        let goal = helper.create_test_goal_with_todos("Read 12 books", &["Chapter 1"])?;

        let retrieved = helper.goal_repo.get_goal(&goal.id)?;
        assert!(retrieved.is_some(), "Goal not found in storage");
        assert_eq!(retrieved.unwrap().todos.len(), 1);
        Ok(())
    }
}
