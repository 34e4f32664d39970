//! Goal service domain logic.
//!
//! This module contains the core business logic for goal management:
//! creating goals with their initial todos, mutating the todo list,
//! cascade deletion, and recording finished timer sessions as immutable
//! time logs.
//!
//! ## Key Responsibilities
//!
//! - **Goal CRUD**: Creating, reading, and deleting goal aggregates
//! - **Todo Management**: Appending, removing, and toggling todos
//! - **Session History**: Turning a `SessionSummary` into a stored time log
//! - **Business Rules**: Name and title validation before any mutation
//!
//! ## Business Rules
//!
//! - Goal names must be at least 3 characters after trimming
//! - Todo titles must be non-empty after trimming
//! - Time logs are only ever created here, from a finished session
//! - Every mutation is persisted through the store before it is reported
//!   back to the caller; a failed write surfaces as `GoalServiceError::Store`
//!   instead of leaving memory and disk quietly out of step

use chrono::Utc;
use log::info;

use crate::domain::commands::goal::{
    AddTodoCommand, AddTodoResult, CreateGoalCommand, CreateGoalResult, DeleteGoalCommand,
    DeleteGoalResult, RecordSessionCommand, RecordSessionResult, RemoveTodoCommand,
    RemoveTodoResult, ToggleTodoCommand, ToggleTodoResult,
};
use crate::domain::models::goal::{DomainGoal, GoalValidationError};
use crate::domain::models::time_log::{DomainTimeLog, TimeLogValidationError};
use crate::domain::models::todo::DomainTodo;
use crate::storage::traits::{GoalStore, StoreError};

/// Error surfaced by goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalServiceError {
    #[error(transparent)]
    Validation(#[from] GoalValidationError),
    #[error(transparent)]
    TimeLog(#[from] TimeLogValidationError),
    #[error("Goal not found: {id}")]
    GoalNotFound { id: String },
    #[error("Todo not found: {id}")]
    TodoNotFound { id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service for managing goal aggregates and their derived statistics.
#[derive(Clone)]
pub struct GoalService<S: GoalStore> {
    store: S,
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new goal together with its initial todos.
    ///
    /// The aggregate is written as one unit, so a goal can never be
    /// persisted without the todos it was created with.
    pub fn create_goal(
        &self,
        command: CreateGoalCommand,
    ) -> Result<CreateGoalResult, GoalServiceError> {
        info!("Creating goal: {:?}", command);

        let mut goal = DomainGoal::new(&command.name, Utc::now())?;
        for title in &command.todos {
            if title.trim().is_empty() {
                return Err(GoalValidationError::EmptyTodoTitle.into());
            }
        }
        for title in &command.todos {
            goal.todos.push(DomainTodo::new(&goal.id, title));
        }

        self.store.store_goal(&goal)?;

        info!("Successfully created goal: {}", goal.id);
        Ok(CreateGoalResult { goal })
    }

    /// Append a todo to an existing goal.
    pub fn add_todo(&self, command: AddTodoCommand) -> Result<AddTodoResult, GoalServiceError> {
        info!("Adding todo to goal {}", command.goal_id);

        if command.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTodoTitle.into());
        }

        let mut goal = self.load_goal(&command.goal_id)?;
        let todo = DomainTodo::new(&goal.id, &command.title);
        goal.todos.push(todo.clone());
        self.store.update_goal(&goal)?;

        Ok(AddTodoResult {
            todo,
            goal_percentage: goal.goal_percentage(),
        })
    }

    /// Remove a single todo from a goal.
    pub fn remove_todo(
        &self,
        command: RemoveTodoCommand,
    ) -> Result<RemoveTodoResult, GoalServiceError> {
        info!(
            "Removing todo {} from goal {}",
            command.todo_id, command.goal_id
        );

        let mut goal = self.load_goal(&command.goal_id)?;
        let position = goal
            .todos
            .iter()
            .position(|todo| todo.id == command.todo_id)
            .ok_or(GoalServiceError::TodoNotFound {
                id: command.todo_id,
            })?;
        goal.todos.remove(position);
        self.store.update_goal(&goal)?;

        Ok(RemoveTodoResult {
            goal_percentage: goal.goal_percentage(),
        })
    }

    /// Flip a todo's completion flag.
    pub fn toggle_todo(
        &self,
        command: ToggleTodoCommand,
    ) -> Result<ToggleTodoResult, GoalServiceError> {
        info!(
            "Toggling todo {} on goal {}",
            command.todo_id, command.goal_id
        );

        let mut goal = self.load_goal(&command.goal_id)?;
        let todo = goal
            .todos
            .iter_mut()
            .find(|todo| todo.id == command.todo_id)
            .ok_or(GoalServiceError::TodoNotFound {
                id: command.todo_id,
            })?;
        todo.toggle_completed();
        let is_completed = todo.is_completed;
        self.store.update_goal(&goal)?;

        Ok(ToggleTodoResult {
            is_completed,
            goal_percentage: goal.goal_percentage(),
        })
    }

    /// Delete a goal and everything it owns.
    ///
    /// The store removes the aggregate as one unit, so todos and time
    /// logs cannot be orphaned by a partial delete.
    pub fn delete_goal(
        &self,
        command: DeleteGoalCommand,
    ) -> Result<DeleteGoalResult, GoalServiceError> {
        info!("Deleting goal {}", command.goal_id);

        if !self.store.delete_goal(&command.goal_id)? {
            return Err(GoalServiceError::GoalNotFound {
                id: command.goal_id,
            });
        }

        info!("Successfully deleted goal: {}", command.goal_id);
        Ok(DeleteGoalResult {
            success_message: "Goal deleted successfully".to_string(),
        })
    }

    /// Record a finished session against a goal as an immutable time log.
    ///
    /// This is the only place time logs are created; the session machine
    /// hands over a summary and this turns it into durable history.
    pub fn record_session(
        &self,
        command: RecordSessionCommand,
    ) -> Result<RecordSessionResult, GoalServiceError> {
        info!(
            "Recording {} second {} session against goal {}",
            command.summary.duration,
            command.summary.mode.display_name(),
            command.goal_id
        );

        let mut goal = self.load_goal(&command.goal_id)?;
        let time_log = DomainTimeLog::new(
            &goal.id,
            command.summary.started_at,
            command.summary.ended_at,
            command.summary.duration,
            command.summary.mode,
        )?;
        goal.time_logs.push(time_log.clone());
        self.store.update_goal(&goal)?;

        Ok(RecordSessionResult {
            time_log,
            time_spent: goal.time_spent(),
        })
    }

    /// Fetch a single goal aggregate.
    pub fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>, GoalServiceError> {
        Ok(self.store.get_goal(goal_id)?)
    }

    /// List all goals, most recently created first.
    pub fn list_goals(&self) -> Result<Vec<DomainGoal>, GoalServiceError> {
        Ok(self.store.list_goals()?)
    }

    fn load_goal(&self, goal_id: &str) -> Result<DomainGoal, GoalServiceError> {
        self.store
            .get_goal(goal_id)?
            .ok_or_else(|| GoalServiceError::GoalNotFound {
                id: goal_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::timer_mode::TimerMode;
    use crate::domain::session::{Session, TimerConfig};
    use crate::storage::csv::test_utils::TestHelper;
    use crate::storage::csv::GoalRepository;

    fn setup_service() -> (GoalService<GoalRepository>, TestHelper) {
        let helper = TestHelper::new().expect("Failed to create test helper");
        let service = GoalService::new(helper.goal_repo.clone());
        (service, helper)
    }

    fn create_reading_goal(service: &GoalService<GoalRepository>) -> DomainGoal {
        service
            .create_goal(CreateGoalCommand {
                name: "Read 12 books".to_string(),
                todos: vec!["Chapter 1".to_string(), "Chapter 2".to_string()],
            })
            .expect("Failed to create goal")
            .goal
    }

    #[test]
    fn test_create_goal_with_initial_todos() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        assert_eq!(goal.name, "Read 12 books");
        assert_eq!(goal.todos_count(), 2);
        assert_eq!(goal.goal_percentage(), 0.0);

        let stored = service
            .get_goal(&goal.id)
            .expect("Failed to get goal")
            .expect("Goal should exist");
        assert_eq!(stored, goal);
    }

    #[test]
    fn test_create_goal_rejects_short_name() {
        let (service, _helper) = setup_service();
        let result = service.create_goal(CreateGoalCommand {
            name: "  ab ".to_string(),
            todos: vec![],
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::Validation(
                GoalValidationError::NameTooShort
            ))
        ));
    }

    #[test]
    fn test_create_goal_rejects_blank_todo_title_before_persisting() {
        let (service, _helper) = setup_service();
        let result = service.create_goal(CreateGoalCommand {
            name: "Read 12 books".to_string(),
            todos: vec!["Chapter 1".to_string(), "   ".to_string()],
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::Validation(
                GoalValidationError::EmptyTodoTitle
            ))
        ));

        // Nothing was written
        assert!(service.list_goals().expect("Failed to list").is_empty());
    }

    #[test]
    fn test_toggle_todo_moves_percentage() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        let result = service
            .toggle_todo(ToggleTodoCommand {
                goal_id: goal.id.clone(),
                todo_id: goal.todos[0].id.clone(),
            })
            .expect("Failed to toggle todo");
        assert!(result.is_completed);
        assert_eq!(result.goal_percentage, 50.0);

        let result = service
            .toggle_todo(ToggleTodoCommand {
                goal_id: goal.id.clone(),
                todo_id: goal.todos[0].id.clone(),
            })
            .expect("Failed to toggle todo");
        assert!(!result.is_completed);
        assert_eq!(result.goal_percentage, 0.0);
    }

    #[test]
    fn test_add_and_remove_todo_update_percentage() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        service
            .toggle_todo(ToggleTodoCommand {
                goal_id: goal.id.clone(),
                todo_id: goal.todos[0].id.clone(),
            })
            .expect("Failed to toggle todo");

        let added = service
            .add_todo(AddTodoCommand {
                goal_id: goal.id.clone(),
                title: "Chapter 3".to_string(),
            })
            .expect("Failed to add todo");
        assert_eq!(added.goal_percentage, 100.0 / 3.0);

        let removed = service
            .remove_todo(RemoveTodoCommand {
                goal_id: goal.id.clone(),
                todo_id: added.todo.id,
            })
            .expect("Failed to remove todo");
        assert_eq!(removed.goal_percentage, 50.0);

        let stored = service
            .get_goal(&goal.id)
            .expect("Failed to get goal")
            .expect("Goal should exist");
        assert_eq!(stored.todos_count(), 2);
    }

    #[test]
    fn test_add_todo_rejects_blank_title() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        let result = service.add_todo(AddTodoCommand {
            goal_id: goal.id,
            title: "  ".to_string(),
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::Validation(
                GoalValidationError::EmptyTodoTitle
            ))
        ));
    }

    #[test]
    fn test_remove_todo_checks_existence() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        let result = service.remove_todo(RemoveTodoCommand {
            goal_id: goal.id,
            todo_id: "todo::missing".to_string(),
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::TodoNotFound { .. })
        ));
    }

    #[test]
    fn test_operations_on_unknown_goal_fail() {
        let (service, _helper) = setup_service();

        let result = service.add_todo(AddTodoCommand {
            goal_id: "goal::missing".to_string(),
            title: "Chapter 1".to_string(),
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::GoalNotFound { .. })
        ));

        let result = service.delete_goal(DeleteGoalCommand {
            goal_id: "goal::missing".to_string(),
        });
        assert!(matches!(
            result,
            Err(GoalServiceError::GoalNotFound { .. })
        ));
    }

    #[test]
    fn test_recorded_session_raises_time_spent() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        let mut session = Session::new(TimerConfig::default());
        session.set_timer(600, TimerMode::Custom);
        session.start();
        for _ in 0..600 {
            session.tick();
        }
        let summary = session.end_session().expect("run was started");
        assert_eq!(summary.duration, 600);

        let result = service
            .record_session(RecordSessionCommand {
                goal_id: goal.id.clone(),
                summary,
            })
            .expect("Failed to record session");
        assert_eq!(result.time_spent, 600);
        assert_eq!(result.time_log.mode, TimerMode::Custom);

        let stored = service
            .get_goal(&goal.id)
            .expect("Failed to get goal")
            .expect("Goal should exist");
        assert_eq!(stored.time_spent(), 600);
        assert_eq!(stored.time_logs.len(), 1);
    }

    #[test]
    fn test_delete_goal_cascades_to_todos_and_time_logs() {
        let (service, _helper) = setup_service();
        let goal = create_reading_goal(&service);

        let mut session = Session::new(TimerConfig::default());
        session.set_timer(60, TimerMode::Work);
        session.start();
        session.tick();
        let summary = session.end_session().expect("run was started");
        service
            .record_session(RecordSessionCommand {
                goal_id: goal.id.clone(),
                summary,
            })
            .expect("Failed to record session");

        service
            .delete_goal(DeleteGoalCommand {
                goal_id: goal.id.clone(),
            })
            .expect("Failed to delete goal");

        assert!(service
            .get_goal(&goal.id)
            .expect("Failed to get goal")
            .is_none());
        assert!(service.list_goals().expect("Failed to list").is_empty());
    }

    #[test]
    fn test_list_goals_newest_first() {
        let (service, _helper) = setup_service();
        let first = create_reading_goal(&service);
        let second = service
            .create_goal(CreateGoalCommand {
                name: "Learn Rust".to_string(),
                todos: vec![],
            })
            .expect("Failed to create goal")
            .goal;

        let goals = service.list_goals().expect("Failed to list goals");
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, second.id);
        assert_eq!(goals[1].id, first.id);
    }
}
