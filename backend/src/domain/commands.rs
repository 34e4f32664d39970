//! Domain-level command and query types
//!
//! These structs are used by services inside the domain layer. A UI or IPC
//! layer is responsible for mapping its own DTOs onto these internal types.

pub mod goal {
    use crate::domain::models::goal::DomainGoal;
    use crate::domain::models::time_log::DomainTimeLog;
    use crate::domain::models::todo::DomainTodo;
    use crate::domain::session::SessionSummary;

    /// Input for creating a new goal together with its initial todos.
    #[derive(Debug, Clone)]
    pub struct CreateGoalCommand {
        pub name: String,
        pub todos: Vec<String>,
    }

    /// Result of creating a goal.
    #[derive(Debug, Clone)]
    pub struct CreateGoalResult {
        pub goal: DomainGoal,
    }

    /// Input for appending a todo to an existing goal.
    #[derive(Debug, Clone)]
    pub struct AddTodoCommand {
        pub goal_id: String,
        pub title: String,
    }

    /// Result of appending a todo.
    #[derive(Debug, Clone)]
    pub struct AddTodoResult {
        pub todo: DomainTodo,
        pub goal_percentage: f64,
    }

    /// Input for removing a single todo from a goal.
    #[derive(Debug, Clone)]
    pub struct RemoveTodoCommand {
        pub goal_id: String,
        pub todo_id: String,
    }

    /// Result of removing a todo.
    #[derive(Debug, Clone)]
    pub struct RemoveTodoResult {
        pub goal_percentage: f64,
    }

    /// Input for flipping a todo's completion flag.
    #[derive(Debug, Clone)]
    pub struct ToggleTodoCommand {
        pub goal_id: String,
        pub todo_id: String,
    }

    /// Result of toggling a todo.
    #[derive(Debug, Clone)]
    pub struct ToggleTodoResult {
        pub is_completed: bool,
        pub goal_percentage: f64,
    }

    /// Input for deleting a goal and everything it owns.
    #[derive(Debug, Clone)]
    pub struct DeleteGoalCommand {
        pub goal_id: String,
    }

    /// Result of deleting a goal.
    #[derive(Debug, Clone)]
    pub struct DeleteGoalResult {
        pub success_message: String,
    }

    /// Input for recording a finished session against a goal.
    #[derive(Debug, Clone)]
    pub struct RecordSessionCommand {
        pub goal_id: String,
        pub summary: SessionSummary,
    }

    /// Result of recording a session.
    #[derive(Debug, Clone)]
    pub struct RecordSessionResult {
        pub time_log: DomainTimeLog,
        pub time_spent: u64,
    }
}
