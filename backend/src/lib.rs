//! # Zone Backend
//!
//! Core of the zone goal-tracking and focus-timer application.
//!
//! This crate holds everything below the UI: the goal/todo/time-log domain
//! model, the countdown session state machine, and durable storage for
//! goal aggregates. It is UI-agnostic; any frontend binds to the services
//! and formatting helpers exposed here.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (views, flip digits, progress rings)
//!     ↓
//! Domain Layer (goal service, session state machine)
//!     ↓
//! Storage Layer (GoalStore trait, CSV implementation)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Derive goal statistics (time spent, completion percentage) from the
//!   todos and time logs a goal owns, never from cached fields
//! - Run one focus/break countdown at a time and hand finished runs back
//!   as summaries for the caller to record
//! - Persist each goal aggregate as one unit so deletion always cascades

pub mod display;
pub mod domain;
pub mod storage;
pub mod ticker;

use std::path::Path;

use log::info;

use crate::storage::csv::CsvConnection;

pub use display::{flip_digits, format_mmss, ProgressTier, TimerDisplay};
pub use domain::models::goal::DomainGoal;
pub use domain::models::time_log::DomainTimeLog;
pub use domain::models::timer_mode::TimerMode;
pub use domain::models::todo::DomainTodo;
pub use domain::{GoalService, GoalServiceError, Session, SessionState, SessionSummary, TimerConfig};
pub use storage::csv::GoalRepository;
pub use storage::{GoalStore, StoreError};
pub use ticker::Ticker;

/// Main entry point wiring storage to the domain services.
///
/// Sessions are created directly by the caller, one per active timer;
/// the backend only owns the durable side.
pub struct Backend {
    pub goal_service: GoalService<GoalRepository>,
}

impl Backend {
    /// Initialize the backend against a specific data directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StoreError> {
        info!("Setting up storage");
        let connection = CsvConnection::new(base_directory)?;
        let goal_repository = GoalRepository::new(connection);

        info!("Setting up domain model");
        Ok(Self {
            goal_service: GoalService::new(goal_repository),
        })
    }

    /// Initialize the backend in the default data directory.
    pub fn new_default() -> Result<Self, StoreError> {
        let connection = CsvConnection::new_default()?;
        let goal_repository = GoalRepository::new(connection);
        Ok(Self {
            goal_service: GoalService::new(goal_repository),
        })
    }
}
