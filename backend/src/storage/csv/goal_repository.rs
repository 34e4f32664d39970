//! # CSV Goal Repository
//!
//! File-based storage for goal aggregates. Each goal owns one directory
//! under the base data directory, holding a YAML header plus one CSV file
//! per owned collection.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── goal__{uuid}/
//!     ├── goal.yaml        ← id, name, created_at
//!     ├── todos.csv        ← one row per todo
//!     └── time_logs.csv    ← one row per recorded session
//! ```
//!
//! ## CSV Format
//!
//! ```csv
//! id,goal_id,title,is_completed
//! todo::1234,goal::abcd,"Chapter 1",false
//! ```
//!
//! ```csv
//! id,goal_id,start_time,end_time,duration,mode
//! log::1234,goal::abcd,2025-06-01T10:00:00Z,2025-06-01T10:25:00Z,1500,work
//! ```
//!
//! ## Features
//!
//! - One directory per goal aggregate, so cascade deletion is a single
//!   `remove_dir_all` and children can never outlive their goal
//! - Atomic file writes with temp files
//! - Corrupt rows are skipped with a warning instead of failing the read
//! - Chronological goal listing (most recent first)

use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::connection::CsvConnection;
use crate::domain::models::goal::DomainGoal;
use crate::domain::models::time_log::DomainTimeLog;
use crate::domain::models::timer_mode::TimerMode;
use crate::domain::models::todo::DomainTodo;
use crate::storage::traits::{GoalStore, StoreError};

const GOAL_FILE: &str = "goal.yaml";
const TODOS_FILE: &str = "todos.csv";
const TIME_LOGS_FILE: &str = "time_logs.csv";

/// YAML header for one goal aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoalHeader {
    id: String,
    name: String,
    created_at: String,
}

/// CSV record structure for todos
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoRecord {
    id: String,
    goal_id: String,
    title: String,
    is_completed: bool,
}

impl From<&DomainTodo> for TodoRecord {
    fn from(todo: &DomainTodo) -> Self {
        TodoRecord {
            id: todo.id.clone(),
            goal_id: todo.goal_id.clone(),
            title: todo.title.clone(),
            is_completed: todo.is_completed,
        }
    }
}

impl From<TodoRecord> for DomainTodo {
    fn from(record: TodoRecord) -> Self {
        DomainTodo {
            id: record.id,
            goal_id: record.goal_id,
            title: record.title,
            is_completed: record.is_completed,
        }
    }
}

/// CSV record structure for time logs
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimeLogRecord {
    id: String,
    goal_id: String,
    start_time: String,
    end_time: String,
    duration: u32,
    mode: String,
}

impl From<&DomainTimeLog> for TimeLogRecord {
    fn from(log: &DomainTimeLog) -> Self {
        TimeLogRecord {
            id: log.id.clone(),
            goal_id: log.goal_id.clone(),
            start_time: log.start_time.to_rfc3339(),
            end_time: log.end_time.to_rfc3339(),
            duration: log.duration,
            mode: log.mode.to_string(),
        }
    }
}

impl TryFrom<TimeLogRecord> for DomainTimeLog {
    type Error = anyhow::Error;

    fn try_from(record: TimeLogRecord) -> Result<Self, Self::Error> {
        let start_time = parse_rfc3339(&record.start_time)?;
        let end_time = parse_rfc3339(&record.end_time)?;
        let mode = TimerMode::from_string(&record.mode)
            .map_err(|e| anyhow::anyhow!("Failed to parse timer mode: {}", e))?;

        Ok(DomainTimeLog {
            id: record.id,
            goal_id: record.goal_id,
            start_time,
            end_time,
            duration: record.duration,
            mode,
        })
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, anyhow::Error> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// CSV-based goal repository using one directory per goal aggregate
#[derive(Clone)]
pub struct GoalRepository {
    connection: CsvConnection,
}

impl GoalRepository {
    /// Create a new CSV goal repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Write a file atomically via a temp file in the same directory
    fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    fn write_header(&self, goal_dir: &Path, goal: &DomainGoal) -> Result<(), StoreError> {
        let header = GoalHeader {
            id: goal.id.clone(),
            name: goal.name.clone(),
            created_at: goal.created_at.to_rfc3339(),
        };
        let yaml = serde_yaml::to_string(&header)?;
        Self::write_atomic(&goal_dir.join(GOAL_FILE), yaml.as_bytes())
    }

    fn write_todos(&self, goal_dir: &Path, goal: &DomainGoal) -> Result<(), StoreError> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        for todo in &goal.todos {
            csv_writer.serialize(TodoRecord::from(todo))?;
        }
        let buffer = csv_writer
            .into_inner()
            .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;
        Self::write_atomic(&goal_dir.join(TODOS_FILE), &buffer)
    }

    fn write_time_logs(&self, goal_dir: &Path, goal: &DomainGoal) -> Result<(), StoreError> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        for log in &goal.time_logs {
            csv_writer.serialize(TimeLogRecord::from(log))?;
        }
        let buffer = csv_writer
            .into_inner()
            .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;
        Self::write_atomic(&goal_dir.join(TIME_LOGS_FILE), &buffer)
    }

    /// Persist the whole aggregate: header, todos, and time logs together
    fn write_aggregate(&self, goal: &DomainGoal) -> Result<(), StoreError> {
        let goal_dir = self.connection.goal_directory(&goal.id);
        if !goal_dir.exists() {
            fs::create_dir_all(&goal_dir)?;
        }

        self.write_header(&goal_dir, goal)?;
        self.write_todos(&goal_dir, goal)?;
        self.write_time_logs(&goal_dir, goal)?;

        debug!(
            "Wrote goal {} with {} todos and {} time logs to {:?}",
            goal.id,
            goal.todos.len(),
            goal.time_logs.len(),
            goal_dir
        );
        Ok(())
    }

    fn read_todos(&self, goal_dir: &Path) -> Result<Vec<DomainTodo>, StoreError> {
        let path = goal_dir.join(TODOS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        let mut todos = Vec::new();

        for result in csv_reader.deserialize::<TodoRecord>() {
            match result {
                Ok(record) => todos.push(DomainTodo::from(record)),
                Err(e) => {
                    warn!("Failed to parse todo record in {:?}: {}. Skipping.", path, e);
                }
            }
        }

        Ok(todos)
    }

    fn read_time_logs(&self, goal_dir: &Path) -> Result<Vec<DomainTimeLog>, StoreError> {
        let path = goal_dir.join(TIME_LOGS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        let mut time_logs = Vec::new();

        for result in csv_reader.deserialize::<TimeLogRecord>() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(
                        "Failed to parse time log record in {:?}: {}. Skipping.",
                        path, e
                    );
                    continue;
                }
            };
            match DomainTimeLog::try_from(record) {
                Ok(log) => time_logs.push(log),
                Err(e) => {
                    warn!(
                        "Failed to convert time log record in {:?}: {}. Skipping.",
                        path, e
                    );
                }
            }
        }

        Ok(time_logs)
    }

    /// Load one aggregate from its directory
    fn read_aggregate(&self, goal_dir: &Path) -> Result<DomainGoal, StoreError> {
        let header_path = goal_dir.join(GOAL_FILE);
        let contents = fs::read_to_string(&header_path)?;
        let header: GoalHeader = serde_yaml::from_str(&contents)?;
        let created_at =
            parse_rfc3339(&header.created_at).map_err(|e| StoreError::Corrupt {
                path: header_path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(DomainGoal {
            id: header.id,
            name: header.name,
            created_at,
            todos: self.read_todos(goal_dir)?,
            time_logs: self.read_time_logs(goal_dir)?,
        })
    }
}

impl GoalStore for GoalRepository {
    fn store_goal(&self, goal: &DomainGoal) -> Result<(), StoreError> {
        info!("Storing new goal: {}", goal.id);
        self.write_aggregate(goal)
    }

    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>, StoreError> {
        let goal_dir = self.connection.goal_directory(goal_id);
        if !goal_dir.join(GOAL_FILE).exists() {
            return Ok(None);
        }
        self.read_aggregate(&goal_dir).map(Some)
    }

    fn list_goals(&self) -> Result<Vec<DomainGoal>, StoreError> {
        let mut goals = Vec::new();

        for entry in fs::read_dir(self.connection.base_directory())? {
            let path: PathBuf = entry?.path();
            if !path.is_dir() || !path.join(GOAL_FILE).exists() {
                continue;
            }
            match self.read_aggregate(&path) {
                Ok(goal) => goals.push(goal),
                Err(e) => {
                    warn!("Skipping unreadable goal directory {:?}: {}", path, e);
                }
            }
        }

        // Most recently created first
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    fn update_goal(&self, goal: &DomainGoal) -> Result<(), StoreError> {
        debug!("Updating goal: {}", goal.id);
        self.write_aggregate(goal)
    }

    fn delete_goal(&self, goal_id: &str) -> Result<bool, StoreError> {
        let goal_dir = self.connection.goal_directory(goal_id);
        if !goal_dir.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&goal_dir)?;
        info!("Deleted goal {} and everything it owned", goal_id);
        Ok(true)
    }
}
