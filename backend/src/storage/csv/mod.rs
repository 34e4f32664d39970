//! # CSV Storage Implementation
//!
//! Human-readable, file-based persistence for goal aggregates: a YAML
//! header plus CSV files for the owned collections, one directory per
//! goal under the base data directory managed by [`CsvConnection`].

pub mod connection;
pub mod goal_repository;
#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use goal_repository::GoalRepository;
