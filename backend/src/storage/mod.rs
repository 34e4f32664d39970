//! # Storage Module
//!
//! Durable persistence for goal aggregates. The domain layer only depends
//! on the `GoalStore` trait; the CSV implementation underneath keeps one
//! directory per goal so that cascade deletion is a single filesystem
//! operation.

pub mod csv;
pub mod traits;

pub use traits::{GoalStore, StoreError};
