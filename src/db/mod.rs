//! Database module for the taskboard server
//!
//! This module handles database connections, migrations,
//! and data access layer operations.

pub mod models;
pub mod operations;

pub use models::{RefreshTokenRecord, Task, TaskStatus, User};
pub use operations::DbOperations;
