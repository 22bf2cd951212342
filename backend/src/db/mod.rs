//! Storage for per-camera schedule rows.
//!
//! The module follows the repository pattern:
//! - `repository`: the [`ScheduleRepository`] trait and its error types
//! - `repositories::local`: in-memory implementation
//! - `services`: load and save editing sessions through any repository
//!
//! Only flat [`StorageRow`](crate::models::StorageRow)s cross this boundary;
//! grouping into windows happens in the service layer.

pub mod repositories;
pub mod repository;
pub mod services;

// ==================== Service Layer ====================

pub use services::{health_check, load_session, save_session};

// ==================== Repository Pattern Exports ====================

pub use repositories::LocalRepository;
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
