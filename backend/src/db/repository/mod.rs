//! Repository trait definitions for schedule storage.
//!
//! - [`error`]: Error types for repository operations
//! - [`schedule`]: Row persistence per camera

pub mod error;
pub mod schedule;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use schedule::ScheduleRepository;
