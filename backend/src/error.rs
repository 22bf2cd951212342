//! Error types for schedule engine operations.
//!
//! Every error raised by the engine itself is a deterministic outcome of pure
//! in-memory computation. Storage failures are wrapped without modification.
//! A conflict reported by a mutation is not an error; see
//! [`MutationOutcome`](crate::services::session::MutationOutcome).

use crate::db::repository::RepositoryError;

/// Result type for schedule engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Error type for schedule engine operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A time string or raw minute value could not be turned into a time of day.
    #[error("Invalid time format: '{input}' ({reason})")]
    InvalidTimeFormat { input: String, reason: String },

    /// A window violates its invariants (empty days, zero length, ...).
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// A window set containing conflicts was handed to the expander.
    #[error("Overlapping windows: {}", format_pairs(.pairs))]
    OverlappingWindows { pairs: Vec<(usize, usize)> },

    /// A mutation referenced a window index the session does not hold.
    #[error("No window at index {index} (session holds {len})")]
    WindowNotFound { index: usize, len: usize },

    /// A preset lookup by name failed.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage read or write failed.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl ScheduleError {
    pub(crate) fn invalid_time(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_window(reason: impl Into<String>) -> Self {
        Self::InvalidWindow(reason.into())
    }
}

fn format_pairs(pairs: &[(usize, usize)]) -> String {
    pairs
        .iter()
        .map(|(i, j)| format!("#{} and #{}", i, j))
        .collect::<Vec<_>>()
        .join(", ")
}
