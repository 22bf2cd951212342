//! Repository-agnostic service functions bridging storage and editing sessions.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Editing clients (CLI, tests)                │
//! └───────────────────┬──────────────────────────┘
//!                     │ Session
//! ┌───────────────────▼──────────────────────────┐
//! │  Service Layer (services.rs)                 │
//! │  - group rows into a Session on load         │
//! │  - commit the Session into rows on save      │
//! └───────────────────┬──────────────────────────┘
//!                     │ StorageRow
//! ┌───────────────────▼──────────────────────────┐
//! │  ScheduleRepository (local, in-memory)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use detection_schedule::db::{services, repositories::LocalRepository};
//! use detection_schedule::models::CameraId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let session = services::load_session(&repo, CameraId::new(1), 60).await?;
//!     println!("{} windows", session.windows().len());
//!     services::save_session(&repo, &session).await?;
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::repository::{RepositoryResult, ScheduleRepository};
use crate::error::ScheduleResult;
use crate::models::CameraId;
use crate::services::session::Session;

// ==================== Health & Connection ====================

/// Pass-through to the repository's health check.
pub async fn health_check<R: ScheduleRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Session Operations ====================

/// Load a camera's rows and group them into an editing session.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `camera_id` - Camera to load; an unknown camera yields an empty session
/// * `default_duration` - Minutes between a start and its derived end
///
/// # Returns
/// * `Ok(Session)` - Session holding the grouped windows
/// * `Err(ScheduleError::Storage)` - If the read fails
/// * `Err(ScheduleError::InvalidWindow)` - If a stored row is malformed
pub async fn load_session<R: ScheduleRepository + ?Sized>(
    repo: &R,
    camera_id: CameraId,
    default_duration: u16,
) -> ScheduleResult<Session> {
    let rows = repo
        .load_rows(camera_id)
        .await
        .map_err(|e| e.with_operation("load_session").for_camera(camera_id))?;
    let session = Session::from_rows(camera_id, &rows, default_duration)?;

    let conflicts = session.conflicts();
    if !conflicts.is_empty() {
        warn!(
            "Camera {}: stored schedule holds {} conflicting window pairs",
            camera_id,
            conflicts.len()
        );
    }
    info!(
        "Loaded schedule for camera {}: {} rows grouped into {} windows",
        camera_id,
        rows.len(),
        session.windows().len()
    );
    Ok(session)
}

/// Commit a session and replace the camera's stored rows with the result.
///
/// Nothing is written while the session still holds conflicts.
///
/// # Returns
/// * `Ok(usize)` - Number of rows written
/// * `Err(ScheduleError::OverlappingWindows)` - If the session holds conflicts
/// * `Err(ScheduleError::Storage)` - If the write fails
pub async fn save_session<R: ScheduleRepository + ?Sized>(
    repo: &R,
    session: &Session,
) -> ScheduleResult<usize> {
    let camera_id = session.camera_id();
    let rows = session.commit()?;
    let written = repo
        .save_rows(camera_id, &rows)
        .await
        .map_err(|e| e.with_operation("save_session").for_camera(camera_id))?;
    info!(
        "Saved schedule for camera {}: {} windows as {} rows",
        camera_id,
        session.windows().len(),
        written
    );
    Ok(written)
}
