//! Storage trait for per-camera schedule rows.
//!
//! The store knows nothing about windows or conflicts; it persists the flat
//! rows the external scheduler reads.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{CameraId, StorageRow};

/// Repository trait for schedule row persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Row Operations ====================

    /// Load every row stored for a camera.
    ///
    /// # Arguments
    /// * `camera_id` - The camera whose schedule to read
    ///
    /// # Returns
    /// * `Ok(Vec<StorageRow>)` - Rows sorted by (day, start, end); empty for an
    ///   unknown camera
    /// * `Err(RepositoryError)` - If the operation fails
    async fn load_rows(&self, camera_id: CameraId) -> RepositoryResult<Vec<StorageRow>>;

    /// Replace all rows stored for a camera.
    ///
    /// The replacement is atomic: readers see either the old rows or the new
    /// ones, never a mix.
    ///
    /// # Arguments
    /// * `camera_id` - The camera whose schedule to overwrite
    /// * `rows` - The complete new row set
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows written
    /// * `Err(RepositoryError)` - If the operation fails; stored rows are unchanged
    async fn save_rows(&self, camera_id: CameraId, rows: &[StorageRow])
        -> RepositoryResult<usize>;

    /// Remove a camera's schedule entirely.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows removed (0 for an unknown camera)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn delete_rows(&self, camera_id: CameraId) -> RepositoryResult<usize>;

    /// List cameras that have at least one stored row, in ascending order.
    async fn list_cameras(&self) -> RepositoryResult<Vec<CameraId>>;
}
