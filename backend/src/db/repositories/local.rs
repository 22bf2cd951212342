//! In-memory local repository implementation.
//!
//! Rows live in a `HashMap` keyed by camera, guarded by a single
//! `parking_lot::RwLock`. Suitable for tests, the CLI and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
use crate::models::{CameraId, StorageRow};

/// In-memory local repository.
///
/// # Example
/// ```
/// use detection_schedule::db::repositories::LocalRepository;
/// use detection_schedule::db::repository::ScheduleRepository;
/// use detection_schedule::models::CameraId;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     let rows = repo.load_rows(CameraId::new(1)).await.unwrap();
///     assert!(rows.is_empty());
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    rows: HashMap<CameraId, Vec<StorageRow>>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn is_healthy(&self) -> bool {
        self.data.read().is_healthy
    }

    /// Clear all rows, keeping the health flag.
    pub fn clear(&self) {
        self.data.write().rows.clear();
    }

    /// Number of cameras with stored rows.
    pub fn camera_count(&self) -> usize {
        self.data.read().rows.len()
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.is_healthy() {
            return Err(RepositoryError::connection(
                "Local store is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }

    /// Reject rows the external scheduler could not interpret.
    fn validate_rows(camera_id: CameraId, rows: &[StorageRow]) -> RepositoryResult<()> {
        for (i, row) in rows.iter().enumerate() {
            if let Err(e) = row.window() {
                return Err(RepositoryError::validation(
                    format!("row #{} ({}): {}", i, row, e),
                    ErrorContext::new("save_rows")
                        .with_entity("camera")
                        .with_entity_id(camera_id),
                ));
            }
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.is_healthy())
    }

    async fn load_rows(&self, camera_id: CameraId) -> RepositoryResult<Vec<StorageRow>> {
        self.check_health("load_rows")?;
        let rows = self
            .data
            .read()
            .rows
            .get(&camera_id)
            .cloned()
            .unwrap_or_default();
        debug!("Loaded {} rows for camera {}", rows.len(), camera_id);
        Ok(rows)
    }

    async fn save_rows(
        &self,
        camera_id: CameraId,
        rows: &[StorageRow],
    ) -> RepositoryResult<usize> {
        self.check_health("save_rows")?;
        Self::validate_rows(camera_id, rows)?;

        let mut sorted = rows.to_vec();
        sorted.sort();
        let count = sorted.len();

        let mut data = self.data.write();
        if sorted.is_empty() {
            data.rows.remove(&camera_id);
        } else {
            data.rows.insert(camera_id, sorted);
        }
        debug!("Saved {} rows for camera {}", count, camera_id);
        Ok(count)
    }

    async fn delete_rows(&self, camera_id: CameraId) -> RepositoryResult<usize> {
        self.check_health("delete_rows")?;
        let removed = self
            .data
            .write()
            .rows
            .remove(&camera_id)
            .map_or(0, |rows| rows.len());
        debug!("Deleted {} rows for camera {}", removed, camera_id);
        Ok(removed)
    }

    async fn list_cameras(&self) -> RepositoryResult<Vec<CameraId>> {
        self.check_health("list_cameras")?;
        let mut cameras: Vec<CameraId> = self.data.read().rows.keys().copied().collect();
        cameras.sort();
        Ok(cameras)
    }
}
