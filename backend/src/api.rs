//! Public API surface of the schedule engine.
//!
//! Re-exports the types an editing client needs and defines the
//! display-oriented DTOs used when a schedule is rendered as JSON.

pub use crate::algorithms::grouping::{expand, group};
pub use crate::algorithms::overlap::{
    all_pairwise_conflicts, conflicting_indices, conflicts, find_overlap, Overlap,
};
pub use crate::config::{PresetSettings, ScheduleConfig, ScheduleSettings};
pub use crate::error::{ScheduleError, ScheduleResult};
pub use crate::models::{
    CameraId, Interval, ScheduleWindow, StorageRow, TimeOfDay, TimeRole, Weekday, WeekdaySet,
    WindowKind, MINUTES_PER_DAY,
};
pub use crate::services::occupancy::{is_active, is_active_at};
pub use crate::services::presets::{builtin_presets, Preset, PresetCatalog};
pub use crate::services::session::{
    ConflictPolicy, ConflictWarning, MutationOutcome, Session, WindowPatch, DEFAULT_DURATION_MINUTES,
};

use serde::{Deserialize, Serialize};

/// Human-readable view of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Index of the window within its session.
    pub index: usize,
    pub days: Vec<String>,
    pub start: String,
    pub end: String,
    pub kind: WindowKind,
    pub duration_minutes: u16,
}

impl WindowSummary {
    pub fn new(index: usize, window: &ScheduleWindow) -> Self {
        Self {
            index,
            days: window
                .days()
                .iter()
                .map(|d| d.short_name().to_string())
                .collect(),
            start: window.start().to_string(),
            end: window.end().to_string(),
            kind: window.classify(),
            duration_minutes: window.duration_minutes(),
        }
    }
}

/// Human-readable view of a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub camera_id: CameraId,
    pub windows: Vec<WindowSummary>,
    /// Index pairs of windows that overlap each other.
    pub conflicts: Vec<(usize, usize)>,
}

impl From<&Session> for ScheduleSummary {
    fn from(session: &Session) -> Self {
        Self {
            camera_id: session.camera_id(),
            windows: session
                .windows()
                .iter()
                .enumerate()
                .map(|(i, w)| WindowSummary::new(i, w))
                .collect(),
            conflicts: session.conflicts(),
        }
    }
}
