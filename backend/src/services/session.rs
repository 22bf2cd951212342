//! In-memory editing session for one camera's weekly schedule.
//!
//! Every mutation validates the candidate window, checks it against the rest
//! of the session and either applies it or hands back a [`ConflictWarning`].
//! A warning leaves the session untouched; repeating the call with
//! [`ConflictPolicy::Force`] applies the change anyway.

use log::{debug, warn};
use serde::Serialize;

use super::presets::Preset;
use crate::algorithms::{grouping, overlap};
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{CameraId, ScheduleWindow, StorageRow, TimeOfDay, WeekdaySet};

/// Offset used to derive an end from a start when none is given explicitly.
pub const DEFAULT_DURATION_MINUTES: u16 = 60;

/// What to do when a mutation would overlap existing windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Report the conflict and leave the session unchanged.
    #[default]
    Warn,
    /// Apply the mutation even though it conflicts.
    Force,
}

/// Recoverable outcome of a mutation that would overlap existing windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictWarning {
    pub candidate: ScheduleWindow,
    /// Index and value of each window in the session the candidate overlaps.
    pub conflicting: Vec<(usize, ScheduleWindow)>,
}

impl std::fmt::Display for ConflictWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} overlaps ", self.candidate)?;
        let others: Vec<String> = self
            .conflicting
            .iter()
            .map(|(i, w)| format!("#{} {}", i, w))
            .collect();
        f.write_str(&others.join("; "))
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Conflict(ConflictWarning),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    pub fn conflict(&self) -> Option<&ConflictWarning> {
        match self {
            MutationOutcome::Conflict(warning) => Some(warning),
            MutationOutcome::Applied => None,
        }
    }
}

/// Partial update of a window. Unset fields keep their current value, except
/// that `end` may be re-derived from a new `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPatch {
    pub days: Option<WeekdaySet>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl WindowPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn days(mut self, days: WeekdaySet) -> Self {
        self.days = Some(days);
        self
    }

    pub fn start(mut self, start: TimeOfDay) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }
}

/// Editing state for one camera.
#[derive(Debug, Clone)]
pub struct Session {
    camera_id: CameraId,
    windows: Vec<ScheduleWindow>,
    default_duration: u16,
}

impl Session {
    pub fn new(camera_id: CameraId) -> Self {
        Self::with_default_duration(camera_id, DEFAULT_DURATION_MINUTES)
    }

    /// Empty session whose derived ends sit `default_duration` minutes after
    /// their start.
    pub fn with_default_duration(camera_id: CameraId, default_duration: u16) -> Self {
        Self {
            camera_id,
            windows: Vec::new(),
            default_duration,
        }
    }

    /// Start a session from persisted rows, grouping them into windows.
    ///
    /// Rows carry no record of how an end was entered, so the caller supplies
    /// the configured `default_duration` again on every load.
    pub fn from_rows(
        camera_id: CameraId,
        rows: &[StorageRow],
        default_duration: u16,
    ) -> ScheduleResult<Self> {
        let mut session = Self::with_default_duration(camera_id, default_duration);
        session.windows = grouping::group(rows)?;
        Ok(session)
    }

    pub fn camera_id(&self) -> CameraId {
        self.camera_id
    }

    pub fn windows(&self) -> &[ScheduleWindow] {
        &self.windows
    }

    pub fn default_duration(&self) -> u16 {
        self.default_duration
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    // ==================== Mutations ====================

    pub fn add_window(
        &mut self,
        days: WeekdaySet,
        start: TimeOfDay,
        end: TimeOfDay,
        policy: ConflictPolicy,
    ) -> ScheduleResult<MutationOutcome> {
        let window = ScheduleWindow::new(days, start, end)?;
        Ok(self.insert_window(window, policy))
    }

    /// Append an already-validated window.
    pub fn insert_window(
        &mut self,
        window: ScheduleWindow,
        policy: ConflictPolicy,
    ) -> MutationOutcome {
        if let Some(warning) = self.check(&window, None, policy) {
            return MutationOutcome::Conflict(warning);
        }
        debug!("Camera {}: added window {}", self.camera_id, window);
        self.windows.push(window);
        MutationOutcome::Applied
    }

    /// Replace the window at `index` with the patched version.
    ///
    /// When the patch moves `start` without naming an `end`, and the current
    /// end sits exactly `default_duration` after the current start, the end
    /// moves with the start. A hand-edited end is left alone.
    pub fn update_window(
        &mut self,
        index: usize,
        patch: WindowPatch,
        policy: ConflictPolicy,
    ) -> ScheduleResult<MutationOutcome> {
        let current = *self.get(index)?;

        let start = patch.start.unwrap_or(current.start());
        let end = match (patch.end, patch.start) {
            (Some(end), _) => end,
            (None, Some(new_start)) if self.end_is_derived(&current) => {
                self.derived_end(new_start)
            }
            (None, _) => current.end(),
        };
        let days = patch.days.unwrap_or(current.days());

        let candidate = ScheduleWindow::new(days, start, end)?;
        if let Some(warning) = self.check(&candidate, Some(index), policy) {
            return Ok(MutationOutcome::Conflict(warning));
        }

        debug!(
            "Camera {}: window #{} changed from {} to {}",
            self.camera_id, index, current, candidate
        );
        self.windows[index] = candidate;
        Ok(MutationOutcome::Applied)
    }

    /// Remove and return the window at `index`.
    pub fn remove_window(&mut self, index: usize) -> ScheduleResult<ScheduleWindow> {
        self.get(index)?;
        let removed = self.windows.remove(index);
        debug!("Camera {}: removed window {}", self.camera_id, removed);
        Ok(removed)
    }

    pub fn apply_preset(&mut self, preset: &Preset, policy: ConflictPolicy) -> MutationOutcome {
        debug!("Camera {}: applying preset '{}'", self.camera_id, preset.name);
        self.insert_window(preset.window, policy)
    }

    // ==================== Queries ====================

    /// Conflicting window pairs currently held, e.g. after forced mutations.
    pub fn conflicts(&self) -> Vec<(usize, usize)> {
        overlap::all_pairwise_conflicts(&self.windows)
    }

    /// Flatten the session into storage rows.
    ///
    /// Fails with [`ScheduleError::OverlappingWindows`] while forced conflicts
    /// remain.
    pub fn commit(&self) -> ScheduleResult<Vec<StorageRow>> {
        let rows = grouping::expand(&self.windows)?;
        debug!(
            "Camera {}: committed {} windows as {} rows",
            self.camera_id,
            self.windows.len(),
            rows.len()
        );
        Ok(rows)
    }

    fn get(&self, index: usize) -> ScheduleResult<&ScheduleWindow> {
        self.windows.get(index).ok_or(ScheduleError::WindowNotFound {
            index,
            len: self.windows.len(),
        })
    }

    fn derived_end(&self, start: TimeOfDay) -> TimeOfDay {
        start.plus_minutes(self.default_duration).normalize_end()
    }

    fn end_is_derived(&self, window: &ScheduleWindow) -> bool {
        window.end() == self.derived_end(window.start())
    }

    /// Returns a warning when `candidate` conflicts and the policy is `Warn`.
    fn check(
        &self,
        candidate: &ScheduleWindow,
        skip: Option<usize>,
        policy: ConflictPolicy,
    ) -> Option<ConflictWarning> {
        let indices = overlap::conflicting_indices(&self.windows, candidate, skip);
        if indices.is_empty() {
            return None;
        }

        let warning = ConflictWarning {
            candidate: *candidate,
            conflicting: indices.into_iter().map(|i| (i, self.windows[i])).collect(),
        };
        match policy {
            ConflictPolicy::Warn => {
                warn!("Camera {}: {}", self.camera_id, warning);
                Some(warning)
            }
            ConflictPolicy::Force => {
                warn!("Camera {}: forcing conflicting change, {}", self.camera_id, warning);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;
    use crate::services::presets::{PresetCatalog, NIGHT_SHIFT};

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse_end(s).unwrap()
    }

    fn tuesday() -> WeekdaySet {
        WeekdaySet::single(Weekday::Tuesday)
    }

    fn night_shift() -> Preset {
        PresetCatalog::builtin()
            .unwrap()
            .get(NIGHT_SHIFT)
            .unwrap()
            .clone()
    }

    fn session_with_tuesday_morning() -> Session {
        let mut session = Session::new(CameraId::new(7));
        let outcome = session
            .add_window(tuesday(), t("06:00"), t("09:00"), ConflictPolicy::Warn)
            .unwrap();
        assert!(outcome.is_applied());
        session
    }

    #[test]
    fn test_preset_conflict_does_not_mutate() {
        let mut session = session_with_tuesday_morning();
        let before = session.windows().to_vec();

        let outcome = session.apply_preset(&night_shift(), ConflictPolicy::Warn);
        let warning = outcome.conflict().expect("night shift overlaps Tuesday morning");
        assert_eq!(warning.candidate, night_shift().window);
        assert_eq!(warning.conflicting, vec![(0, before[0])]);
        assert_eq!(session.windows(), before.as_slice());
    }

    #[test]
    fn test_forced_preset_is_applied_and_blocks_commit() {
        let mut session = session_with_tuesday_morning();
        let outcome = session.apply_preset(&night_shift(), ConflictPolicy::Force);
        assert!(outcome.is_applied());
        assert_eq!(session.len(), 2);
        assert_eq!(session.conflicts(), vec![(0, 1)]);
        assert!(matches!(
            session.commit(),
            Err(ScheduleError::OverlappingWindows { .. })
        ));

        session.remove_window(0).unwrap();
        assert!(session.conflicts().is_empty());
        assert_eq!(session.commit().unwrap().len(), 5);
    }

    #[test]
    fn test_add_window_with_empty_days_fails() {
        let mut session = Session::new(CameraId::new(1));
        let result = session.add_window(WeekdaySet::EMPTY, t("07:00"), t("08:00"), ConflictPolicy::Warn);
        assert!(matches!(result, Err(ScheduleError::InvalidWindow(_))));
        assert!(session.is_empty());
    }

    #[test]
    fn test_add_non_conflicting_window() {
        let mut session = session_with_tuesday_morning();
        let outcome = session
            .add_window(tuesday(), t("09:00"), t("12:00"), ConflictPolicy::Warn)
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Applied);
        assert!(session.conflicts().is_empty());
    }

    #[test]
    fn test_update_derives_end_from_new_start() {
        let mut session = Session::new(CameraId::new(1));
        let _ = session
            .add_window(tuesday(), t("08:00"), t("09:00"), ConflictPolicy::Warn)
            .unwrap();

        let outcome = session
            .update_window(0, WindowPatch::new().start(t("10:15")), ConflictPolicy::Warn)
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(session.windows()[0].start(), t("10:15"));
        assert_eq!(session.windows()[0].end(), t("11:15"));
    }

    #[test]
    fn test_update_derived_end_crossing_midnight() {
        let mut session = Session::new(CameraId::new(1));
        let _ = session
            .add_window(tuesday(), t("22:00"), t("23:00"), ConflictPolicy::Warn)
            .unwrap();
        let _ = session
            .update_window(0, WindowPatch::new().start(t("23:00")), ConflictPolicy::Warn)
            .unwrap();
        let w = session.windows()[0];
        assert_eq!(w.end(), TimeOfDay::END_OF_DAY);
        assert!(!w.wraps());

        let _ = session
            .update_window(0, WindowPatch::new().start(t("23:30")), ConflictPolicy::Warn)
            .unwrap();
        assert_eq!(session.windows()[0].end(), t("00:30"));
        assert!(session.windows()[0].wraps());
    }

    #[test]
    fn test_update_keeps_hand_edited_end() {
        let mut session = Session::new(CameraId::new(1));
        let _ = session
            .add_window(tuesday(), t("08:00"), t("12:00"), ConflictPolicy::Warn)
            .unwrap();
        let _ = session
            .update_window(0, WindowPatch::new().start(t("09:00")), ConflictPolicy::Warn)
            .unwrap();
        assert_eq!(session.windows()[0].end(), t("12:00"));
    }

    #[test]
    fn test_update_explicit_end_wins() {
        let mut session = Session::new(CameraId::new(1));
        let _ = session
            .add_window(tuesday(), t("08:00"), t("09:00"), ConflictPolicy::Warn)
            .unwrap();
        let patch = WindowPatch::new().start(t("10:00")).end(t("14:00"));
        let _ = session.update_window(0, patch, ConflictPolicy::Warn).unwrap();
        assert_eq!(session.windows()[0].end(), t("14:00"));
    }

    #[test]
    fn test_update_uses_configured_duration() {
        let mut session = Session::with_default_duration(CameraId::new(1), 30);
        let _ = session
            .add_window(tuesday(), t("08:00"), t("08:30"), ConflictPolicy::Warn)
            .unwrap();
        let _ = session
            .update_window(0, WindowPatch::new().start(t("13:00")), ConflictPolicy::Warn)
            .unwrap();
        assert_eq!(session.windows()[0].end(), t("13:30"));
    }

    #[test]
    fn test_update_does_not_conflict_with_itself() {
        let mut session = session_with_tuesday_morning();
        let patch = WindowPatch::new().end(t("10:00"));
        let outcome = session.update_window(0, patch, ConflictPolicy::Warn).unwrap();
        assert!(outcome.is_applied());
        assert_eq!(session.windows()[0].end(), t("10:00"));
    }

    #[test]
    fn test_update_conflict_leaves_window_unchanged() {
        let mut session = session_with_tuesday_morning();
        let _ = session
            .add_window(tuesday(), t("12:00"), t("14:00"), ConflictPolicy::Warn)
            .unwrap();

        let patch = WindowPatch::new().end(t("13:00"));
        let outcome = session.update_window(0, patch, ConflictPolicy::Warn).unwrap();
        let warning = outcome.conflict().unwrap();
        assert_eq!(warning.conflicting.len(), 1);
        assert_eq!(warning.conflicting[0].0, 1);
        assert_eq!(session.windows()[0].end(), t("09:00"));
    }

    #[test]
    fn test_update_days() {
        let mut session = session_with_tuesday_morning();
        let patch = WindowPatch::new().days(WeekdaySet::WORKWEEK);
        let _ = session.update_window(0, patch, ConflictPolicy::Warn).unwrap();
        assert_eq!(session.windows()[0].days(), WeekdaySet::WORKWEEK);
        assert_eq!(session.commit().unwrap().len(), 5);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut session = session_with_tuesday_morning();
        assert!(matches!(
            session.remove_window(3),
            Err(ScheduleError::WindowNotFound { index: 3, len: 1 })
        ));
        assert!(matches!(
            session.update_window(1, WindowPatch::new(), ConflictPolicy::Warn),
            Err(ScheduleError::WindowNotFound { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_remove_window_returns_it() {
        let mut session = session_with_tuesday_morning();
        let removed = session.remove_window(0).unwrap();
        assert_eq!(removed.start(), t("06:00"));
        assert!(session.is_empty());
        assert!(session.commit().unwrap().is_empty());
    }

    #[test]
    fn test_from_rows_groups_days() {
        let rows = vec![
            StorageRow::new(Weekday::Monday, t("08:00"), t("12:00")),
            StorageRow::new(Weekday::Wednesday, t("08:00"), t("12:00")),
        ];
        let session = Session::from_rows(CameraId::new(3), &rows, 45).unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.camera_id(), CameraId::new(3));
        assert_eq!(session.default_duration(), 45);
        assert_eq!(session.commit().unwrap(), rows);
    }

    #[test]
    fn test_from_rows_keeps_derived_end_rule() {
        let rows: Vec<StorageRow> = Weekday::ALL
            .into_iter()
            .map(|day| StorageRow::new(day, t("08:00"), t("08:30")))
            .collect();
        let mut session = Session::from_rows(CameraId::new(3), &rows, 30).unwrap();

        let _ = session
            .update_window(0, WindowPatch::new().start(t("10:00")), ConflictPolicy::Warn)
            .unwrap();
        assert_eq!(session.windows()[0].end(), t("10:30"));
        assert!(!session.windows()[0].wraps());
    }
}
