//! Conversion between compact windows and flat per-weekday storage rows.
//!
//! [`expand`] flattens windows into one row per weekday; [`group`] folds rows
//! sharing a start and end back into a single window. For any conflict-free
//! window set in which no two windows share both start and end,
//! `group(expand(w))` returns the same windows, and for any row set produced
//! by `expand`, `expand(group(r))` returns the same rows.

use std::collections::BTreeMap;

use super::overlap;
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{ScheduleWindow, StorageRow, TimeOfDay, WeekdaySet};

/// Flatten windows into storage rows, sorted by (day, start, end).
///
/// Fails with [`ScheduleError::OverlappingWindows`] if any two windows
/// conflict; conflicting ranges are never merged.
pub fn expand(windows: &[ScheduleWindow]) -> ScheduleResult<Vec<StorageRow>> {
    let pairs = overlap::all_pairwise_conflicts(windows);
    if !pairs.is_empty() {
        return Err(ScheduleError::OverlappingWindows { pairs });
    }

    let mut rows: Vec<StorageRow> = windows
        .iter()
        .flat_map(|w| {
            w.days()
                .iter()
                .map(move |day| StorageRow::new(day, w.start(), w.end()))
        })
        .collect();
    rows.sort();
    Ok(rows)
}

/// Fold storage rows into windows, one per distinct (start, end) pair.
///
/// Row ends of `00:00` are read as `24:00` before grouping. The result is
/// sorted by (start, end).
pub fn group(rows: &[StorageRow]) -> ScheduleResult<Vec<ScheduleWindow>> {
    let mut by_range: BTreeMap<(TimeOfDay, TimeOfDay), WeekdaySet> = BTreeMap::new();
    for row in rows {
        by_range
            .entry((row.start, row.end.normalize_end()))
            .or_default()
            .insert(row.day);
    }

    by_range
        .into_iter()
        .map(|((start, end), days)| ScheduleWindow::new(days, start, end))
        .collect()
}
