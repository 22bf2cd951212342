//! Conflict detection between recurring weekly windows.
//!
//! Windows live on a circular week: a window that wraps past midnight on day
//! *d* also occupies the start of day *d + 1* (Saturday spills into Sunday).
//! Two windows conflict when any of their occupied intervals on a shared day
//! overlap, comparing home and spillover intervals in every combination.

use serde::{Deserialize, Serialize};

use crate::models::{Interval, ScheduleWindow, Weekday};

/// First overlapping interval pair found between two windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    /// Calendar day on which the two intervals collide.
    pub day: Weekday,
    /// Interval of the first window on `day`.
    pub first: Interval,
    /// Interval of the second window on `day`.
    pub second: Interval,
}

/// Find where two windows collide, if they do.
///
/// Only days touched by both windows are inspected; for each, every occupied
/// interval of `a` is compared with every occupied interval of `b`.
pub fn find_overlap(a: &ScheduleWindow, b: &ScheduleWindow) -> Option<Overlap> {
    let shared = a.touched_days().intersection(b.touched_days());
    if shared.is_empty() {
        return None;
    }

    shared.iter().find_map(|day| {
        a.intervals_on(day).find_map(|first| {
            b.intervals_on(day)
                .find(|second| first.overlaps(second))
                .map(|second| Overlap { day, first, second })
        })
    })
}

/// Whether two windows occupy any common instant of the week. Symmetric.
pub fn windows_conflict(a: &ScheduleWindow, b: &ScheduleWindow) -> bool {
    find_overlap(a, b).is_some()
}

/// Whether `candidate` conflicts with any window in `existing`.
pub fn conflicts(existing: &[ScheduleWindow], candidate: &ScheduleWindow) -> bool {
    existing.iter().any(|w| windows_conflict(w, candidate))
}

/// Indices of the windows in `existing` that conflict with `candidate`.
///
/// `skip` excludes one index from the comparison, used when `candidate`
/// replaces the window at that position.
pub fn conflicting_indices(
    existing: &[ScheduleWindow],
    candidate: &ScheduleWindow,
    skip: Option<usize>,
) -> Vec<usize> {
    existing
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .filter(|(_, w)| windows_conflict(w, candidate))
        .map(|(i, _)| i)
        .collect()
}

/// Every conflicting pair `(i, j)` with `i < j`, in ascending order.
pub fn all_pairwise_conflicts(windows: &[ScheduleWindow]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in windows.iter().enumerate() {
        for (j, b) in windows.iter().enumerate().skip(i + 1) {
            if windows_conflict(a, b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
