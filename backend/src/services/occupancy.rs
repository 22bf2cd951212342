//! Reference evaluation of persisted rows, as the external scheduler reads them.
//!
//! An instant is active when a row for its weekday covers it, or when a
//! wrapping row for the previous weekday spills over onto it.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{StorageRow, TimeOfDay, Weekday};

/// Whether detection is active at `time` on `day` according to `rows`.
///
/// Rows that do not describe a valid window are ignored.
pub fn is_active(rows: &[StorageRow], day: Weekday, time: TimeOfDay) -> bool {
    rows.iter()
        .filter(|row| row.day == day || row.day == day.previous())
        .filter_map(|row| row.window().ok())
        .any(|window| window.occupies(day, time))
}

/// [`is_active`] for a local wall-clock timestamp. Seconds are truncated.
pub fn is_active_at(rows: &[StorageRow], at: NaiveDateTime) -> bool {
    is_active(
        rows,
        Weekday::from(at.weekday()),
        TimeOfDay::from_naive_time(at.time()),
    )
}
