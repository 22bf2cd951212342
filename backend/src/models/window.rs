//! Schedule windows and their flat storage rows.
//!
//! A [`ScheduleWindow`] is the compact editing form: a set of weekdays sharing
//! one start and one end. A [`StorageRow`] is the flat form persisted for the
//! external scheduler: a single weekday with a start and an end.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::time::{TimeOfDay, MINUTES_PER_DAY};
use super::weekday::{Weekday, WeekdaySet};
use crate::error::{ScheduleError, ScheduleResult};

/// Half-open interval `[start, end)` of minutes within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: u16,
    pub end: u16,
}

impl Interval {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}, {:02}:{:02})",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Whether a window stays within its own day or runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    SameDay,
    Overnight,
}

/// Recurring weekly window: active from `start` to `end` on every day in `days`.
///
/// Invariants, enforced by [`ScheduleWindow::new`] and by deserialization:
/// - `days` is non-empty
/// - `start` is in `0..1440`
/// - `end` is in `1..=1440` (an end of `00:00` is stored as `24:00`)
/// - `start != end`
///
/// A window wraps when `end <= start`; it then occupies `[start, 24:00)` on its
/// own days and `[00:00, end)` on the day after each of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawWindow")]
pub struct ScheduleWindow {
    days: WeekdaySet,
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawWindow {
    days: WeekdaySet,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawWindow> for ScheduleWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        ScheduleWindow::new(raw.days, raw.start, raw.end)
    }
}

impl ScheduleWindow {
    /// Validate and build a window, normalizing an end of `00:00` to `24:00`.
    pub fn new(days: WeekdaySet, start: TimeOfDay, end: TimeOfDay) -> ScheduleResult<Self> {
        if days.is_empty() {
            return Err(ScheduleError::invalid_window("day set is empty"));
        }
        if start.minutes() >= MINUTES_PER_DAY {
            return Err(ScheduleError::invalid_window(format!(
                "start {} must be before 24:00",
                start
            )));
        }
        let end = end.normalize_end();
        if start == end {
            return Err(ScheduleError::invalid_window(format!(
                "zero-length window {}-{}",
                start, end
            )));
        }
        Ok(Self { days, start, end })
    }

    /// Build a window from `HH:MM` strings.
    pub fn parse(days: WeekdaySet, start: &str, end: &str) -> ScheduleResult<Self> {
        Self::new(days, TimeOfDay::parse_start(start)?, TimeOfDay::parse_end(end)?)
    }

    pub fn days(&self) -> WeekdaySet {
        self.days
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// `end <= start`.
    pub fn wraps(&self) -> bool {
        self.end <= self.start
    }

    pub fn classify(&self) -> WindowKind {
        if self.wraps() {
            WindowKind::Overnight
        } else {
            WindowKind::SameDay
        }
    }

    /// Length of one occurrence in minutes.
    pub fn duration_minutes(&self) -> u16 {
        if self.wraps() {
            MINUTES_PER_DAY - self.start.minutes() + self.end.minutes()
        } else {
            self.end.minutes() - self.start.minutes()
        }
    }

    /// Days on which this window occupies any time: its own days, plus the
    /// following days when it wraps.
    pub fn touched_days(&self) -> WeekdaySet {
        if self.wraps() {
            self.days.union(self.days.shifted())
        } else {
            self.days
        }
    }

    /// The interval starting on a home day.
    fn home_interval(&self) -> Interval {
        let end = if self.wraps() {
            MINUTES_PER_DAY
        } else {
            self.end.minutes()
        };
        Interval::new(self.start.minutes(), end)
    }

    /// The interval carried over onto the next day, if the window wraps.
    fn spillover_interval(&self) -> Option<Interval> {
        self.wraps().then(|| Interval::new(0, self.end.minutes()))
    }

    /// Occupied intervals on `day`, spillover first.
    ///
    /// A wrapping window whose days include both `day` and the day before has
    /// two intervals here.
    pub fn intervals_on(&self, day: Weekday) -> impl Iterator<Item = Interval> {
        let spillover = if self.days.contains(day.previous()) {
            self.spillover_interval()
        } else {
            None
        };
        let home = self.days.contains(day).then(|| self.home_interval());
        spillover.into_iter().chain(home)
    }

    /// Whether the minute `time` of `day` falls inside this window.
    pub fn occupies(&self, day: Weekday, time: TimeOfDay) -> bool {
        self.intervals_on(day)
            .any(|interval| interval.contains(time.minutes()))
    }

    pub fn with_days(self, days: WeekdaySet) -> ScheduleResult<Self> {
        Self::new(days, self.start, self.end)
    }
}

impl fmt::Display for ScheduleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.days, self.start, self.end)?;
        if self.wraps() {
            f.write_str(" (overnight)")?;
        }
        Ok(())
    }
}

/// One persisted schedule row: a single weekday with a start and an end.
///
/// Field order gives rows a natural (day, start, end) sort order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StorageRow {
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl StorageRow {
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { day, start, end }
    }

    /// The single-day window this row describes.
    pub fn window(&self) -> ScheduleResult<ScheduleWindow> {
        ScheduleWindow::new(WeekdaySet::single(self.day), self.start, self.end)
    }
}

impl fmt::Display for StorageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}
