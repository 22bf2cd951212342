use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Number of minutes in one day; also the `24:00` end marker.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Which end of a window a time string is parsed for.
///
/// `24:00` means midnight of the following day as an end, and plain midnight
/// as a start, so the two must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRole {
    Start,
    End,
}

/// Minutes since local midnight, in `0..=1440`.
///
/// `1440` is only meaningful as an end marker. Raw values are accepted at any
/// minute granularity so rows written by other tools still load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Create a time of day from a raw minute count.
    pub fn new(minutes: u16) -> ScheduleResult<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(ScheduleError::invalid_time(
                minutes.to_string(),
                "minutes must be within 0..=1440",
            ));
        }
        Ok(Self(minutes))
    }

    /// Create a time of day from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> ScheduleResult<Self> {
        if minute > 59 {
            return Err(ScheduleError::invalid_time(
                format!("{}:{:02}", hour, minute),
                "minute out of range",
            ));
        }
        let minutes = hour
            .checked_mul(60)
            .and_then(|m| m.checked_add(minute))
            .ok_or_else(|| {
                ScheduleError::invalid_time(format!("{}:{:02}", hour, minute), "hour out of range")
            })?;
        Self::new(minutes)
    }

    /// Parse an `HH:MM` string for the given role.
    ///
    /// `24:00` yields 1440 for [`TimeRole::End`] and 0 for [`TimeRole::Start`].
    pub fn parse(text: &str, role: TimeRole) -> ScheduleResult<Self> {
        let trimmed = text.trim();
        let (hour_str, minute_str) = trimmed
            .split_once(':')
            .ok_or_else(|| ScheduleError::invalid_time(text, "expected HH:MM"))?;

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour_str) || hour_str.len() > 2 {
            return Err(ScheduleError::invalid_time(text, "hour must be 1-2 digits"));
        }
        if !all_digits(minute_str) || minute_str.len() != 2 {
            return Err(ScheduleError::invalid_time(text, "minute must be 2 digits"));
        }

        let hour: u16 = hour_str
            .parse()
            .map_err(|_| ScheduleError::invalid_time(text, "hour is not a number"))?;
        let minute: u16 = minute_str
            .parse()
            .map_err(|_| ScheduleError::invalid_time(text, "minute is not a number"))?;

        if hour > 24 {
            return Err(ScheduleError::invalid_time(text, "hour out of range"));
        }
        if minute > 59 {
            return Err(ScheduleError::invalid_time(text, "minute out of range"));
        }
        if hour == 24 {
            if minute != 0 {
                return Err(ScheduleError::invalid_time(text, "only 24:00 is allowed"));
            }
            return Ok(match role {
                TimeRole::Start => Self::MIDNIGHT,
                TimeRole::End => Self::END_OF_DAY,
            });
        }

        Ok(Self(hour * 60 + minute))
    }

    pub fn parse_start(text: &str) -> ScheduleResult<Self> {
        Self::parse(text, TimeRole::Start)
    }

    pub fn parse_end(text: &str) -> ScheduleResult<Self> {
        Self::parse(text, TimeRole::End)
    }

    /// Truncate a wall-clock time to the minute.
    pub fn from_naive_time(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Raw minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Map an end value of `00:00` to `24:00`.
    ///
    /// Every other value, including 1440, is returned unchanged.
    #[must_use]
    pub fn normalize_end(self) -> Self {
        if self.0 == 0 {
            Self::END_OF_DAY
        } else {
            self
        }
    }

    /// Clock arithmetic: advance by `minutes`, wrapping at midnight.
    ///
    /// The result is always in `0..1440`; callers deriving an end value should
    /// pass it through [`normalize_end`](Self::normalize_end).
    #[must_use]
    pub fn plus_minutes(self, minutes: u16) -> Self {
        let total = (self.0 as u32 + minutes as u32) % MINUTES_PER_DAY as u32;
        Self(total as u16)
    }

    /// Whether this value sits on a `step`-minute grid.
    pub fn is_aligned(&self, step: u16) -> bool {
        step != 0 && self.0 % step == 0
    }

    /// All grid values `0, step, 2*step, ..., 1440` for time pickers.
    pub fn slots(step: u16) -> impl Iterator<Item = TimeOfDay> {
        let step = step.max(1) as usize;
        (0..=MINUTES_PER_DAY).step_by(step).map(TimeOfDay)
    }
}

impl TryFrom<u16> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<TimeOfDay> for u16 {
    fn from(t: TimeOfDay) -> Self {
        t.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
