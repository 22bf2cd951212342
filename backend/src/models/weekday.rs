use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Day of the week, indexed Sunday = 0 through Saturday = 6.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn from_index(index: u8) -> ScheduleResult<Self> {
        Self::ALL.get(index as usize).copied().ok_or_else(|| {
            ScheduleError::invalid_window(format!("weekday index {} out of range 0..=6", index))
        })
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The following calendar day; Saturday wraps to Sunday.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % 7]
    }

    /// The preceding calendar day; Sunday wraps to Saturday.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() as usize + 6) % 7]
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ScheduleError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.index()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A set of weekdays stored as a 7-bit mask (bit `i` is weekday index `i`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const MASK: u8 = 0b0111_1111;

    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet(Self::MASK);
    /// Monday through Friday.
    pub const WORKWEEK: WeekdaySet = WeekdaySet(0b0011_1110);

    pub fn single(day: Weekday) -> Self {
        Self(1 << day.index())
    }

    /// Build a set from raw indices, rejecting anything outside `0..=6`.
    pub fn from_indices(indices: &[u8]) -> ScheduleResult<Self> {
        indices
            .iter()
            .map(|&i| Weekday::from_index(i))
            .collect::<ScheduleResult<WeekdaySet>>()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.index());
    }

    #[must_use]
    pub fn union(self, other: WeekdaySet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn intersection(self, other: WeekdaySet) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub fn difference(self, other: WeekdaySet) -> Self {
        Self(self.0 & !other.0)
    }

    /// `{d + 1 : d in self}`, with Saturday rotating onto Sunday.
    #[must_use]
    pub fn shifted(self) -> Self {
        Self(((self.0 << 1) | (self.0 >> 6)) & Self::MASK)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in ascending order starting from Sunday.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = ScheduleError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().map(Weekday::index).collect()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Weekday::short_name).collect();
        f.write_str(&names.join(", "))
    }
}
