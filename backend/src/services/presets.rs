//! Named window templates an operator can drop into a schedule.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{ScheduleWindow, Weekday, WeekdaySet};

/// A named, fixed window template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub window: ScheduleWindow,
}

impl Preset {
    pub fn new(name: impl Into<String>, window: ScheduleWindow) -> Self {
        Self {
            name: name.into(),
            window,
        }
    }
}

pub const MORNING_SHIFT: &str = "Morning Shift";
pub const NIGHT_SHIFT: &str = "Night Shift";

/// Presets shipped with the engine.
pub fn builtin_presets() -> ScheduleResult<Vec<Preset>> {
    let mon_to_thu: WeekdaySet = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
    ]
    .into_iter()
    .collect();

    Ok(vec![
        Preset::new(
            MORNING_SHIFT,
            ScheduleWindow::parse(mon_to_thu, "07:30", "16:30")?,
        ),
        Preset::new(
            NIGHT_SHIFT,
            ScheduleWindow::parse(WeekdaySet::WORKWEEK, "23:30", "07:30")?,
        ),
    ])
}

/// Ordered collection of presets, looked up by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in presets.
    pub fn builtin() -> ScheduleResult<Self> {
        let mut catalog = Self::new();
        for preset in builtin_presets()? {
            catalog.insert(preset);
        }
        Ok(catalog)
    }

    /// Add a preset, replacing any existing preset with the same name.
    pub fn insert(&mut self, preset: Preset) {
        match self.position(&preset.name) {
            Some(i) => self.presets[i] = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn get(&self, name: &str) -> ScheduleResult<&Preset> {
        self.position(name)
            .map(|i| &self.presets[i])
            .ok_or_else(|| ScheduleError::UnknownPreset(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.presets
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}
