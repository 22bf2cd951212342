//! Schedule engine configuration file support.
//!
//! Settings are read from a TOML file and may be overridden from the
//! environment:
//!
//! ```toml
//! [schedule]
//! default_duration_minutes = 60
//! slot_minutes = 15
//!
//! [[presets]]
//! name = "Weekend Patrol"
//! days = [0, 6]
//! start = "08:00"
//! end = "20:00"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{ScheduleWindow, WeekdaySet, MINUTES_PER_DAY};
use crate::services::presets::{Preset, PresetCatalog};
use crate::services::session::DEFAULT_DURATION_MINUTES;

pub const ENV_DEFAULT_DURATION: &str = "SCHEDULE_DEFAULT_DURATION_MINUTES";
pub const ENV_SLOT_MINUTES: &str = "SCHEDULE_SLOT_MINUTES";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub presets: Vec<PresetSettings>,
}

/// Editing behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Offset used when an end is derived from a start.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u16,
    /// Editing granularity offered by time pickers.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u16,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

fn default_duration_minutes() -> u16 {
    DEFAULT_DURATION_MINUTES
}

fn default_slot_minutes() -> u16 {
    15
}

/// A preset as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSettings {
    pub name: String,
    /// Weekday indices, 0 = Sunday.
    pub days: Vec<u8>,
    pub start: String,
    pub end: String,
}

impl PresetSettings {
    pub fn to_preset(&self) -> ScheduleResult<Preset> {
        let days = WeekdaySet::from_indices(&self.days)?;
        let window = ScheduleWindow::parse(days, &self.start, &self.end)?;
        Ok(Preset::new(self.name.trim(), window))
    }
}

impl ScheduleConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ScheduleConfig)` if the file parses and validates
    /// * `Err(ScheduleError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScheduleError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let config: ScheduleConfig = toml::from_str(content).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first `schedule.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(config))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in any location
    /// * `Err(ScheduleError::Configuration)` if a file exists but is invalid
    pub fn from_default_location() -> ScheduleResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("schedule.toml"),
            PathBuf::from("backend/schedule.toml"),
            PathBuf::from("../schedule.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Reading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Apply `SCHEDULE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) -> ScheduleResult<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then re-validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ScheduleResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEFAULT_DURATION) {
            self.schedule.default_duration_minutes = parse_override(ENV_DEFAULT_DURATION, &value)?;
        }
        if let Some(value) = lookup(ENV_SLOT_MINUTES) {
            self.schedule.slot_minutes = parse_override(ENV_SLOT_MINUTES, &value)?;
        }
        self.validate()
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        let duration = self.schedule.default_duration_minutes;
        if duration == 0 || duration >= MINUTES_PER_DAY {
            return Err(ScheduleError::Configuration(format!(
                "default_duration_minutes must be in 1..=1439, got {}",
                duration
            )));
        }

        let slot = self.schedule.slot_minutes;
        if slot == 0 || slot > MINUTES_PER_DAY || MINUTES_PER_DAY % slot != 0 {
            return Err(ScheduleError::Configuration(format!(
                "slot_minutes must divide 1440, got {}",
                slot
            )));
        }

        for preset in &self.presets {
            if preset.name.trim().is_empty() {
                return Err(ScheduleError::Configuration(
                    "preset name must not be empty".to_string(),
                ));
            }
            preset.to_preset().map_err(|e| {
                ScheduleError::Configuration(format!("preset '{}': {}", preset.name, e))
            })?;
        }
        Ok(())
    }

    /// Built-in presets merged with the configured ones; a configured preset
    /// replaces a built-in of the same name.
    pub fn preset_catalog(&self) -> ScheduleResult<PresetCatalog> {
        let mut catalog = PresetCatalog::builtin()?;
        for settings in &self.presets {
            catalog.insert(settings.to_preset()?);
        }
        Ok(catalog)
    }
}

fn parse_override(key: &str, value: &str) -> ScheduleResult<u16> {
    value.trim().parse().map_err(|_| {
        ScheduleError::Configuration(format!("{} must be a number of minutes, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;
    use std::collections::HashMap;
    use std::io::Write;

    const SAMPLE: &str = r#"
[schedule]
default_duration_minutes = 90
slot_minutes = 30

[[presets]]
name = "Weekend Patrol"
days = [0, 6]
start = "08:00"
end = "20:00"
"#;

    #[test]
    fn test_parse_config() {
        let config = ScheduleConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.schedule.default_duration_minutes, 90);
        assert_eq!(config.schedule.slot_minutes, 30);
        assert_eq!(config.presets.len(), 1);
        assert_eq!(config.presets[0].days, vec![0, 6]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ScheduleConfig::from_toml_str("").unwrap();
        assert_eq!(config.schedule.default_duration_minutes, 60);
        assert_eq!(config.schedule.slot_minutes, 15);
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = ScheduleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schedule.default_duration_minutes, 90);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScheduleConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ScheduleError::Configuration(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_slot = "[schedule]\nslot_minutes = 7\n";
        assert!(matches!(
            ScheduleConfig::from_toml_str(bad_slot),
            Err(ScheduleError::Configuration(_))
        ));

        let bad_duration = "[schedule]\ndefault_duration_minutes = 1440\n";
        assert!(ScheduleConfig::from_toml_str(bad_duration).is_err());

        let bad_preset = r#"
[[presets]]
name = "Broken"
days = [1]
start = "08:00"
end = "08:00"
"#;
        assert!(ScheduleConfig::from_toml_str(bad_preset).is_err());

        assert!(ScheduleConfig::from_toml_str("[schedule\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ScheduleConfig::default();
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_DEFAULT_DURATION, "45"), (ENV_SLOT_MINUTES, " 5 ")]);
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.schedule.default_duration_minutes, 45);
        assert_eq!(config.schedule.slot_minutes, 5);

        let result = config.apply_overrides(|key| {
            (key == ENV_SLOT_MINUTES).then(|| "often".to_string())
        });
        assert!(matches!(result, Err(ScheduleError::Configuration(_))));
    }

    #[test]
    fn test_preset_catalog_merges_configured_presets() {
        let mut config = ScheduleConfig::from_toml_str(SAMPLE).unwrap();
        config.presets.push(PresetSettings {
            name: "night shift".to_string(),
            days: vec![1, 2, 3, 4, 5],
            start: "22:00".to_string(),
            end: "06:00".to_string(),
        });

        let catalog = config.preset_catalog().unwrap();
        assert_eq!(catalog.len(), 3);

        let patrol = catalog.get("weekend patrol").unwrap();
        assert!(patrol.window.days().contains(Weekday::Sunday));
        assert!(patrol.window.days().contains(Weekday::Saturday));

        let night = catalog.get("Night Shift").unwrap();
        assert_eq!(night.window.start().to_string(), "22:00");
    }
}
