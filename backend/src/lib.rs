//! # Detection Schedule Engine
//!
//! Recurring weekly detection schedules for monitoring cameras.
//!
//! An operator edits a camera's schedule as a handful of windows, each a set
//! of weekdays sharing one start and one end time. Windows may run past
//! midnight (23:30 to 07:30), in which case they spill into the following
//! day, and Saturday spills into Sunday. The engine rejects or flags windows
//! that would overlap, and converts between the compact editing form and the
//! flat one-row-per-weekday form an external scheduler reads.
//!
//! ## Architecture
//!
//! - [`models`]: time of day, weekday sets, windows and storage rows
//! - [`algorithms`]: overlap detection and row grouping/expansion
//! - [`services`]: editing sessions, presets and occupancy evaluation
//! - [`db`]: storage trait, in-memory repository and session load/save
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: consolidated public surface and display DTOs
//! - [`error`]: engine error type
//!
//! ## Example
//!
//! ```
//! use detection_schedule::api::*;
//!
//! let catalog = PresetCatalog::builtin().unwrap();
//! let mut session = Session::new(CameraId::new(1));
//! let outcome = session.apply_preset(catalog.get("Night Shift").unwrap(), ConflictPolicy::Warn);
//! assert!(outcome.is_applied());
//!
//! let rows = session.commit().unwrap();
//! assert_eq!(rows.len(), 5);
//! assert!(is_active(&rows, Weekday::Saturday, TimeOfDay::parse_start("07:00").unwrap()));
//! ```

// RepositoryError carries a structured context
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
