//! Editing and evaluation services built on the schedule algorithms.
//!
//! - [`session`]: in-memory editing session with conflict-checked mutations
//! - [`presets`]: named window templates
//! - [`occupancy`]: reference evaluation of stored rows at an instant

pub mod occupancy;
pub mod presets;
pub mod session;

pub use occupancy::{is_active, is_active_at};
pub use presets::{builtin_presets, Preset, PresetCatalog};
pub use session::{
    ConflictPolicy, ConflictWarning, MutationOutcome, Session, WindowPatch, DEFAULT_DURATION_MINUTES,
};
