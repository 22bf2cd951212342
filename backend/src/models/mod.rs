pub mod time;
pub mod weekday;
pub mod window;

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;

use serde::{Deserialize, Serialize};

pub use time::*;
pub use weekday::*;
pub use window::*;

/// Identifier of the camera a schedule belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraId(i64);

impl CameraId {
    pub fn new(value: i64) -> Self {
        CameraId(value)
    }
}

impl std::fmt::Display for CameraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
