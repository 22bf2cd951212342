//! Pure schedule algorithms: conflict detection and row grouping.

pub mod grouping;
pub mod overlap;

pub use grouping::{expand, group};
pub use overlap::{
    all_pairwise_conflicts, conflicting_indices, conflicts, find_overlap, windows_conflict,
    Overlap,
};
