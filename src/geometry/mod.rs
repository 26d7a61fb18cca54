pub mod contains;
pub mod distance;
pub mod rings;
pub mod visibility;

pub use contains::{contains, ring_contains};
pub use distance::{distance_to_segment_m, haversine_m, min_distance_to_boundary};
pub use rings::assemble_rings;
pub use visibility::{DEFAULT_GRID_STEPS, visible_area_ratio};
