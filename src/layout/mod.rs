pub mod geometry;
pub mod slice;

pub use geometry::{Point, Rect};
pub use slice::{compute_layout, partition, Orientation, MAX_EXTENT};
