//! Axis-aligned (in Z) bounding boxes and their host-geometry adapter.

pub use self::bounding_box::{Axis, BoundingBox, BoundingBoxError};
pub use self::bounding_box_handle::bounding_box_of;

mod bounding_box;
mod bounding_box_handle;
