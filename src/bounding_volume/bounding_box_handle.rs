//! Bounding boxes measured from host geometry handles.

use crate::bounding_volume::{BoundingBox, BoundingBoxError};
use crate::math::Point;
use crate::session::{Extents, Handle, ModelSession};

/// Computes the bounding box of a host handle.
///
/// Leaf geometry reports its six extents directly; listable handles are
/// combined by recursing over their children.
pub fn bounding_box_of<S>(session: &S, handle: Handle) -> Result<BoundingBox, BoundingBoxError>
where
    S: ModelSession + ?Sized,
{
    match session.extents(handle)? {
        Extents::Box([x_min, y_min, z_min, x_max, y_max, z_max]) => BoundingBox::from_min_max(
            Point::new(x_min, y_min, z_min),
            Point::new(x_max, y_max, z_max),
        ),
        Extents::Children(children) => BoundingBox::find_min_max(
            children
                .into_iter()
                .map(|child| bounding_box_of(session, child))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    }
}
