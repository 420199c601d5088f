//! Bounding box abstraction over two opposite corners.

use crate::math::{MathError, Point, Real, Vector, VectorOps};
use crate::session::SessionError;
use na;
use num::Bounded;
use std::fmt;
use thiserror::Error;

/// One of the three world axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// The world X axis.
    X,
    /// The world Y axis.
    Y,
    /// The world Z axis.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Failures of bounding-box construction and transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundingBoxError {
    /// The two corners are not ordered min-before-max on some axis.
    #[error("invalid bounding box: min {min} exceeds max {max} on the {axis} axis")]
    InvalidBoundingBox {
        /// The first axis on which the ordering is violated.
        axis: Axis,
        /// The minimum-corner component on that axis.
        min: Real,
        /// The maximum-corner component on that axis.
        max: Real,
    },
    /// An empty collection of boxes cannot be combined.
    #[error("cannot combine an empty collection of bounding boxes")]
    EmptyInput,
    /// A degenerate box could not be transformed.
    #[error(transparent)]
    Math(#[from] MathError),
    /// The host session failed while its geometry was being measured.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// An axis-aligned bounding box whose height axis is always world Z.
///
/// The box is defined by its two opposite corners, `mins` and `maxs`, with
/// `mins.a <= maxs.a` on every axis `a`. Instances are immutable value
/// objects; every transform returns a new box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingBox {
    /// The corner with the smallest coordinates on each axis.
    pub mins: Point,
    /// The corner with the largest coordinates on each axis.
    pub maxs: Point,
}

impl BoundingBox {
    /// Creates a box from its minimum and maximum corners, validating the
    /// per-axis ordering.
    ///
    /// Corners that violate `mins.a <= maxs.a` on any axis fail with
    /// [`BoundingBoxError::InvalidBoundingBox`] naming the offending axis;
    /// they are never silently swapped.
    pub fn from_min_max(mins: Point, maxs: Point) -> Result<Self, BoundingBoxError> {
        for (axis, min, max) in [
            (Axis::X, mins.x, maxs.x),
            (Axis::Y, mins.y, maxs.y),
            (Axis::Z, mins.z, maxs.z),
        ] {
            if min > max {
                return Err(BoundingBoxError::InvalidBoundingBox { axis, min, max });
            }
        }
        Ok(BoundingBox { mins, maxs })
    }

    /// Creates the box spanned by two arbitrary opposite corners, taking the
    /// component-wise min/max of the pair.
    fn from_corners(a: Point, b: Point) -> Self {
        BoundingBox {
            mins: a.coords.inf(&b.coords).into(),
            maxs: a.coords.sup(&b.coords).into(),
        }
    }

    /// Combines a collection of boxes into their overall bounding box,
    /// taking per axis the min of all `mins` and the max of all `maxs`.
    ///
    /// Fails with [`BoundingBoxError::EmptyInput`] on an empty collection.
    pub fn find_min_max<I>(boxes: I) -> Result<Self, BoundingBoxError>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        let mut mins = Vector::repeat(Real::max_value());
        let mut maxs = Vector::repeat(-Real::max_value());
        let mut empty = true;

        for bb in boxes {
            empty = false;
            mins = mins.inf(&bb.mins.coords);
            maxs = maxs.sup(&bb.maxs.coords);
        }

        if empty {
            return Err(BoundingBoxError::EmptyInput);
        }

        Ok(BoundingBox {
            mins: mins.into(),
            maxs: maxs.into(),
        })
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Point {
        na::center(&self.mins, &self.maxs)
    }

    /// The box diagonal, from `mins` to `maxs`.
    #[inline]
    pub fn vector(&self) -> Vector {
        self.maxs - self.mins
    }

    /// The 3D length of the box diagonal.
    #[inline]
    pub fn magnitude(&self) -> Real {
        self.vector().norm()
    }

    /// The length of the box diagonal projected onto the XY plane.
    #[inline]
    pub fn width(&self) -> Real {
        self.vector().xy_norm()
    }

    /// The extent of this box along the world Z axis.
    #[inline]
    pub fn height(&self) -> Real {
        self.maxs.z - self.mins.z
    }

    /// The four corners of the vertical quadrilateral spanned by the box
    /// diagonal: `mins`, `mins` advanced by the XY part of the diagonal,
    /// `maxs`, and `maxs` retreated by the XY part of the diagonal.
    pub fn points(&self) -> [Point; 4] {
        let diagonal = self.vector();
        let xy = Vector::new(diagonal.x, diagonal.y, 0.0);
        [self.mins, self.mins + xy, self.maxs, self.maxs - xy]
    }

    /// Stretches this box symmetrically along its own diagonal direction,
    /// increasing the diagonal length by exactly `increment` (half beyond
    /// each end).
    ///
    /// Fails with [`MathError::DivisionByZero`] if the box is degenerate
    /// (zero-length diagonal), since no stretch direction exists.
    pub fn resized(&self, increment: Real) -> Result<Self, BoundingBoxError> {
        let half = self.vector().scaled_to(increment / 2.0)?;
        Ok(BoundingBox {
            mins: self.mins - half,
            maxs: self.maxs + half,
        })
    }

    /// Rotates this box about the world Z axis through its own center by
    /// `angle_deg` degrees.
    ///
    /// The rotated diagonal may invert the min/max ordering in X or Y, so
    /// the corners of the result are re-derived component-wise.
    pub fn rotated(&self, angle_deg: Real) -> Self {
        let center = self.center();
        let lo = center + (self.mins - center).rotated_z(angle_deg);
        let hi = center + (self.maxs - center).rotated_z(angle_deg);
        BoundingBox::from_corners(lo, hi)
    }

    /// Shifts both corners of this box by the same vector.
    #[inline]
    pub fn translated(&self, shift: Vector) -> Self {
        BoundingBox {
            mins: self.mins + shift,
            maxs: self.maxs + shift,
        }
    }
}
