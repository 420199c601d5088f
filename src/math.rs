//! Aliases and extra operations for the mathematical types used throughout
//! this crate.

use na;
use thiserror::Error;

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The point type.
pub type Point = na::Point3<Real>;

/// The vector type.
pub type Vector = na::Vector3<Real>;

/// The tolerance below which a scalar quantity is treated as geometrically
/// degenerate.
pub const DEFAULT_EPSILON: Real = 1.0e-9;

/// Failures of the scalar-level vector algebra.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum MathError {
    /// A coordinate list did not have exactly three components.
    #[error("expected {expected} coordinate components, found {found}")]
    ShapeMismatch {
        /// The number of components required by the target type.
        expected: usize,
        /// The number of components actually supplied.
        found: usize,
    },
    /// A direction could not be derived from a zero-magnitude vector.
    #[error("cannot derive a direction from a zero-magnitude vector")]
    DivisionByZero,
}

/// Extra operations on [`Vector`] used by the partition engine.
pub trait VectorOps {
    /// Rotates this vector about the world Z axis by `angle_deg` degrees,
    /// counter-clockwise in the XY plane. The Z component is preserved, and
    /// so is the magnitude.
    fn rotated_z(&self, angle_deg: Real) -> Vector;

    /// Rescales this vector to the given length, preserving its direction.
    ///
    /// Fails with [`MathError::DivisionByZero`] if the vector has no
    /// direction to preserve.
    fn scaled_to(&self, length: Real) -> Result<Vector, MathError>;

    /// The length of this vector projected onto the XY plane.
    fn xy_norm(&self) -> Real;
}

impl VectorOps for Vector {
    #[inline]
    fn rotated_z(&self, angle_deg: Real) -> Vector {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Vector::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    fn scaled_to(&self, length: Real) -> Result<Vector, MathError> {
        let norm = self.norm();
        if norm < DEFAULT_EPSILON {
            return Err(MathError::DivisionByZero);
        }
        Ok(self * (length / norm))
    }

    #[inline]
    fn xy_norm(&self) -> Real {
        self.x.hypot(self.y)
    }
}

/// Builds a [`Point`] from a host coordinate list.
pub fn point_from_coords(coords: &[Real]) -> Result<Point, MathError> {
    match *coords {
        [x, y, z] => Ok(Point::new(x, y, z)),
        _ => Err(MathError::ShapeMismatch {
            expected: 3,
            found: coords.len(),
        }),
    }
}

/// Builds a [`Vector`] from a host coordinate list.
pub fn vector_from_coords(coords: &[Real]) -> Result<Vector, MathError> {
    point_from_coords(coords).map(|p| p.coords)
}
