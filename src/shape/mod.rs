//! The pipe/footing shape composer.
//!
//! A pipe cross-section is described as a list of parametric segments
//! (arcs, lines and symmetry operations) walked in order onto a host
//! polycurve. The composer can additionally attach footing blocks and a
//! select-backfill box, producing a [`PipeStructure`] that the partition
//! engine consumes as the geometry to cut.

pub use self::pipe_path::{PipePath, PipePathError, PipeRun};

mod pipe_path;

use crate::bounding_volume::{bounding_box_of, BoundingBoxError};
use crate::math::{Point, Real, Vector};
use crate::session::{Handle, ModelSession, SessionError};
use thiserror::Error;

/// One parametric segment of a pipe cross-section.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A circular arc.
    Arc {
        /// Start angle relative to the curve's running direction, in
        /// degrees. `None` continues tangentially from the previous
        /// segment.
        relative_start_angle1: Option<Real>,
        /// The arc radius.
        radius: Real,
        /// The swept angle, in degrees.
        central_angle: Real,
    },
    /// A straight segment.
    Line {
        /// The segment length.
        length: Real,
    },
    /// Extends the curve to its symmetry axis.
    SymmetricExtend,
    /// Closes the curve symmetrically.
    SymmetricClose,
}

/// Dimensions of the two footing blocks flanking an arch cross-section.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FootingInfo {
    /// The arch span.
    pub span: Real,
    /// The arch rise above the invert.
    pub rise: Real,
    /// The footing width.
    pub width: Real,
    /// The footing depth below the invert elevation.
    pub height: Real,
    /// The horizontal distance from the springline to the footing's outer
    /// edge.
    pub outside: Real,
    /// The footing key height above the invert elevation.
    pub key: Real,
}

/// A parametric pipe cross-section description.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeInfo {
    /// The segments to walk, in order.
    pub segments: Vec<Segment>,
    /// Offset of the curve along the first work-plane axis.
    pub offset1: Option<Real>,
    /// Offset of the curve along the second work-plane axis.
    pub offset2: Option<Real>,
    /// Footing blocks to attach, if any.
    pub footing: Option<FootingInfo>,
}

/// The host handles composing one pipe cross-section.
///
/// This is a grouping record, not a geometric entity; ownership of the
/// contained handles passes to whoever groups and deletes them during
/// teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeStructure {
    /// The pipe cross-section curve.
    pub pipe: Handle,
    /// The first footing block cross-section.
    pub footing1: Option<Handle>,
    /// The second footing block cross-section.
    pub footing2: Option<Handle>,
    /// The select-backfill zone boundary.
    pub select_backfill: Option<Handle>,
}

impl PipeStructure {
    /// All handles of this structure, pipe first.
    pub fn members(&self) -> Vec<Handle> {
        [
            Some(self.pipe),
            self.footing1,
            self.footing2,
            self.select_backfill,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Failures of the shape composer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A pipe shape needs at least one segment to walk.
    #[error("a pipe shape requires at least one segment")]
    EmptySegments,
    /// A failure reported by the host session.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// A failure while measuring the composed geometry.
    #[error(transparent)]
    BoundingBox(#[from] BoundingBoxError),
}

/// Walks a segment list onto a new host polycurve.
///
/// The curve is created in the work plane spanned by `axes` at `origin`,
/// shifted by the shape's offsets, and each segment is appended in order.
pub fn add_pipe<S>(
    session: &S,
    origin: Point,
    axes: (Vector, Vector),
    shape: &ShapeInfo,
) -> Result<Handle, ShapeError>
where
    S: ModelSession + ?Sized,
{
    if shape.segments.is_empty() {
        return Err(ShapeError::EmptySegments);
    }

    let curve = session.polycurve(
        origin,
        axes.0,
        axes.1,
        shape.offset1.unwrap_or(0.0),
        shape.offset2.unwrap_or(0.0),
    )?;

    for segment in &shape.segments {
        match segment {
            Segment::SymmetricExtend => session.extend_to_symmetry_axis(curve)?,
            Segment::SymmetricClose => session.symmetric_close(curve)?,
            parametric => session.add_curve_segment(curve, parametric)?,
        }
    }

    Ok(curve)
}

/// Composes a pipe cross-section together with its optional footings and
/// select-backfill zone.
///
/// Footings are rectangles in the pipe's own section plane, mirrored about
/// the shape origin. Their vertical reference is the invert elevation,
/// the origin shifted by the shape's second offset, from which each
/// footing extends `height` down and `key` up. The select-backfill
/// boundary, requested through `backfill_margin`, is the pipe's bounding
/// box stretched by the margin and realized as a host surface.
pub fn add_pipe_structure<S>(
    session: &S,
    origin: Point,
    axes: (Vector, Vector),
    shape: &ShapeInfo,
    backfill_margin: Option<Real>,
) -> Result<PipeStructure, ShapeError>
where
    S: ModelSession + ?Sized,
{
    let pipe = add_pipe(session, origin, axes, shape)?;

    let (footing1, footing2) = match shape.footing {
        Some(footing) => {
            let invert = origin + axes.1 * shape.offset2.unwrap_or(0.0);
            let section1 = footing_section(invert, axes, &footing, 1.0);
            let section2 = footing_section(invert, axes, &footing, -1.0);
            (
                Some(session.surface_from_points(&section1)?),
                Some(session.surface_from_points(&section2)?),
            )
        }
        None => (None, None),
    };

    let select_backfill = match backfill_margin {
        Some(margin) => {
            let zone = bounding_box_of(session, pipe)?.resized(margin)?;
            Some(session.surface_from_points(&zone.points())?)
        }
        None => None,
    };

    Ok(PipeStructure {
        pipe,
        footing1,
        footing2,
        select_backfill,
    })
}

/// The corner points of one footing rectangle in the section plane.
/// `side` is `1.0` for the footing on the positive `axis1` side and `-1.0`
/// for its mirror image.
fn footing_section(
    invert: Point,
    axes: (Vector, Vector),
    footing: &FootingInfo,
    side: Real,
) -> [Point; 4] {
    let outer = side * (footing.span / 2.0 + footing.outside);
    let inner = side * (footing.span / 2.0 + footing.outside - footing.width);
    let (axis1, axis2) = axes;

    [
        invert + axis1 * inner - axis2 * footing.height,
        invert + axis1 * outer - axis2 * footing.height,
        invert + axis1 * outer + axis2 * footing.key,
        invert + axis1 * inner + axis2 * footing.key,
    ]
}
