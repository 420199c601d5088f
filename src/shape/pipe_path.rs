//! Pipe runs extruded along a polyline with mitered bends.

use crate::math::{MathError, Point, Real, Vector, VectorOps};
use crate::partition::{extrude, skew_cut_arbitrary, CutterSpec, PartitionError};
use crate::session::{Handle, ModelSession, SessionError};
use crate::shape::{add_pipe_structure, PipeStructure, ShapeError, ShapeInfo};
use thiserror::Error;

/// Failures while laying out or realizing a pipe path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipePathError {
    /// A pipe path needs at least one segment length.
    #[error("a pipe path requires at least one segment length")]
    Empty,
    /// Consecutive segments are joined by exactly one bend angle each.
    #[error("a pipe path with {segments} segments needs one bend angle per joint, got {angles}")]
    MismatchedBends {
        /// The number of segment lengths supplied.
        segments: usize,
        /// The number of bend angles supplied.
        angles: usize,
    },
    /// A degenerate direction vector.
    #[error(transparent)]
    Math(#[from] MathError),
    /// A failure of the shape composer.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// A failure of the partition engine.
    #[error(transparent)]
    Partition(#[from] PartitionError),
    /// A failure reported by the host session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A pipe cross-section extruded along straight segments joined by signed
/// horizontal bend angles.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePath {
    shape: ShapeInfo,
    segment_lengths: Vec<Real>,
    angles_deg: Vec<Real>,
}

/// The host geometry created by [`PipePath::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipeRun {
    /// The cross-section structures composed per segment.
    pub sections: Vec<PipeStructure>,
    /// The cross-section surfaces spanned inside each section curve.
    pub cross_sections: Vec<Handle>,
    /// The extruded (and mitered) solids, in segment order.
    pub solids: Vec<Handle>,
}

impl PipeRun {
    /// Groups and deletes everything this run created in the host model.
    pub fn tear_down<S>(self, session: &S) -> Result<(), SessionError>
    where
        S: ModelSession + ?Sized,
    {
        let mut handles = Vec::new();
        for section in &self.sections {
            handles.extend(section.members());
        }
        handles.extend(self.cross_sections.iter().copied());
        handles.extend(self.solids.iter().copied());

        let group = session.group(&handles)?;
        session.delete(group)
    }
}

impl PipePath {
    /// Creates a path from segment lengths and the bend angles joining
    /// them. There must be exactly one angle between each pair of
    /// consecutive segments.
    pub fn new(
        shape: ShapeInfo,
        segment_lengths: Vec<Real>,
        angles_deg: Vec<Real>,
    ) -> Result<Self, PipePathError> {
        if segment_lengths.is_empty() {
            return Err(PipePathError::Empty);
        }
        if angles_deg.len() != segment_lengths.len() - 1 {
            return Err(PipePathError::MismatchedBends {
                segments: segment_lengths.len(),
                angles: angles_deg.len(),
            });
        }
        Ok(PipePath {
            shape,
            segment_lengths,
            angles_deg,
        })
    }

    /// The cross-section description this path extrudes.
    pub fn shape(&self) -> &ShapeInfo {
        &self.shape
    }

    /// The running direction of each segment, starting from
    /// `start_direction` and turning by each bend angle in sequence.
    pub fn directions(&self, start_direction: Vector) -> Vec<Vector> {
        let mut directions = Vec::with_capacity(self.segment_lengths.len());
        let mut current = start_direction;
        directions.push(current);
        for &angle in &self.angles_deg {
            current = current.rotated_z(angle);
            directions.push(current);
        }
        directions
    }

    /// The polyline the pipe axis follows, from the start point through
    /// every bend to the far end.
    pub fn extrusion_points(
        &self,
        start: Point,
        start_direction: Vector,
    ) -> Result<Vec<Point>, PipePathError> {
        let directions = self.directions(start_direction);
        let mut points = Vec::with_capacity(self.segment_lengths.len() + 1);
        let mut current = start;
        points.push(current);
        for (direction, &length) in directions.iter().zip(&self.segment_lengths) {
            current += direction.scaled_to(length)?;
            points.push(current);
        }
        Ok(points)
    }

    /// The interior bend points of the path.
    pub fn rotation_points(
        &self,
        start: Point,
        start_direction: Vector,
    ) -> Result<Vec<Point>, PipePathError> {
        let points = self.extrusion_points(start, start_direction)?;
        Ok(points[1..points.len() - 1].to_vec())
    }

    /// Realizes the path in the host model.
    ///
    /// Each segment composes a cross-section at its start point (section
    /// plane normal to the running direction) and extrudes it along the
    /// segment. At every interior bend the two adjoining segments' solids
    /// are skew-cut with a half-angle cutter through the bend point, so the
    /// elbow geometry is mitered and the overrunning pieces are discarded.
    pub fn run<S>(
        &self,
        session: &S,
        start: Point,
        start_direction: Vector,
    ) -> Result<PipeRun, PipePathError>
    where
        S: ModelSession + ?Sized,
    {
        let directions = self.directions(start_direction);
        let points = self.extrusion_points(start, start_direction)?;

        let mut sections = Vec::with_capacity(self.segment_lengths.len());
        let mut cross_sections = Vec::with_capacity(self.segment_lengths.len());
        let mut segment_solids: Vec<Vec<Handle>> = Vec::with_capacity(self.segment_lengths.len());

        for (i, &length) in self.segment_lengths.iter().enumerate() {
            let direction = directions[i];
            let axis1 = direction.rotated_z(-90.0).scaled_to(1.0)?;
            let section =
                add_pipe_structure(session, points[i], (axis1, Vector::z()), &self.shape, None)?;
            let cross_section = session.surface_from_curve(section.pipe)?;

            let mut members = vec![section.pipe, cross_section];
            members.extend(section.members().into_iter().skip(1));
            let solids = extrude(session, &members, Some(length), Some(direction))?;

            sections.push(section);
            cross_sections.push(cross_section);
            segment_solids.push(solids);
        }

        for (k, &bend) in self.angles_deg.iter().enumerate() {
            let mut elbow = segment_solids[k].clone();
            elbow.extend(segment_solids[k + 1].iter().copied());

            let cutter = CutterSpec::CenterAndDirection {
                center: points[k + 1],
                direction: directions[k],
            };
            let survivors = skew_cut_arbitrary(session, &elbow, &cutter, bend / 2.0)?
                .either(|lone| vec![lone], |many| many);

            segment_solids[k].clear();
            segment_solids[k + 1] = survivors;
        }

        Ok(PipeRun {
            sections,
            cross_sections,
            solids: segment_solids.into_iter().flatten().collect(),
        })
    }
}
