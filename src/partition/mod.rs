//! The partition engine: extruding solids and slicing them with cutter
//! surfaces.
//!
//! Cutting is built on the host's intersection primitive, which has no
//! native boolean-partition support: intersecting a solid against a planar
//! cutter can emit pieces of the *cutter* alongside the pieces of the
//! target. The engine re-intersects and merge-tests every surface fragment
//! to tell genuine cut output from such remnants, and guarantees that every
//! temporary handle it creates is released on all exit paths.

use crate::bounding_volume::{bounding_box_of, BoundingBox, BoundingBoxError};
use crate::math::{MathError, Point, Real, Vector, VectorOps, DEFAULT_EPSILON};
use crate::session::{Handle, HandleKind, MergeOutcome, ModelSession, SessionError};
use either::Either;
use na;
use smallvec::SmallVec;
use thiserror::Error;

/// Failures of the partition engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// An extrusion was requested without a direction vector.
    #[error("an extrusion requires a direction vector")]
    MissingDirection,
    /// The cutter handle does not refer to a surface.
    #[error("the cutter must be a surface, not a {kind:?}")]
    InvalidCutter {
        /// The kind of the rejected cutter handle.
        kind: HandleKind,
    },
    /// The skew angle is outside the open interval (-180, 180) degrees.
    #[error("the skew angle must satisfy |angle| < 180 degrees, got {angle_deg}")]
    SkewRange {
        /// The rejected angle, in degrees.
        angle_deg: Real,
    },
    /// Cutting produced an odd number of fragments, which cannot be paired.
    #[error("cutting produced {count} fragments; an even number is required for pairing")]
    UnpairedCutResult {
        /// The number of fragments produced.
        count: usize,
    },
    /// A fragment could not be classified as lying on one side of the
    /// cutter, or a pair did not split into one kept and one discarded
    /// piece.
    #[error("cannot decide which side of the cutter a fragment lies on")]
    AmbiguousSide,
    /// A vector-algebra failure, typically a degenerate direction.
    #[error(transparent)]
    Math(#[from] MathError),
    /// A bounding-box failure while measuring the geometry to cut.
    #[error(transparent)]
    BoundingBox(#[from] BoundingBoxError),
    /// A failure reported by the host session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// How the cutter of [`skew_cut_arbitrary`] is described.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CutterSpec {
    /// A 2D line segment lying in the cutter plane; the plane is vertical
    /// and its normal is the segment direction rotated +90 degrees in XY.
    Segment {
        /// One end of the segment.
        start: Point,
        /// The other end of the segment.
        end: Point,
    },
    /// A point on the cutter plane plus the plane's XY normal direction.
    CenterAndDirection {
        /// A point the cutter plane passes through.
        center: Point,
        /// The plane normal, taken in the XY plane.
        direction: Vector,
    },
}

/// Tracks temporary host objects created during a partition call and
/// deletes them when dropped, so cleanup happens on every exit path.
struct Scratch<'a, S: ModelSession + ?Sized> {
    session: &'a S,
    pending: SmallVec<[Handle; 8]>,
}

impl<'a, S: ModelSession + ?Sized> Scratch<'a, S> {
    fn new(session: &'a S) -> Self {
        Scratch {
            session,
            pending: SmallVec::new(),
        }
    }

    /// Registers a temporary and hands it back for further use.
    fn adopt(&mut self, handle: Handle) -> Handle {
        self.pending.push(handle);
        handle
    }

    /// Registers a handle for deletion without further use.
    fn discard(&mut self, handle: Handle) {
        self.pending.push(handle);
    }
}

impl<S: ModelSession + ?Sized> Drop for Scratch<'_, S> {
    fn drop(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(err) = self.session.delete(handle) {
                log::warn!("leaking temporary host object {}: {err}", handle.id);
            }
        }
    }
}

/// Extrudes the given objects along a direction.
///
/// The direction vector is mandatory; deriving one from the input geometry
/// is deliberately unsupported and fails with
/// [`PartitionError::MissingDirection`]. When `length` is omitted the
/// vector's own magnitude is the extrusion length; otherwise the vector is
/// rescaled to `length`. The host's non-geometric byproducts (soil entities
/// created alongside extruded volumes) are filtered out of the result.
pub fn extrude<S>(
    session: &S,
    objects: &[Handle],
    length: Option<Real>,
    direction: Option<Vector>,
) -> Result<Vec<Handle>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    let direction = direction.ok_or(PartitionError::MissingDirection)?;
    let displacement = match length {
        None => direction,
        Some(length) => direction.scaled_to(length)?,
    };

    let produced = session.extrude(objects, displacement)?;
    Ok(produced.into_iter().filter(Handle::is_geometric).collect())
}

/// Partitions `to_cut` with a surface cutter, returning the disjoint pieces
/// of the input and discarding any pieces of the cutter itself.
///
/// Each member of `to_cut` is intersected individually against the cutter,
/// so overlapping members each contribute their own fragments. Fails with
/// [`PartitionError::InvalidCutter`] unless `cutter` is a surface handle.
pub fn cut<S>(
    session: &S,
    to_cut: &[Handle],
    cutter: Handle,
) -> Result<Vec<Handle>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    if !cutter.is_surface() {
        return Err(PartitionError::InvalidCutter { kind: cutter.kind });
    }

    let mut scratch = Scratch::new(session);
    cut_fragments(session, &mut scratch, to_cut, cutter)
}

/// Cuts `to_cut` with `cutter` rotated by `skew_deg` about its own center,
/// then keeps only the pieces behind the skewed reference normal.
///
/// The classification normal is `xy_direction` rotated by `skew_deg` about
/// Z. Cutting must yield an even number of fragments, paired in cut order;
/// in each pair the fragment whose centroid lies behind the normal
/// (negative dot product from the cutter's centroid) is kept and the other
/// is deleted from the host model. Returns the lone survivor directly when
/// exactly one fragment remains.
pub fn skew_cut<S>(
    session: &S,
    to_cut: &[Handle],
    cutter: Handle,
    skew_deg: Real,
    xy_direction: Vector,
) -> Result<Either<Handle, Vec<Handle>>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    check_skew_range(skew_deg)?;
    if !cutter.is_surface() {
        return Err(PartitionError::InvalidCutter { kind: cutter.kind });
    }

    let mut scratch = Scratch::new(session);

    let active_cutter = if skew_deg == 0.0 {
        cutter
    } else {
        let skewed = bounding_box_of(session, cutter)?.rotated(skew_deg);
        scratch.adopt(session.surface_from_points(&skewed.points())?)
    };

    let cutter_cog = session.center_of_gravity(active_cutter)?;
    let normal = xy_direction.rotated_z(skew_deg);

    let fragments = cut_fragments(session, &mut scratch, to_cut, active_cutter)?;
    let kept = classify_pairs(session, fragments, cutter_cog, normal)?;

    Ok(if kept.len() == 1 {
        Either::Left(kept[0])
    } else {
        Either::Right(kept)
    })
}

/// Cuts `to_cut` with a cutter built from a [`CutterSpec`], skewed by
/// `skew_deg`.
///
/// A vertical cutter rectangle is sized from the combined bounding box of
/// the targets (its half-extent is the box diagonal length, so it spans
/// the targets at any skew angle) and survivors are classified as in
/// [`skew_cut`]. The rectangle is transient and is deleted before
/// returning.
pub fn skew_cut_arbitrary<S>(
    session: &S,
    to_cut: &[Handle],
    cutter: &CutterSpec,
    skew_deg: Real,
) -> Result<Either<Handle, Vec<Handle>>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    check_skew_range(skew_deg)?;

    let (center, direction) = match *cutter {
        CutterSpec::CenterAndDirection { center, direction } => {
            (center, Vector::new(direction.x, direction.y, 0.0))
        }
        CutterSpec::Segment { start, end } => {
            let axis = end - start;
            (
                na::center(&start, &end),
                Vector::new(axis.x, axis.y, 0.0).rotated_z(90.0),
            )
        }
    };
    let normal = direction.rotated_z(skew_deg);

    let bounds = BoundingBox::find_min_max(
        to_cut
            .iter()
            .map(|&handle| bounding_box_of(session, handle))
            .collect::<Result<Vec<_>, _>>()?,
    )?;
    let half_span = bounds.magnitude();
    let in_plane = normal.rotated_z(90.0).scaled_to(half_span)?;
    let vertical = Vector::new(0.0, 0.0, half_span);
    let center = Point::new(center.x, center.y, bounds.center().z);
    let corners = [
        center - in_plane - vertical,
        center + in_plane - vertical,
        center + in_plane + vertical,
        center - in_plane + vertical,
    ];

    let mut scratch = Scratch::new(session);
    let cutter_handle = scratch.adopt(session.surface_from_points(&corners)?);
    let cutter_cog = session.center_of_gravity(cutter_handle)?;

    let fragments = cut_fragments(session, &mut scratch, to_cut, cutter_handle)?;
    let kept = classify_pairs(session, fragments, cutter_cog, normal)?;

    Ok(if kept.len() == 1 {
        Either::Left(kept[0])
    } else {
        Either::Right(kept)
    })
}

fn check_skew_range(skew_deg: Real) -> Result<(), PartitionError> {
    if skew_deg.abs() >= 180.0 {
        return Err(PartitionError::SkewRange {
            angle_deg: skew_deg,
        });
    }
    Ok(())
}

/// Intersects every member of `to_cut` individually against `cutter` and
/// returns the fragments that belong to the targets, discarding cutter
/// remnants and non-geometric residue.
fn cut_fragments<S>(
    session: &S,
    scratch: &mut Scratch<'_, S>,
    to_cut: &[Handle],
    cutter: Handle,
) -> Result<Vec<Handle>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    // One intersection per member: a single bulk intersection would let
    // overlapping members merge and cross-contaminate their fragments.
    let mut fragments: SmallVec<[Handle; 8]> = SmallVec::new();
    for &member in to_cut {
        for piece in session.intersect(member, cutter)? {
            if piece.is_geometric() {
                fragments.push(piece);
            } else {
                scratch.discard(piece);
            }
        }
    }

    let mut kept = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        if is_genuine_fragment(session, scratch, fragment, cutter)? {
            kept.push(fragment);
        } else {
            scratch.discard(fragment);
        }
    }
    Ok(kept)
}

/// Decides whether a fragment is genuine cut output or a remnant of the
/// cutter produced as an intersection byproduct.
fn is_genuine_fragment<S>(
    session: &S,
    scratch: &mut Scratch<'_, S>,
    fragment: Handle,
    cutter: Handle,
) -> Result<bool, PartitionError>
where
    S: ModelSession + ?Sized,
{
    // Only a surface can duplicate a surface cutter.
    if !fragment.is_surface() {
        return Ok(true);
    }

    let pieces = session.intersect(fragment, cutter)?;
    for &piece in &pieces {
        scratch.discard(piece);
    }

    match pieces.len() {
        // Geometrically identical to the cutter: the re-intersection could
        // not split it.
        0 | 1 => {
            if pieces.is_empty() {
                log::debug!(
                    "re-intersecting fragment {} produced no pieces; dropping it",
                    fragment.id
                );
            }
            Ok(false)
        }
        // The fragment splits against the cutter, so it may be genuine.
        // Recombine the pieces and let the host look for geometry
        // equivalent to the cutter: finding any means the fragment merely
        // duplicated part of the cutter.
        _ => {
            let recombined = scratch.adopt(session.combine(&pieces)?);
            match session.merge_equivalents(recombined, cutter)? {
                MergeOutcome::Merged => Ok(false),
                MergeOutcome::NotMerged => Ok(true),
            }
        }
    }
}

/// Pairs fragments in cut order and keeps the member of each pair lying
/// behind `normal`, deleting the forward member from the host model.
fn classify_pairs<S>(
    session: &S,
    fragments: Vec<Handle>,
    cutter_cog: Point,
    normal: Vector,
) -> Result<Vec<Handle>, PartitionError>
where
    S: ModelSession + ?Sized,
{
    if fragments.len() % 2 != 0 {
        return Err(PartitionError::UnpairedCutResult {
            count: fragments.len(),
        });
    }

    let mut kept = Vec::with_capacity(fragments.len() / 2);
    for pair in fragments.chunks_exact(2) {
        let mut behind = None;
        let mut forward = None;
        for &fragment in pair {
            let side = normal.dot(&(session.center_of_gravity(fragment)? - cutter_cog));
            if side.abs() <= DEFAULT_EPSILON {
                return Err(PartitionError::AmbiguousSide);
            }
            let slot = if side < 0.0 { &mut behind } else { &mut forward };
            if slot.replace(fragment).is_some() {
                return Err(PartitionError::AmbiguousSide);
            }
        }
        match (behind, forward) {
            (Some(keep), Some(discard)) => {
                session.delete(discard)?;
                kept.push(keep);
            }
            _ => return Err(PartitionError::AmbiguousSide),
        }
    }
    Ok(kept)
}
