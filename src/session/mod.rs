//! The capability boundary to the host modeling application.
//!
//! The host exposes opaque object handles and a small set of primitives:
//! create, group, extrude, intersect, combine, merge-test, delete and
//! extent queries. Every core operation receives an explicit session
//! implementing [`ModelSession`]; there is no process-wide host state,
//! so test doubles slot in without any patching.

use crate::math::{Point, Real, Vector};
use crate::shape::Segment;
use thiserror::Error;

/// The id of an object held by the host model.
pub type HandleId = u64;

/// What kind of host object a handle refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A parametric curve in a work plane.
    Polycurve,
    /// A surface.
    Surface,
    /// A solid volume.
    Volume,
    /// A grouping of other handles.
    Group,
    /// A soil/material entity emitted as a byproduct of volume creation.
    Soil,
    /// Anything else the host may hand out.
    Other,
}

/// An opaque reference to an object held by the host model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    /// The host-side object id.
    pub id: HandleId,
    /// The kind of object the id refers to.
    pub kind: HandleKind,
}

impl Handle {
    /// Creates a handle from its host id and kind.
    #[inline]
    pub fn new(id: HandleId, kind: HandleKind) -> Self {
        Handle { id, kind }
    }

    /// Whether this handle refers to a surface.
    #[inline]
    pub fn is_surface(&self) -> bool {
        self.kind == HandleKind::Surface
    }

    /// Whether this handle refers to geometry rather than a non-geometric
    /// byproduct such as a soil or material entity.
    #[inline]
    pub fn is_geometric(&self) -> bool {
        matches!(
            self.kind,
            HandleKind::Polycurve | HandleKind::Surface | HandleKind::Volume
        )
    }
}

/// The axis-aligned extents of a host object.
#[derive(Debug, Clone, PartialEq)]
pub enum Extents {
    /// Leaf geometry: `[x_min, y_min, z_min, x_max, y_max, z_max]`.
    Box([Real; 6]),
    /// A listable object; its extents are those of its children.
    Children(Vec<Handle>),
}

/// The outcome of asking the host to merge equivalent geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The host found equivalent geometry and merged it.
    Merged,
    /// No equivalent geometry was found.
    NotMerged,
}

/// A failure reported by the host session.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("host call `{call}` failed: {message}")]
pub struct SessionError {
    /// The host primitive that failed.
    pub call: &'static str,
    /// The host-reported failure message.
    pub message: String,
}

impl SessionError {
    /// Creates an error for the named host primitive.
    pub fn new(call: &'static str, message: impl Into<String>) -> Self {
        SessionError {
            call,
            message: message.into(),
        }
    }
}

/// The narrow capability interface to one exclusive host model session.
///
/// All calls are synchronous and blocking; the host protocol is
/// single-session, so no locking is involved. Implementations report
/// failures through [`SessionError`] and never panic.
pub trait ModelSession {
    /// Creates a polycurve in the work plane spanned by `axis1` and `axis2`
    /// at `origin`, with the two in-plane offsets applied.
    fn polycurve(
        &self,
        origin: Point,
        axis1: Vector,
        axis2: Vector,
        offset1: Real,
        offset2: Real,
    ) -> Result<Handle, SessionError>;

    /// Appends a parametric segment to a polycurve.
    fn add_curve_segment(&self, curve: Handle, segment: &Segment) -> Result<(), SessionError>;

    /// Extends a polycurve to its symmetry axis.
    fn extend_to_symmetry_axis(&self, curve: Handle) -> Result<(), SessionError>;

    /// Closes a polycurve symmetrically.
    fn symmetric_close(&self, curve: Handle) -> Result<(), SessionError>;

    /// Creates a planar surface through the given corner points.
    fn surface_from_points(&self, points: &[Point]) -> Result<Handle, SessionError>;

    /// Creates the surface bounded by an existing closed curve.
    fn surface_from_curve(&self, curve: Handle) -> Result<Handle, SessionError>;

    /// Groups a collection of handles into one listable handle.
    fn group(&self, handles: &[Handle]) -> Result<Handle, SessionError>;

    /// Extrudes the given objects by a displacement, returning every handle
    /// the host emits, non-geometric byproducts included; callers are
    /// expected to filter.
    fn extrude(&self, objects: &[Handle], displacement: Vector) -> Result<Vec<Handle>, SessionError>;

    /// Intersects `target` against `tool`, returning the fragment handles.
    fn intersect(&self, target: Handle, tool: Handle) -> Result<Vec<Handle>, SessionError>;

    /// Combines several handles into a single object.
    fn combine(&self, parts: &[Handle]) -> Result<Handle, SessionError>;

    /// Asks the host whether `target` duplicates geometry of `tool`,
    /// merging the two if so.
    fn merge_equivalents(&self, target: Handle, tool: Handle)
        -> Result<MergeOutcome, SessionError>;

    /// Deletes an object from the host model.
    fn delete(&self, handle: Handle) -> Result<(), SessionError>;

    /// Reads the axis-aligned extents of an object.
    fn extents(&self, handle: Handle) -> Result<Extents, SessionError>;

    /// The host-computed centroid of an object. Used as a classification
    /// reference point only, not for mass properties.
    fn center_of_gravity(&self, handle: Handle) -> Result<Point, SessionError>;
}

/// Host primitives for staged-construction phases, kept separate from
/// [`ModelSession`] so the geometric boundary stays minimal.
pub trait StageSession {
    /// The host's initial phase.
    fn initial_phase(&self) -> Result<Handle, SessionError>;

    /// Creates a phase following `parent`.
    fn phase_after(&self, parent: Handle) -> Result<Handle, SessionError>;
}
