use either::Either;

use super::mock::{Call, MockSession};
use geoform3d::math::{Point, Vector};
use geoform3d::partition::{skew_cut, skew_cut_arbitrary, CutterSpec, PartitionError};
use geoform3d::session::{Handle, HandleKind};

fn wide_cutter(mock: &MockSession) -> Handle {
    mock.seed_surface(Point::new(-100.0, 0.0, -100.0), Point::new(100.0, 0.0, 100.0))
}

fn transient_surfaces(mock: &MockSession) -> Vec<Handle> {
    mock.calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::SurfaceFromPoints { id, .. } => Some(Handle::new(id, HandleKind::Surface)),
            _ => None,
        })
        .collect()
}

#[test]
fn the_skew_angle_must_stay_below_a_half_turn() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    for angle in [180.0, -180.0, 270.0] {
        assert_eq!(
            skew_cut(&mock, &[volume], cutter, angle, Vector::new(1.0, 0.0, 0.0)),
            Err(PartitionError::SkewRange { angle_deg: angle })
        );
    }

    // Just under the limit is legal.
    let result = skew_cut(&mock, &[volume], cutter, 179.9, Vector::new(1.0, 0.0, 0.0));
    assert!(result.is_ok());
}

#[test]
fn each_pair_keeps_its_behind_fragment() {
    let mock = MockSession::new();
    let a = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let b = mock.seed_volume(Point::new(0.0, -5.0, 2.0), Point::new(1.0, 5.0, 3.0));
    let cutter = wide_cutter(&mock);
    let cutter_cog = mock.cog(cutter);

    let mark = mock.mark();
    let normal = Vector::new(1.0, 0.0, 0.0);
    let kept = match skew_cut(&mock, &[a, b], cutter, 0.0, normal).unwrap() {
        Either::Right(kept) => kept,
        Either::Left(_) => panic!("two pairs must keep two fragments"),
    };

    assert_eq!(kept.len(), 2);
    for &fragment in &kept {
        assert!(mock.is_alive(fragment));
        assert!(normal.dot(&(mock.cog(fragment) - cutter_cog)) < 0.0);
    }
    // The forward fragments were deleted from the model.
    assert_eq!(mock.alive_created_after(mark), kept);
    // An unskewed cut uses the cutter as-is.
    assert!(transient_surfaces(&mock).is_empty());
}

#[test]
fn a_lone_survivor_is_returned_directly() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    match skew_cut(&mock, &[volume], cutter, 0.0, Vector::new(1.0, 0.0, 0.0)).unwrap() {
        Either::Left(survivor) => assert!(mock.is_alive(survivor)),
        Either::Right(_) => panic!("a single pair must keep a single fragment"),
    }
}

#[test]
fn a_skewed_cut_rotates_a_transient_cutter() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    let result = skew_cut(&mock, &[volume], cutter, 45.0, Vector::new(1.0, 0.0, 0.0));
    assert!(result.is_ok());

    let transients = transient_surfaces(&mock);
    assert_eq!(transients.len(), 1);
    assert!(!mock.is_alive(transients[0]));
    assert!(mock.is_alive(cutter));
}

#[test]
fn an_odd_fragment_count_cannot_be_paired() {
    let mock = MockSession::new();
    mock.fragments_per_intersection.set(3);
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    assert_eq!(
        skew_cut(&mock, &[volume], cutter, 0.0, Vector::new(1.0, 0.0, 0.0)),
        Err(PartitionError::UnpairedCutResult { count: 3 })
    );
}

#[test]
fn a_fragment_on_the_cutter_plane_is_ambiguous() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);
    let cog = mock.cog(cutter);
    mock.script_fragment_cogs(&[cog, cog + Vector::new(1.0, 0.0, 0.0)]);

    assert_eq!(
        skew_cut(&mock, &[volume], cutter, 0.0, Vector::new(1.0, 0.0, 0.0)),
        Err(PartitionError::AmbiguousSide)
    );
}

#[test]
fn a_pair_entirely_on_one_side_is_ambiguous() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);
    let cog = mock.cog(cutter);
    mock.script_fragment_cogs(&[
        cog + Vector::new(-1.0, 0.0, 0.0),
        cog + Vector::new(-2.0, 0.0, 0.0),
    ]);

    assert_eq!(
        skew_cut(&mock, &[volume], cutter, 0.0, Vector::new(1.0, 0.0, 0.0)),
        Err(PartitionError::AmbiguousSide)
    );
}

#[test]
fn a_center_and_direction_cutter_spans_the_target() {
    let mock = MockSession::new();
    mock.default_cog_offset.set(Vector::new(0.0, 1.0, 0.0));
    let volume = mock.seed_volume(Point::origin(), Point::new(10.0, 10.0, 10.0));

    let mark = mock.mark();
    let spec = CutterSpec::CenterAndDirection {
        center: Point::new(5.0, 5.0, 5.0),
        direction: Vector::new(0.0, 1.0, 0.0),
    };
    let survivor = match skew_cut_arbitrary(&mock, &[volume], &spec, 0.0).unwrap() {
        Either::Left(survivor) => survivor,
        Either::Right(_) => panic!("a single pair must keep a single fragment"),
    };

    assert!(mock.is_alive(survivor));
    assert_eq!(survivor.kind, HandleKind::Volume);
    assert!(mock.cog(survivor).y < 5.0);

    // The generated cutter rectangle overshoots the target on every side it
    // spans, and it is deleted before returning.
    let transients = transient_surfaces(&mock);
    assert_eq!(transients.len(), 1);
    assert!(!mock.is_alive(transients[0]));
    let points = mock
        .calls()
        .into_iter()
        .find_map(|call| match call {
            Call::SurfaceFromPoints { points, .. } => Some(points),
            _ => None,
        })
        .unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().any(|p| p.z < 0.0));
    assert!(points.iter().any(|p| p.z > 10.0));
    assert!(points.iter().any(|p| p.x < 0.0));
    assert!(points.iter().any(|p| p.x > 10.0));

    // Exactly the survivor remains from the whole operation.
    assert_eq!(mock.alive_created_after(mark), vec![survivor]);
}

#[test]
fn a_segment_cutter_derives_its_plane_from_the_segment() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(-5.0, -5.0, -5.0), Point::new(5.0, 5.0, 5.0));

    let spec = CutterSpec::Segment {
        start: Point::new(0.0, -10.0, 0.0),
        end: Point::new(0.0, 10.0, 0.0),
    };
    let survivor = match skew_cut_arbitrary(&mock, &[volume], &spec, 0.0).unwrap() {
        Either::Left(survivor) => survivor,
        Either::Right(_) => panic!("a single pair must keep a single fragment"),
    };

    // The plane normal is the segment direction turned +90 degrees in XY,
    // so it points along -X and the +X fragment is the one kept.
    assert!(mock.is_alive(survivor));
    assert!(mock.cog(survivor).x > 0.0);
}

#[test]
fn arbitrary_cuts_respect_the_skew_range() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let spec = CutterSpec::CenterAndDirection {
        center: Point::origin(),
        direction: Vector::new(0.0, 1.0, 0.0),
    };

    assert_eq!(
        skew_cut_arbitrary(&mock, &[volume], &spec, -180.0),
        Err(PartitionError::SkewRange { angle_deg: -180.0 })
    );
}
