use super::mock::{Call, MockSession};
use geoform3d::math::Point;
use geoform3d::partition::{cut, PartitionError};
use geoform3d::session::{HandleKind, MergeOutcome};

fn wide_cutter(mock: &MockSession) -> geoform3d::session::Handle {
    mock.seed_surface(Point::new(-100.0, 0.0, -100.0), Point::new(100.0, 0.0, 100.0))
}

#[test]
fn the_cutter_must_be_a_surface() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let bad_cutter = mock.seed_volume(Point::origin(), Point::new(2.0, 2.0, 2.0));

    assert_eq!(
        cut(&mock, &[volume], bad_cutter),
        Err(PartitionError::InvalidCutter {
            kind: HandleKind::Volume
        })
    );
}

#[test]
fn members_are_cut_one_at_a_time() {
    let mock = MockSession::new();
    let a = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let b = mock.seed_volume(Point::new(0.0, -5.0, 2.0), Point::new(1.0, 5.0, 3.0));
    let cutter = wide_cutter(&mock);

    let kept = cut(&mock, &[a, b], cutter).unwrap();

    assert_eq!(kept.len(), 4);
    assert!(kept.iter().all(|h| h.kind == HandleKind::Volume));
    assert!(kept.iter().all(|&h| mock.is_alive(h)));

    let intersections: Vec<(u64, u64)> = mock
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Intersect { target, tool } => Some((target, tool)),
            _ => None,
        })
        .collect();
    assert_eq!(intersections, vec![(a.id, cutter.id), (b.id, cutter.id)]);
}

#[test]
fn cutter_remnants_are_detected_and_discarded() {
    let mock = MockSession::new();
    mock.emit_cutter_remnant.set(true);
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    let mark = mock.mark();
    let kept = cut(&mock, &[volume], cutter).unwrap();

    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|h| h.kind == HandleKind::Volume));
    // The remnant surface and its re-intersection piece are both gone;
    // nothing created during the call is left except the kept fragments.
    assert_eq!(mock.alive_created_after(mark), kept);
}

#[test]
fn non_geometric_residue_is_released() {
    let mock = MockSession::new();
    mock.emit_intersection_residue.set(true);
    let volume = mock.seed_volume(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 1.0));
    let cutter = wide_cutter(&mock);

    let mark = mock.mark();
    let kept = cut(&mock, &[volume], cutter).unwrap();

    assert_eq!(kept.len(), 2);
    assert_eq!(mock.alive_created_after(mark), kept);
}

#[test]
fn genuine_surface_fragments_survive_the_merge_test() {
    let mock = MockSession::new();
    let sheet = mock.seed_surface(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 0.0));
    let cutter = wide_cutter(&mock);

    let mark = mock.mark();
    let kept = cut(&mock, &[sheet], cutter).unwrap();

    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|h| h.kind == HandleKind::Surface));
    // Sub-pieces and recombinations were temporary.
    assert_eq!(mock.alive_created_after(mark), kept);

    let merges = mock
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::MergeEquivalents { tool, .. } if *tool == cutter.id))
        .count();
    assert_eq!(merges, 2);
}

#[test]
fn fragments_that_duplicate_the_cutter_are_discarded() {
    let mock = MockSession::new();
    mock.merge_outcome.set(MergeOutcome::Merged);
    let sheet = mock.seed_surface(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 0.0));
    let cutter = wide_cutter(&mock);

    let mark = mock.mark();
    let kept = cut(&mock, &[sheet], cutter).unwrap();

    assert!(kept.is_empty());
    assert!(mock.alive_created_after(mark).is_empty());
}

#[test]
fn temporaries_are_released_even_when_the_host_fails() {
    let mock = MockSession::new();
    mock.fail_merge.set(true);
    let sheet = mock.seed_surface(Point::new(0.0, -5.0, 0.0), Point::new(1.0, 5.0, 0.0));
    let cutter = wide_cutter(&mock);

    let mark = mock.mark();
    let err = cut(&mock, &[sheet], cutter).unwrap_err();
    assert!(matches!(err, PartitionError::Session(_)));

    // The candidate fragments are partial model state owned by the caller,
    // but every scratch object (sub-pieces, recombination) is gone.
    let leftovers = mock.alive_created_after(mark);
    assert_eq!(leftovers.len(), 2);
    assert!(leftovers.iter().all(|h| h.kind == HandleKind::Surface));
}
