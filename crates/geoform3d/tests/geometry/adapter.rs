use super::mock::MockSession;
use geoform3d::bounding_volume::{bounding_box_of, BoundingBoxError};
use geoform3d::math::Point;
use geoform3d::session::ModelSession;

#[test]
fn leaf_geometry_reports_its_extents() {
    let mock = MockSession::new();
    let volume = mock.seed_volume(Point::new(0.0, 1.0, 2.0), Point::new(10.0, 11.0, 12.0));

    let bb = bounding_box_of(&mock, volume).unwrap();
    assert_eq!(bb.mins, Point::new(0.0, 1.0, 2.0));
    assert_eq!(bb.maxs, Point::new(10.0, 11.0, 12.0));
}

#[test]
fn listables_combine_their_children() {
    let mock = MockSession::new();
    let a = mock.seed_volume(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
    let b = mock.seed_volume(Point::new(-2.0, 0.5, 0.0), Point::new(0.5, 3.0, 0.5));
    let inner = mock.group(&[a, b]).unwrap();

    let bb = bounding_box_of(&mock, inner).unwrap();
    assert_eq!(bb.mins, Point::new(-2.0, 0.0, 0.0));
    assert_eq!(bb.maxs, Point::new(1.0, 3.0, 1.0));

    // Nesting recurses.
    let c = mock.seed_surface(Point::new(0.0, 0.0, 4.0), Point::new(0.5, 0.5, 4.0));
    let outer = mock.group(&[inner, c]).unwrap();
    let bb = bounding_box_of(&mock, outer).unwrap();
    assert_eq!(bb.mins, Point::new(-2.0, 0.0, 0.0));
    assert_eq!(bb.maxs, Point::new(1.0, 3.0, 4.0));
}

#[test]
fn an_empty_listable_cannot_be_measured() {
    let mock = MockSession::new();
    let empty = mock.group(&[]).unwrap();
    assert!(matches!(
        bounding_box_of(&mock, empty),
        Err(BoundingBoxError::EmptyInput)
    ));
}
