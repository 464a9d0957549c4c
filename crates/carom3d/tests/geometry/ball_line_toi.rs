use carom3d::ball::BallData;
use carom3d::collider::{Collider, ColliderInfo, ItemId, ItemType};
use carom3d::dynamics::FlipperSet;
use carom3d::math::{Point, Real, Vector};
use na::Point2;

/// A 45 degree wall cutting across the corner, one unit tall, facing the
/// origin.
fn corner_wall() -> Collider {
    Collider::line(
        ColliderInfo::new(ItemId(1), ItemType::Surface),
        Point2::new(4.0, 0.0),
        Point2::new(0.0, 4.0),
        0.0,
        1.0,
    )
}

#[test]
fn diagonal_wall_impact() {
    let wall = corner_wall();
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(0.0, 0.0, 0.25), Vector::new(2.0, 2.0, 0.0), 0.25);

    let root2 = (2.0 as Real).sqrt();
    let coll = wall.hit_test(&ball, &flippers, 1.0).unwrap();

    // the ball center starts 2 * sqrt(2) off the face and closes at the
    // same rate, minus its own radius
    assert!(relative_eq!(
        coll.time_of_impact,
        (2.0 * root2 - 0.25) / (2.0 * root2),
        epsilon = 1.0e-6
    ));
    assert!(relative_eq!(
        coll.normal,
        Vector::new(-root2 / 2.0, -root2 / 2.0, 0.0),
        epsilon = 1.0e-6
    ));
    assert!(relative_eq!(coll.distance, 2.0 * root2 - 0.25, epsilon = 1.0e-6));
    assert!(!coll.is_contact);
}

#[test]
fn window_too_short_reports_nothing() {
    let wall = corner_wall();
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(0.0, 0.0, 0.25), Vector::new(2.0, 2.0, 0.0), 0.25);

    // the same flight misses a window ending before the contact
    assert!(wall.hit_test(&ball, &flippers, 0.5).is_none());
}

#[test]
fn crossing_beyond_the_endpoint() {
    let wall = corner_wall();
    let flippers = FlipperSet::new();
    // approaches the extended line but crosses it past the first endpoint
    let ball = BallData::new(Point::new(6.0, -4.0, 0.25), Vector::new(2.0, 2.0, 0.0), 0.25);

    assert!(wall.hit_test(&ball, &flippers, 1.0).is_none());
}
