use carom3d::ball::BallData;
use carom3d::collider::{Collider, ColliderInfo, ItemId, ItemType};
use carom3d::dynamics::FlipperSet;
use carom3d::math::{Point, Real, Vector};

/// One 45 degree ramp face rising along +y.
fn ramp_face() -> Collider {
    Collider::triangle(
        ColliderInfo::new(ItemId(1), ItemType::Surface),
        Point::new(0.0, 0.0, 0.0),
        Point::new(4.0, 0.0, 0.0),
        Point::new(0.0, 4.0, 4.0),
    )
}

#[test]
fn dropping_onto_the_ramp() {
    let ramp = ramp_face();
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(1.0, 1.0, 3.0), Vector::new(0.0, 0.0, -4.0), 0.25);

    let root2 = (2.0 as Real).sqrt();
    let coll = ramp.hit_test(&ball, &flippers, 1.0).unwrap();

    // the center starts sqrt(2) off the inclined plane; the drop closes the
    // normal gap at 4 / sqrt(2)
    assert!(relative_eq!(
        coll.time_of_impact,
        (root2 - 0.25) / (2.0 * root2),
        epsilon = 1.0e-6
    ));
    assert!(relative_eq!(
        coll.normal,
        Vector::new(0.0, -root2 / 2.0, root2 / 2.0),
        epsilon = 1.0e-6
    ));
}

#[test]
fn toi_respects_the_sweep_window() {
    let ramp = ramp_face();
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(1.0, 1.0, 3.0), Vector::new(0.0, 0.0, -4.0), 0.25);

    assert!(ramp.hit_test(&ball, &flippers, 0.3).is_none());
    assert!(ramp.hit_test(&ball, &flippers, 0.5).is_some());
}

#[test]
fn plane_crossing_outside_the_face() {
    let ramp = ramp_face();
    let flippers = FlipperSet::new();
    // same drop, but it crosses the plane beyond the hypotenuse
    let ball = BallData::new(Point::new(3.0, 3.0, 5.0), Vector::new(0.0, 0.0, -4.0), 0.25);

    assert!(ramp.hit_test(&ball, &flippers, 1.0).is_none());
}
