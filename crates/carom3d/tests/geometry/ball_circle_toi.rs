use carom3d::ball::BallData;
use carom3d::collider::{Collider, ColliderInfo, ItemId, ItemType};
use carom3d::dynamics::FlipperSet;
use carom3d::math::{Point, Vector};
use na::Point2;

#[test]
fn head_on_post_toi() {
    let post = Collider::circle(
        ColliderInfo::new(ItemId(1), ItemType::Surface),
        Point2::new(1.0, 1.0),
        0.3,
        -1.0,
        1.0,
    );
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(1.0, 3.0, 0.0), Vector::new(0.0, -2.0, 0.0), 0.2);

    // surfaces meet when the centers are 0.5 apart: a gap of 1.5 closing at 2
    let coll = post.hit_test(&ball, &flippers, 1.0).unwrap();
    assert!(relative_eq!(coll.time_of_impact, 0.75, epsilon = 1.0e-6));
    assert!(relative_eq!(coll.normal, Vector::y(), epsilon = 1.0e-6));
    assert!(relative_eq!(coll.distance, 1.5, epsilon = 1.0e-6));
}

#[test]
fn swept_circle_misses_offset_post() {
    let post = Collider::circle(
        ColliderInfo::new(ItemId(1), ItemType::Surface),
        Point2::new(0.0, 0.0),
        0.3,
        -1.0,
        1.0,
    );
    let flippers = FlipperSet::new();
    // closest approach is 0.6, just over the 0.5 the surfaces would need
    let ball = BallData::new(Point::new(-2.0, 0.6, 0.0), Vector::new(4.0, 0.0, 0.0), 0.2);

    assert!(post.hit_test(&ball, &flippers, 1.0).is_none());
}

#[test]
fn kicker_senses_the_ball_center() {
    let center = Point2::new(0.0, 0.0);
    let kicker = Collider::circle(
        ColliderInfo::new(ItemId(2), ItemType::Kicker),
        center,
        0.5,
        -1.0,
        1.0,
    );
    let post = Collider::circle(
        ColliderInfo::new(ItemId(3), ItemType::Surface),
        center,
        0.5,
        -1.0,
        1.0,
    );
    let flippers = FlipperSet::new();
    let ball = BallData::new(Point::new(1.5, 0.0, 0.0), Vector::new(-2.0, 0.0, 0.0), 0.25);

    // the permeable pocket waits for the ball center to reach the circle,
    // while a solid post of the same size meets the ball surface earlier
    let entry = kicker.hit_test(&ball, &flippers, 1.0).unwrap();
    assert!(relative_eq!(entry.time_of_impact, 0.5, epsilon = 1.0e-6));
    assert!(!entry.hit_flag, "an inbound crossing must not read as unhit");

    let bounce = post.hit_test(&ball, &flippers, 1.0).unwrap();
    assert!(relative_eq!(bounce.time_of_impact, 0.375, epsilon = 1.0e-6));
}
