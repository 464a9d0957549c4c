use carom3d::ball::BallData;
use carom3d::collider::{Collider, ColliderInfo, ItemId, ItemType};
use carom3d::dynamics::{FlipperHandle, FlipperSet, FlipperSettings, FlipperStatics};
use carom3d::math::{Point, Real, Vector};
use na::Point2;

/// An arm of length 1 hinged at the origin, parked pointing down -y, with a
/// 90 degree stroke.
fn arm() -> (FlipperSet, FlipperHandle, Collider) {
    let settings = FlipperSettings {
        base_radius: 0.2,
        end_radius: 0.1,
        flipper_radius_min: 0.0,
        flipper_radius_max: 1.0,
        start_angle: 0.0,
        end_angle: 90.0,
        mass: 3.0,
        strength: 10.0,
        return_ratio: 0.5,
        torque_damping: 0.75,
        torque_damping_angle: 0.0,
        ramp_up_speed: 0.0,
    };

    let mut flippers = FlipperSet::new();
    let handle = flippers.insert(ItemId(8), FlipperStatics::derive(&settings, 0.0));
    let collider = Collider::flipper(
        ColliderInfo::new(ItemId(8), ItemType::Flipper),
        handle,
        Point2::new(0.0, 0.0),
        0.0,
        0.5,
    );
    (flippers, handle, collider)
}

#[test]
fn tip_cap_hit_below_the_parked_arm() {
    let (flippers, _, collider) = arm();
    let ball = BallData::new(Point::new(0.0, -2.0, 0.25), Vector::new(0.0, 2.0, 0.0), 0.25);

    let coll = collider.hit_test(&ball, &flippers, 1.0).unwrap();
    // straight up into the round tip at (0, -1); both faces fail the
    // tangent check so only the cap reports, gap of 0.65 closing at 2
    assert!(relative_eq!(coll.time_of_impact, 0.325, epsilon = 1.0e-5));
    assert!(relative_eq!(coll.normal, -Vector::y(), epsilon = 1.0e-6));
}

#[test]
fn raised_arm_moves_the_hit_to_the_hub() {
    let (mut flippers, handle, collider) = arm();
    let parked = {
        let ball = BallData::new(Point::new(0.0, -2.0, 0.25), Vector::new(0.0, 2.0, 0.0), 0.25);
        collider.hit_test(&ball, &flippers, 1.0).unwrap()
    };

    // swing the arm horizontal; the collider reads the new pose on its own
    flippers[handle].state.angle = (90.0 as Real).to_radians();
    let ball = BallData::new(Point::new(0.0, -2.0, 0.25), Vector::new(0.0, 2.0, 0.0), 0.25);
    let raised = collider.hit_test(&ball, &flippers, 1.0).unwrap();

    // with the tip out of the way the ball travels on until the base circle,
    // gap of 1.55 closing at 2
    assert!(raised.time_of_impact > parked.time_of_impact);
    assert!(relative_eq!(raised.time_of_impact, 0.775, epsilon = 1.0e-5));
    assert!(relative_eq!(raised.normal, -Vector::y(), epsilon = 1.0e-6));
}

#[test]
fn lane_beside_the_parked_arm_is_clear() {
    let (flippers, _, collider) = arm();
    let ball = BallData::new(Point::new(1.5, -2.0, 0.25), Vector::new(0.0, 2.0, 0.0), 0.25);

    assert!(collider.hit_test(&ball, &flippers, 1.0).is_none());
}
