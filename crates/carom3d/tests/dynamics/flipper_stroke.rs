use carom3d::collider::ItemId;
use carom3d::dynamics::{FlipperSet, FlipperSettings, FlipperStatics};
use carom3d::events::{EventKind, EventQueue};
use carom3d::math::Real;

fn stroke_settings() -> FlipperSettings {
    FlipperSettings {
        base_radius: 0.1,
        end_radius: 0.05,
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
    }
}

#[test]
fn energize_release_round_trip() {
    let mut flippers = FlipperSet::new();
    let handle = flippers.insert(ItemId(3), FlipperStatics::derive(&stroke_settings(), 0.0));
    let queue = EventQueue::new();
    let events = queue.sender();

    flippers.set_solenoid(handle, true);
    for _ in 0..60 {
        flippers[handle].integrate(0.01, &events);
    }

    let angle_end = flippers[handle].statics.angle_end;
    assert!(relative_eq!(flippers[handle].state.angle, angle_end));
    assert!(flippers[handle].state.is_in_contact);

    let strokes: Vec<_> = queue.drain().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].kind, EventKind::EndOfStroke);
    assert_eq!(strokes[0].item, ItemId(3));
    // full torque 10 on inertia 1 for 56 ticks of 0.01, reported in degrees
    assert!(relative_eq!(
        strokes[0].param,
        (5.6 as Real).to_degrees(),
        epsilon = 1.0e-2
    ));

    flippers.set_solenoid(handle, false);
    for _ in 0..100 {
        flippers[handle].integrate(0.01, &events);
    }

    assert!(relative_eq!(flippers[handle].state.angle, 0.0));
    assert!(flippers[handle].state.is_in_contact);

    let strokes: Vec<_> = queue.drain().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].kind, EventKind::BeginOfStroke);
    // the return spring pulls at half strength
    assert!(relative_eq!(
        strokes[0].param,
        (3.95 as Real).to_degrees(),
        epsilon = 1.0e-2
    ));
}

#[test]
fn unpowered_displaced_arm_returns_silently() {
    let mut flippers = FlipperSet::new();
    let handle = flippers.insert(ItemId(4), FlipperStatics::derive(&stroke_settings(), 0.0));
    let queue = EventQueue::new();
    let events = queue.sender();

    // a hit left the arm partway up with no coil commanded
    flippers[handle].state.angle = 0.3;
    for _ in 0..50 {
        flippers[handle].integrate(0.01, &events);
    }

    assert!(relative_eq!(flippers[handle].state.angle, 0.0));
    assert!(relative_eq!(flippers[handle].state.angle_speed, 0.0));
    assert!(flippers[handle].state.is_in_contact);
    // stroke events only follow solenoid commands
    assert!(queue.is_empty());
}
