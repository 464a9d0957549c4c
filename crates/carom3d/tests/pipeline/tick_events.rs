use carom3d::ball::{BallData, BallSet};
use carom3d::collider::{Collider, ColliderInfo, ColliderSet, ItemId, ItemType};
use carom3d::dynamics::{FlipperSet, FlipperSettings, FlipperStatics};
use carom3d::events::{EventKind, EventQueue};
use carom3d::material::PhysicsMaterial;
use carom3d::math::{Point, Real, Vector};
use carom3d::pipeline::{BruteForceBroadPhase, PhysicsPipeline};
use na::Point2;
use rand::SeedableRng;
use rand_isaac::IsaacRng;

/// The free flight the pipeline leaves to its host.
fn advance(balls: &mut BallSet, d_time: Real) {
    for (_, ball) in balls.iter_mut() {
        let flight = ball.velocity * d_time;
        ball.position += flight;
    }
}

/// A perfectly elastic event-firing wall along x from 0 to 4, facing +y.
fn bouncy_wall(item: ItemId) -> Collider {
    let mut info = ColliderInfo::new(item, ItemType::Primitive);
    info.material = PhysicsMaterial::new(1.0, 0.0, 0.0, 0.0);
    info.fire_events = true;
    Collider::line(info, Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), 0.0, 1.0)
}

#[test]
fn wall_hit_fires_once_per_approach() {
    let mut pipeline = PhysicsPipeline::new();
    let mut colliders = ColliderSet::new();
    let wall = colliders.insert(bouncy_wall(ItemId(1)));
    let mut balls = BallSet::new();
    let ball = balls.insert(BallData::new(
        Point::new(2.0, 3.0, 0.5),
        Vector::new(0.0, -5.0, 0.0),
        0.25,
    ));
    let mut flippers = FlipperSet::new();
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    for _ in 0..6 {
        pipeline.step(
            0.1,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );
        advance(&mut balls, 0.1);
    }

    let hits: Vec<_> = queue.drain().collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, EventKind::Hit);
    assert_eq!(hits[0].item, colliders[wall].item());
    assert_eq!(hits[0].ball, Some(ball));
    assert!(relative_eq!(hits[0].param, 5.0));
    assert!(relative_eq!(balls[ball].velocity.y, 5.0));

    // throw it straight back; the rebound happens barely half a ball from
    // the recorded event spot, so it resolves without a second event
    balls[ball].velocity = Vector::new(0.0, -5.0, 0.0);
    for _ in 0..2 {
        pipeline.step(
            0.1,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );
        advance(&mut balls, 0.1);
    }

    assert!(queue.is_empty());
    assert!(relative_eq!(balls[ball].velocity.y, 5.0));
}

#[test]
fn soft_hit_below_the_threshold_reflects_silently() {
    let mut pipeline = PhysicsPipeline::new();
    let mut colliders = ColliderSet::new();
    let mut info = ColliderInfo::new(ItemId(1), ItemType::Primitive);
    info.material = PhysicsMaterial::new(1.0, 0.0, 0.0, 0.0);
    info.fire_events = true;
    // the ball arrives at 5; only an impact of 8 or more may report
    info.threshold = 8.0;
    let _ = colliders.insert(Collider::line(
        info,
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        0.0,
        1.0,
    ));
    let mut balls = BallSet::new();
    let ball = balls.insert(BallData::new(
        Point::new(2.0, 3.0, 0.5),
        Vector::new(0.0, -5.0, 0.0),
        0.25,
    ));
    let mut flippers = FlipperSet::new();
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    for _ in 0..6 {
        pipeline.step(
            0.1,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );
        advance(&mut balls, 0.1);
    }

    // the wall still plays: the ball bounced, but the tap was too soft to report
    assert!(relative_eq!(balls[ball].velocity.y, 5.0));
    assert!(queue.is_empty());
}

#[test]
fn earliest_hit_resolves_first() {
    let mut pipeline = PhysicsPipeline::new();
    let mut colliders = ColliderSet::new();
    let _ = colliders.insert(bouncy_wall(ItemId(1)));
    let mut balls = BallSet::new();
    // the farther ball gets the lower handle on purpose
    let far = balls.insert(BallData::new(
        Point::new(1.0, 3.0, 0.5),
        Vector::new(0.0, -5.0, 0.0),
        0.25,
    ));
    let near = balls.insert(BallData::new(
        Point::new(3.0, 2.9, 0.5),
        Vector::new(0.0, -5.0, 0.0),
        0.25,
    ));
    let mut flippers = FlipperSet::new();
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    for _ in 0..6 {
        pipeline.step(
            0.1,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );
        advance(&mut balls, 0.1);
    }

    // both reach the wall in the same tick; resolution runs in ascending
    // time-of-impact order, not in handle order
    let hits: Vec<_> = queue.drain().collect();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].ball, Some(near));
    assert_eq!(hits[1].ball, Some(far));
    assert!(relative_eq!(hits[0].param, 5.0));
    assert!(relative_eq!(hits[1].param, 5.0));
    assert!(balls[far].velocity.y > 0.0);
    assert!(balls[near].velocity.y > 0.0);
}

#[test]
fn trigger_membership_cycle() {
    let mut pipeline = PhysicsPipeline::new();
    let mut colliders = ColliderSet::new();
    let item = ItemId(5);
    let _ = colliders.insert(Collider::circle(
        ColliderInfo::new(item, ItemType::Trigger),
        Point2::new(0.0, 0.0),
        0.5,
        -1.0,
        1.0,
    ));
    let mut balls = BallSet::new();
    let ball = balls.insert(BallData::new(
        Point::new(1.5, 0.1, 0.0),
        Vector::new(-1.0, 0.0, 0.0),
        0.25,
    ));
    let mut flippers = FlipperSet::new();
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    // roll through the round trigger slightly off center and out the far side
    for _ in 0..5 {
        pipeline.step(
            0.5,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );
        advance(&mut balls, 0.5);
    }

    let crossings: Vec<_> = queue.drain().collect();
    assert_eq!(crossings.len(), 2);
    assert_eq!(crossings[0].kind, EventKind::Enter);
    assert_eq!(crossings[1].kind, EventKind::Exit);
    assert_eq!(crossings[0].item, item);
    assert_eq!(crossings[0].ball, Some(ball));

    // permeable colliders never deflect the ball
    assert_eq!(balls[ball].velocity, Vector::new(-1.0, 0.0, 0.0));
    assert!(balls[ball].inside_ofs.is_outside_of(item));
}

#[test]
fn stalled_ball_reannounced_to_its_kicker() {
    let mut pipeline = PhysicsPipeline::new();
    let mut colliders = ColliderSet::new();
    let item = ItemId(6);
    let _ = colliders.insert(Collider::circle(
        ColliderInfo::new(item, ItemType::Kicker),
        Point2::new(0.0, 0.0),
        0.5,
        -1.0,
        1.0,
    ));
    let mut balls = BallSet::new();
    // a captured ball sitting almost dead inside the pocket
    let mut captured = BallData::new(
        Point::new(0.2, 0.0, 0.0),
        Vector::new(0.01, 0.0, 0.0),
        0.25,
    );
    captured.inside_ofs.set_inside_of(item);
    let ball = balls.insert(captured);
    let mut flippers = FlipperSet::new();
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    pipeline.step(
        1.0,
        &BruteForceBroadPhase,
        &colliders,
        &mut balls,
        &mut flippers,
        &queue,
        &mut rng,
    );

    // the stall pre-pass dropped the membership, so the pocket announced
    // the ball again for the host to eject
    let crossings: Vec<_> = queue.drain().collect();
    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].kind, EventKind::Enter);
    assert_eq!(crossings[0].item, item);
    assert_eq!(crossings[0].ball, Some(ball));
    assert!(balls[ball].inside_ofs.is_inside_of(item));
}

#[test]
fn ball_resolves_against_the_arm_before_it_integrates() {
    let settings = FlipperSettings {
        base_radius: 0.2,
        end_radius: 0.1,
        flipper_radius_min: 0.0,
        flipper_radius_max: 1.0,
        start_angle: 0.0,
        end_angle: 90.0,
        mass: 3.0,
        strength: 0.0,
        return_ratio: 0.5,
        torque_damping: 0.75,
        torque_damping_angle: 0.0,
        ramp_up_speed: 0.0,
    };

    let mut pipeline = PhysicsPipeline::new();
    let mut flippers = FlipperSet::new();
    let item = ItemId(8);
    let handle = flippers.insert(item, FlipperStatics::derive(&settings, 0.0));
    let mut colliders = ColliderSet::new();
    let _ = colliders.insert(Collider::flipper(
        ColliderInfo::new(item, ItemType::Flipper),
        handle,
        Point2::new(0.0, 0.0),
        0.0,
        0.5,
    ));

    // arm already rotating, ball resting on the face it sweeps toward
    flippers[handle].state.angle_speed = 0.5;
    flippers[handle].state.angular_momentum = 0.5;
    let mut balls = BallSet::new();
    let ball = balls.insert(BallData::new(
        Point::new(0.40274435, -0.49274435, 0.25),
        Vector::zeros(),
        0.25,
    ));
    let queue = EventQueue::new();
    let mut rng = IsaacRng::seed_from_u64(0);

    pipeline.step(
        1.0,
        &BruteForceBroadPhase,
        &colliders,
        &mut balls,
        &mut flippers,
        &queue,
        &mut rng,
    );

    // the launch speed matches the pre-integration pose and arm speed; had
    // the arm rotated first, the face would have left the ball behind
    assert!(relative_eq!(balls[ball].velocity.x, 0.2448484, epsilon = 1.0e-4));
    assert!(relative_eq!(balls[ball].velocity.z, 0.0));

    // the reaction torque entered the same tick's integration and is spent
    let state = &flippers[handle].state;
    assert!(relative_eq!(state.angle_speed, 0.3961903, epsilon = 1.0e-4));
    assert!(relative_eq!(state.angle, state.angle_speed, epsilon = 1.0e-6));
    assert_eq!(state.impact_torque, 0.0);

    // flippers are not primitives; no plain hit event fires
    assert!(queue.is_empty());
}
