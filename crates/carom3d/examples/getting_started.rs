extern crate nalgebra as na;

use carom3d::ball::{BallData, BallSet};
use carom3d::collider::{Collider, ColliderInfo, ColliderSet, ItemId, ItemType};
use carom3d::dynamics::FlipperSet;
use carom3d::events::{EventKind, EventQueue};
use carom3d::material::PhysicsMaterial;
use carom3d::math::{Point, Vector};
use carom3d::pipeline::{BruteForceBroadPhase, PhysicsPipeline};
use na::Point2;

fn main() {
    // A strip of playfield: an elastic wall at the bottom and a round
    // trigger halfway down the lane.
    let mut colliders = ColliderSet::new();

    let mut wall = ColliderInfo::new(ItemId(1), ItemType::Primitive);
    wall.material = PhysicsMaterial::new(0.8, 0.0, 0.0, 0.0);
    wall.fire_events = true;
    let _ = colliders.insert(Collider::line(
        wall,
        Point2::new(-2.0, 0.0),
        Point2::new(2.0, 0.0),
        0.0,
        2.0,
    ));

    let _ = colliders.insert(Collider::circle(
        ColliderInfo::new(ItemId(2), ItemType::Trigger),
        Point2::new(0.0, 4.0),
        0.5,
        0.0,
        2.0,
    ));

    let mut balls = BallSet::new();
    let ball = balls.insert(BallData::new(
        Point::new(0.0, 8.4, 0.5),
        Vector::new(0.0, -2.0, 0.0),
        0.25,
    ));

    let mut flippers = FlipperSet::new();
    let mut pipeline = PhysicsPipeline::new();
    let queue = EventQueue::new();
    let mut rng = rand::thread_rng();

    for _ in 0..12 {
        pipeline.step(
            1.0,
            &BruteForceBroadPhase,
            &colliders,
            &mut balls,
            &mut flippers,
            &queue,
            &mut rng,
        );

        // free flight between collisions is the host's job
        let flight = balls[ball].velocity * 1.0;
        balls[ball].position += flight;
    }

    // down through the trigger, a bounce off the wall, and back out
    let events: Vec<_> = queue.drain().collect();
    let kinds: Vec<_> = events.iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        [
            EventKind::Enter,
            EventKind::Exit,
            EventKind::Hit,
            EventKind::Enter,
            EventKind::Exit,
        ]
    );

    assert_eq!(events[2].ball, Some(ball));
    assert!(events[2].param > 1.0);
    assert!(balls[ball].velocity.y > 0.0);
}
