//! The per-tick driver tying narrowphase, resolution and flipper dynamics
//! together.

use ordered_float::OrderedFloat;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ball::{BallData, BallHandle, BallSet};
use crate::collider::{Collider, ColliderHandle, ColliderSet, ItemType};
use crate::collision::CollisionEvent;
use crate::dynamics::FlipperSet;
use crate::events::{EventQueue, EventSender};
use crate::math::Real;
use crate::pipeline::BroadPhase;

/// One ball's earliest hit of the tick, pending resolution.
#[derive(Copy, Clone, Debug)]
struct TickWinner {
    ball: BallHandle,
    collider: ColliderHandle,
    coll: CollisionEvent,
}

/// Runs complete simulation ticks.
///
/// The pipeline owns nothing but scratch buffers. Balls, colliders and
/// flippers live in the sets the caller hands to [`PhysicsPipeline::step`],
/// so a host can snapshot or replace them between ticks.
#[derive(Default)]
pub struct PhysicsPipeline {
    kickers: Vec<ColliderHandle>,
    #[cfg(not(feature = "parallel"))]
    candidates: Vec<ColliderHandle>,
    winners: Vec<TickWinner>,
    struck: Vec<ColliderHandle>,
}

impl PhysicsPipeline {
    /// A pipeline with empty scratch buffers.
    pub fn new() -> Self {
        PhysicsPipeline::default()
    }

    /// Advances the simulation by one tick of length `d_time`.
    ///
    /// In order:
    /// 1. balls stalled on top of a kicker are marked outside of it again so
    ///    the kicker can recapture them;
    /// 2. every ball is swept against its broad-phase candidates and the
    ///    earliest hit per ball is kept;
    /// 3. the kept hits resolve in ascending time-of-impact order, ties
    ///    breaking on the ball handle, and any collider already struck this
    ///    tick is re-queried before its next resolution;
    /// 4. flippers integrate their accumulated torques and sweep their arcs.
    ///
    /// Free flight is the caller's job, as is draining `events` afterwards.
    pub fn step<BP, R>(
        &mut self,
        d_time: Real,
        broad_phase: &BP,
        colliders: &ColliderSet,
        balls: &mut BallSet,
        flippers: &mut FlipperSet,
        events: &EventQueue,
        rng: &mut R,
    ) where
        BP: BroadPhase + ?Sized,
        R: Rng + ?Sized,
    {
        let sender = events.sender();

        self.release_stalled_balls(colliders, balls);
        self.find_winners(d_time, broad_phase, colliders, balls, flippers);
        self.resolve(d_time, colliders, balls, flippers, &sender, rng);

        for (_, flipper) in flippers.iter_mut() {
            flipper.integrate(d_time, &sender);
        }
    }

    /// Marks balls sitting dead on a kicker as outside of it, so that the
    /// next sweep reads as a fresh entry and the pocket captures them again.
    fn release_stalled_balls(&mut self, colliders: &ColliderSet, balls: &mut BallSet) {
        self.kickers.clear();
        for (handle, collider) in colliders.iter() {
            if let Collider::Circle(circle) = collider {
                if circle.header.item_type == ItemType::Kicker {
                    self.kickers.push(handle);
                }
            }
        }
        if self.kickers.is_empty() {
            return;
        }

        for (_, ball) in balls.iter_mut() {
            for &handle in &self.kickers {
                if let Some(Collider::Circle(circle)) = colliders.get(handle) {
                    if circle.captures_stalled_ball(ball) {
                        ball.inside_ofs.set_outside_of(circle.header.item);
                    }
                }
            }
        }
    }

    /// Sweeps every ball against its candidates and keeps the earliest hit
    /// per ball, sorted for deterministic resolution.
    fn find_winners<BP>(
        &mut self,
        d_time: Real,
        broad_phase: &BP,
        colliders: &ColliderSet,
        balls: &BallSet,
        flippers: &FlipperSet,
    ) where
        BP: BroadPhase + ?Sized,
    {
        self.winners.clear();

        #[cfg(not(feature = "parallel"))]
        for (handle, ball) in balls.iter() {
            self.candidates.clear();
            broad_phase.candidates(ball, d_time, colliders, &mut self.candidates);
            if let Some(winner) =
                earliest_hit(ball, handle, &self.candidates, colliders, flippers, d_time)
            {
                self.winners.push(winner);
            }
        }

        #[cfg(feature = "parallel")]
        {
            let per_ball: Vec<_> = balls.iter().collect();
            let found: Vec<_> = per_ball
                .par_iter()
                .filter_map(|(handle, ball)| {
                    let mut candidates = Vec::new();
                    broad_phase.candidates(ball, d_time, colliders, &mut candidates);
                    earliest_hit(ball, *handle, &candidates, colliders, flippers, d_time)
                })
                .collect();
            self.winners.extend(found);
        }

        self.winners
            .sort_by_key(|winner| (OrderedFloat(winner.coll.time_of_impact), winner.ball));
    }

    /// Resolves this tick's winners in order.
    fn resolve<R: Rng + ?Sized>(
        &mut self,
        d_time: Real,
        colliders: &ColliderSet,
        balls: &mut BallSet,
        flippers: &mut FlipperSet,
        events: &EventSender,
        rng: &mut R,
    ) {
        self.struck.clear();

        for winner in &self.winners {
            let collider = match colliders.get(winner.collider) {
                Some(collider) => collider,
                None => continue,
            };
            let ball = match balls.get_mut(winner.ball) {
                Some(ball) => ball,
                None => continue,
            };

            // An earlier resolution may have changed what this collider
            // would report, so ask it again before trusting the sweep.
            let coll = if self.struck.contains(&winner.collider) {
                match collider.hit_test(ball, flippers, d_time) {
                    Some(coll) => coll,
                    None => continue,
                }
            } else {
                winner.coll
            };

            collider.collide(ball, winner.ball, &coll, flippers, events, d_time, rng);
            self.struck.push(winner.collider);
        }
    }
}

/// The earliest hit among `candidates`, if any sweep reports one.
///
/// Ties keep the earlier candidate, so candidate order decides between
/// exactly simultaneous hits.
fn earliest_hit(
    ball: &BallData,
    handle: BallHandle,
    candidates: &[ColliderHandle],
    colliders: &ColliderSet,
    flippers: &FlipperSet,
    d_time: Real,
) -> Option<TickWinner> {
    let mut best: Option<TickWinner> = None;

    for &candidate in candidates {
        let collider = match colliders.get(candidate) {
            Some(collider) => collider,
            None => continue,
        };
        if let Some(coll) = collider.hit_test(ball, flippers, d_time) {
            let earlier = match &best {
                Some(winner) => coll.time_of_impact < winner.coll.time_of_impact,
                None => true,
            };
            if earlier {
                best = Some(TickWinner {
                    ball: handle,
                    collider: candidate,
                    coll,
                });
            }
        }
    }

    best
}
