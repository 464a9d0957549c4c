//! Definition of the point collider used for wall corners and post tips.

use crate::ball::BallData;
use crate::collider::{ColliderHeader, ColliderInfo, ColliderType};
use crate::collision::CollisionEvent;
use crate::constants::{CONTACT_VEL, PHYS_TOUCH};
use crate::math::{Point, Real};
use crate::utils;

/// A single rigid point in space.
///
/// The ball collides with it whenever its surface sweeps over the point, so
/// the effective shape is the ball itself mirrored onto the point.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// The point being collided with.
    pub point: Point<Real>,
}

impl PointCollider {
    /// Builds a point collider.
    pub fn new(info: ColliderInfo, point: Point<Real>) -> Self {
        PointCollider {
            header: ColliderHeader::new(ColliderType::Point, &info),
            point,
        }
    }

    /// Sweeps a ball against the point.
    pub fn hit_test(&self, ball: &BallData, d_time: Real) -> Option<CollisionEvent> {
        let dist = ball.position - self.point;
        let bcdd = dist.norm();
        if bcdd <= 1.0e-6 {
            // no hit on the exact center
            return None;
        }

        let b = dist.dot(&ball.velocity);
        let bnv = b / bcdd;
        if bnv > CONTACT_VEL {
            // clearly receding
            return None;
        }

        let bnd = bcdd - ball.radius;
        let a = ball.velocity.norm_squared();

        let mut hit_time = 0.0;
        let mut is_contact = false;

        if bnd < PHYS_TOUCH {
            // in or near contact right now
            if bnv.abs() <= CONTACT_VEL {
                is_contact = true;
            } else {
                // estimate along the normal, leaving the ball embedded
                hit_time = (-bnd / bnv).max(0.0);
            }
        } else {
            if a < 1.0e-8 {
                // ball not moving relative to the point
                return None;
            }

            let (time1, time2) =
                utils::solve_quadratic(a, 2.0 * b, bcdd * bcdd - ball.radius * ball.radius)?;
            hit_time = time1.min(time2);
        }

        if !hit_time.is_finite() || hit_time < 0.0 || hit_time > d_time {
            return None;
        }

        let hit_pos = ball.position + ball.velocity * hit_time;
        let normal = (hit_pos - self.point).normalize();

        let mut coll = CollisionEvent::new(hit_time, normal, bnd);
        if is_contact {
            coll.is_contact = true;
            coll.org_normal_velocity = bnv;
        }

        Some(coll)
    }
}
