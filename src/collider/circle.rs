//! Definition of the vertical cylinder collider: posts, bumper skirts,
//! round triggers and kicker pockets.

use crate::ball::BallData;
use crate::collider::{ColliderHeader, ColliderInfo, ColliderType, ItemType};
use crate::collision::CollisionEvent;
use crate::constants::{CONTACT_VEL, LOW_NORM_VEL, PHYS_TOUCH};
use crate::math::{Real, Vector};
use crate::utils;
use na::{Point2, Vector2};

/// A circle on the playfield plane extruded from `z_low` to `z_high`.
///
/// Solid ones (posts, rubbers) reflect the ball off their lateral surface;
/// trigger- and kicker-owned ones are permeable and only report the ball
/// center crossing the circle line.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CircleCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// Circle center on the playfield plane.
    pub center: Point2<Real>,
    /// Circle radius.
    pub radius: Real,
    /// Bottom of the extruded cylinder.
    pub z_low: Real,
    /// Top of the extruded cylinder.
    pub z_high: Real,
}

impl CircleCollider {
    /// Builds a cylinder collider.
    pub fn new(
        info: ColliderInfo,
        center: Point2<Real>,
        radius: Real,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        CircleCollider {
            header: ColliderHeader::new(ColliderType::Circle, &info),
            center,
            radius,
            z_low,
            z_high,
        }
    }

    /// True when a nearly stationary ball sits inside this kicker's pocket.
    ///
    /// The pipeline clears such a ball's inside-of membership before the
    /// narrowphase runs, so the kicker captures (and announces) the ball
    /// again instead of staying silent forever.
    pub fn captures_stalled_ball(&self, ball: &BallData) -> bool {
        if self.header.item_type != ItemType::Kicker {
            return false;
        }

        let dist = Vector2::new(ball.position.x - self.center.x, ball.position.y - self.center.y);
        let bnd = dist.norm() - self.radius;
        bnd <= 0.0 && bnd >= -self.radius && ball.velocity.norm_squared() < CONTACT_VEL * CONTACT_VEL
    }

    /// Sweeps a ball against the cylinder.
    pub fn hit_test(&self, ball: &BallData, d_time: Real) -> Option<CollisionEvent> {
        let permeable = matches!(self.header.item_type, ItemType::Trigger | ItemType::Kicker);
        let (direction, lateral, rigid) = if permeable {
            (false, false, false)
        } else {
            (true, true, true)
        };

        self.hit_test_basic_radius(ball, d_time, direction, lateral, rigid)
    }

    /// The shared swept test, parameterized the way flipper end caps also need it.
    pub(crate) fn hit_test_basic_radius(
        &self,
        ball: &BallData,
        d_time: Real,
        direction: bool,
        lateral: bool,
        rigid: bool,
    ) -> Option<CollisionEvent> {
        // the sweep itself is planar; height only enters through the span check below
        let dist = Vector2::new(ball.position.x - self.center.x, ball.position.y - self.center.y);
        let dv = Vector2::new(ball.velocity.x, ball.velocity.y);

        let is_kicker_or_trigger =
            matches!(self.header.item_type, ItemType::Kicker | ItemType::Trigger);

        let target_radius = if lateral {
            self.radius + ball.radius
        } else {
            self.radius
        };

        let bcddsq = dist.norm_squared();
        let bcdd = bcddsq.sqrt();
        if bcdd <= 1.0e-6 {
            // no hit on the exact center
            return None;
        }

        let b = dist.dot(&dv);
        let a = dv.norm_squared();

        let bnv = b / bcdd;
        if direction && bnv > LOW_NORM_VEL {
            // clearly receding from the surface
            return None;
        }

        let bnd = bcdd - target_radius;

        let mut hit_time = 0.0;
        let mut is_unhit = false;
        let mut is_contact = false;

        if rigid && bnd < PHYS_TOUCH {
            // in or near contact right now
            if bnd < -ball.radius {
                // excessive penetration of the skin, no collision
                return None;
            }

            if bnv.abs() <= CONTACT_VEL {
                is_contact = true;
            } else {
                // estimate along the normal, leaving the ball embedded
                hit_time = (-bnd / bnv).max(0.0);
            }
        } else if is_kicker_or_trigger
            && (bnd < 0.0) == ball.inside_ofs.is_outside_of(self.header.item)
        {
            // a transition the membership missed: register it without a bounce
            is_unhit = bnd > 0.0;
        } else {
            if !rigid && bnd * bnv > 0.0 || a < 1.0e-8 {
                // (outside and receding) or (inside and sinking),
                // or ball not moving at all
                return None;
            }

            let (time1, time2) =
                utils::solve_quadratic(a, 2.0 * b, bcddsq - target_radius * target_radius)?;

            is_unhit = time1 * time2 < 0.0;
            hit_time = if is_unhit {
                // ball is already inside the circle
                time1.max(time2)
            } else {
                time1.min(time2)
            };
        }

        if !hit_time.is_finite() || hit_time < 0.0 || hit_time > d_time {
            return None;
        }

        // rolling point must be within the cylinder's vertical span
        let hit_z = ball.position.z + ball.velocity.z * hit_time;
        if hit_z + ball.radius * 0.5 < self.z_low || hit_z - ball.radius * 0.5 > self.z_high {
            return None;
        }

        let hit_x = ball.position.x + dv.x * hit_time;
        let hit_y = ball.position.y + dv.y * hit_time;
        let sqr_len = (hit_x - self.center.x) * (hit_x - self.center.x)
            + (hit_y - self.center.y) * (hit_y - self.center.y);

        let normal = if sqr_len > 1.0e-8 {
            let inv_len = 1.0 / sqr_len.sqrt();
            Vector::new(
                (hit_x - self.center.x) * inv_len,
                (hit_y - self.center.y) * inv_len,
                0.0,
            )
        } else {
            // over the center; any direction will do
            Vector::y()
        };

        let mut coll = CollisionEvent::new(hit_time, normal, bnd);

        if !rigid {
            // receding from outside reads as leaving the volume
            coll.hit_flag = is_unhit;
        }

        if is_contact {
            coll.is_contact = true;
            coll.org_normal_velocity = bnv;
        }

        Some(coll)
    }
}
