//! Definition of the vertical wall segment collider.

use crate::ball::BallData;
use crate::collider::{ColliderHeader, ColliderInfo, ColliderType, ItemType};
use crate::collision::CollisionEvent;
use crate::constants::{
    CONTACT_VEL, LOW_NORM_VEL, PHYS_TOUCH, TOLERANCE_END_POINTS, TOLERANCE_RADIUS,
};
use crate::math::{Real, Vector};
use na::{Point2, Vector2};

/// A wall segment standing upright on the playfield.
///
/// The geometry lives in the playfield plane: a segment from `v1` to `v2`
/// extruded from `z_low` to `z_high`. The face normal is the segment
/// direction rotated so that walls wound counterclockwise around the playable
/// area face inward.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// First endpoint on the playfield plane.
    pub v1: Point2<Real>,
    /// Second endpoint on the playfield plane.
    pub v2: Point2<Real>,
    /// Bottom of the extruded wall.
    pub z_low: Real,
    /// Top of the extruded wall.
    pub z_high: Real,
    normal: Vector2<Real>,
    length: Real,
}

impl LineCollider {
    /// Builds a wall segment collider.
    pub fn new(
        info: ColliderInfo,
        v1: Point2<Real>,
        v2: Point2<Real>,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        let vt = v1 - v2;
        let length = vt.norm();
        let normal = if length > 1.0e-12 {
            Vector2::new(vt.y, -vt.x) / length
        } else {
            log::warn!("zero-length wall segment for item {:?}", info.item);
            Vector2::y()
        };

        LineCollider {
            header: ColliderHeader::new(ColliderType::Line, &info),
            v1,
            v2,
            z_low,
            z_high,
            normal,
            length,
        }
    }

    /// The unit face normal in the playfield plane.
    pub fn normal(&self) -> Vector2<Real> {
        self.normal
    }

    /// The segment length.
    pub fn length(&self) -> Real {
        self.length
    }

    /// Sweeps a ball against the wall face.
    pub fn hit_test(&self, ball: &BallData, d_time: Real) -> Option<CollisionEvent> {
        // triggers sense the ball center, wires sit half a ball off, walls are rigid
        let (direction, lateral, rigid) = match self.header.item_type {
            ItemType::Trigger => (false, false, false),
            ItemType::Spinner | ItemType::Gate => (false, true, false),
            _ => (true, true, true),
        };

        self.hit_test_basic(ball, d_time, direction, lateral, rigid)
    }

    /// The shared swept test, parameterized the way flipper faces also need it.
    pub(crate) fn hit_test_basic(
        &self,
        ball: &BallData,
        d_time: Real,
        direction: bool,
        lateral: bool,
        rigid: bool,
    ) -> Option<CollisionEvent> {
        let ball_vx = ball.velocity.x;
        let ball_vy = ball.velocity.y;

        // normal velocity, positive when receding
        let bnv = ball_vx * self.normal.x + ball_vy * self.normal.y;
        let mut is_un_hit = bnv > LOW_NORM_VEL;

        if direction && bnv > LOW_NORM_VEL {
            // clearly receding from the face
            return None;
        }

        let ball_x = ball.position.x;
        let ball_y = ball.position.y;

        // ball center to face distance
        let rolling_radius = if lateral { ball.radius } else { TOLERANCE_RADIUS };
        let bcpd = (ball_x - self.v1.x) * self.normal.x + (ball_y - self.v1.y) * self.normal.y;
        let mut bnd = bcpd - rolling_radius;

        if matches!(
            self.header.item_type,
            ItemType::Spinner | ItemType::Gate
        ) {
            // sense the far side of the wire so a resting ball does not sink halfway in
            bnd = bcpd + rolling_radius;
        }

        let inside = bnd <= 0.0;

        let hit_time;
        if rigid {
            if bnd < -ball.radius || lateral && bcpd < 0.0 {
                // excessive penetration of the wall skin, no collision
                return None;
            }

            if lateral && bnd <= PHYS_TOUCH {
                if inside || bnv.abs() > CONTACT_VEL || bnd <= -PHYS_TOUCH {
                    // embedded or fast: collide right now
                    hit_time = 0.0;
                } else {
                    // touching but slow; midpoint bias keeps this from competing
                    // with genuine zero-time impacts elsewhere
                    hit_time = bnd * (1.0 / (2.0 * PHYS_TOUCH)) + 0.5;
                }
            } else if bnv.abs() > LOW_NORM_VEL {
                hit_time = bnd / -bnv;
            } else {
                // far away and too slow, wait for touching
                return None;
            }
        } else {
            // permeable: we are looking for the boundary crossing, not a bounce
            if bnv * bnd >= 0.0 {
                // outside and receding, or inside and sinking deeper: only a
                // missed transition on a trigger still needs fixing up
                if self.header.item_type != ItemType::Trigger
                    || bnd.abs() >= ball.radius * 0.5
                    || inside == ball.inside_ofs.is_inside_of(self.header.item)
                {
                    return None;
                }

                hit_time = 0.0;
                is_un_hit = !inside;
            } else {
                hit_time = bnd / -bnv;
            }
        }

        if !hit_time.is_finite() || hit_time < 0.0 || hit_time > d_time {
            return None;
        }

        // tangent extent at hit time must fall within the segment
        let btv = ball_vx * self.normal.y - ball_vy * self.normal.x;
        let btd = (ball_x - self.v1.x) * self.normal.y - (ball_y - self.v1.y) * self.normal.x
            + btv * hit_time;

        if btd < -TOLERANCE_END_POINTS || btd > self.length + TOLERANCE_END_POINTS {
            return None;
        }

        // rolling point must be within the wall's vertical span
        let hit_z = ball.position.z + ball.velocity.z * hit_time;
        if hit_z + ball.radius * 0.5 < self.z_low || hit_z - ball.radius * 0.5 > self.z_high {
            return None;
        }

        let mut coll = CollisionEvent::new(
            hit_time,
            Vector::new(self.normal.x, self.normal.y, 0.0),
            bnd,
        );

        if !rigid {
            // receding from outside reads as leaving the volume
            coll.hit_flag = is_un_hit;
        }

        if bnv.abs() <= CONTACT_VEL && bnd.abs() <= PHYS_TOUCH {
            coll.is_contact = true;
            coll.org_normal_velocity = bnv;
        }

        Some(coll)
    }
}
