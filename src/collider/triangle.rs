//! Definition of the triangle collider.

use crate::ball::BallData;
use crate::collider::{ColliderHeader, ColliderInfo, ColliderType, ItemType};
use crate::collision::CollisionEvent;
use crate::constants::{CONTACT_VEL, LOW_NORM_VEL, PHYS_TOUCH};
use crate::math::{Point, Real, Vector};

/// One triangle of a static mesh, with a precomputed outward normal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// First vertex.
    pub a: Point<Real>,
    /// Second vertex.
    pub b: Point<Real>,
    /// Third vertex.
    pub c: Point<Real>,
    normal: Vector<Real>,
}

impl TriangleCollider {
    /// Builds a triangle collider from its vertices.
    ///
    /// The vertices must wind so that `(b - a) × (c - a)` points out of the
    /// surface. A degenerate triangle gets a `+z` normal and a warning; its
    /// containment test never passes, so it stays inert.
    pub fn new(info: ColliderInfo, a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Self {
        let normal = (b - a).cross(&(c - a));
        let normal = match na::Unit::try_new(normal, 1.0e-12) {
            Some(unit) => unit.into_inner(),
            None => {
                log::warn!("degenerate triangle for item {:?}, using +z normal", info.item);
                Vector::z()
            }
        };

        TriangleCollider {
            header: ColliderHeader::new(ColliderType::Triangle, &info),
            a,
            b,
            c,
            normal,
        }
    }

    /// The unit normal of the triangle face.
    pub fn normal(&self) -> Vector<Real> {
        self.normal
    }

    /// Sweeps a ball against the triangle face.
    pub fn hit_test(&self, ball: &BallData, d_time: Real) -> Option<CollisionEvent> {
        let bnv = self.normal.dot(&ball.velocity);
        if bnv > CONTACT_VEL {
            // clearly receding from the face
            return None;
        }

        // point on the ball surface that will touch the face first
        let hit_pos = ball.position - self.normal * ball.radius;
        let bnd = self.normal.dot(&(hit_pos - self.a));

        if bnd < -ball.radius {
            // the ball is far past the face, embedded in whatever is behind it
            return None;
        }

        let mut is_contact = false;
        let hit_time;

        if bnd <= PHYS_TOUCH {
            if bnv.abs() <= CONTACT_VEL {
                hit_time = 0.0;
                is_contact = true;
            } else if bnd <= 0.0 {
                // slightly embedded, collide immediately
                hit_time = 0.0;
            } else {
                // inside the touch envelope but still moving: time to actual contact
                hit_time = bnd / -bnv;
            }
        } else if bnv.abs() > LOW_NORM_VEL {
            hit_time = bnd / -bnv;
        } else {
            // too far away and approaching too slowly
            return None;
        }

        if !hit_time.is_finite() || hit_time < 0.0 || hit_time > d_time {
            return None;
        }

        // advance to the plane crossing, then check triangle containment
        let hit_pos = hit_pos + ball.velocity * hit_time;

        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = hit_pos - self.a;

        let dot00 = v0.dot(&v0);
        let dot01 = v0.dot(&v1);
        let dot02 = v0.dot(&v2);
        let dot11 = v1.dot(&v1);
        let dot12 = v1.dot(&v2);

        let inv_denom = 1.0 / (dot00 * dot11 - dot01 * dot01);
        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        if !(u >= 0.0 && v >= 0.0 && u + v <= 1.0) {
            // crossed the plane outside the triangle; NaN weights from a
            // degenerate face land here as well
            return None;
        }

        let mut coll = CollisionEvent::new(hit_time, self.normal, bnd);

        if self.header.item_type == ItemType::Trigger
            && (bnd < 0.0) == ball.inside_ofs.is_outside_of(self.header.item)
        {
            // a crossing this tick; record which side the ball ends up on
            coll.hit_flag = bnd > 0.0;
        }

        if is_contact {
            coll.is_contact = true;
            coll.org_normal_velocity = bnv;
        }

        Some(coll)
    }
}
