//! Definition of the infinite plane collider, mostly the playfield and its glass.

use crate::ball::BallData;
use crate::collider::{ColliderHeader, ColliderInfo, ColliderType};
use crate::collision::{collide_3d_wall, CollisionEvent};
use crate::constants::{CONTACT_VEL, PHYS_TOUCH};
use crate::math::{Real, UnitVector};
use rand::Rng;

/// An infinite plane `normal · p = distance`, with `normal` pointing into play.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// Unit normal pointing toward the playable volume.
    pub normal: UnitVector<Real>,
    /// Plane offset along the normal.
    pub distance: Real,
}

impl PlaneCollider {
    /// Builds a plane collider.
    pub fn new(info: ColliderInfo, normal: UnitVector<Real>, distance: Real) -> Self {
        PlaneCollider {
            header: ColliderHeader::new(ColliderType::Plane, &info),
            normal,
            distance,
        }
    }

    /// Sweeps a ball against the plane.
    pub fn hit_test(&self, ball: &BallData, d_time: Real) -> Option<CollisionEvent> {
        let bnv = self.normal.dot(&ball.velocity);
        if bnv > CONTACT_VEL {
            // clearly receding from the plane
            return None;
        }

        let bnd = self.normal.dot(&ball.position.coords) - ball.radius - self.distance;
        if bnd < ball.radius * -2.0 {
            // excessive penetration: something else went wrong, do not fight it here
            return None;
        }

        if bnv.abs() <= CONTACT_VEL {
            if bnd.abs() <= PHYS_TOUCH {
                let mut coll = CollisionEvent::new(0.0, self.normal.into_inner(), bnd);
                coll.is_contact = true;
                coll.org_normal_velocity = bnv;
                return Some(coll);
            }

            // lying near the plane but not moving toward it
            return None;
        }

        let mut hit_time = bnd / -bnv;
        if hit_time < 0.0 {
            // already penetrating, collide immediately
            hit_time = 0.0;
        }

        if !hit_time.is_finite() || hit_time > d_time {
            return None;
        }

        // hit distance doubles as the penetration the resolver will undo
        Some(CollisionEvent::new(
            hit_time,
            self.normal.into_inner(),
            bnv * hit_time,
        ))
    }

    /// Wall response plus a hard push-out should the ball end up below the plane.
    pub(crate) fn collide<R: Rng + ?Sized>(
        &self,
        ball: &mut BallData,
        coll: &CollisionEvent,
        rng: &mut R,
    ) {
        collide_3d_wall(ball, &self.header.material, coll, &coll.normal, rng);

        let bnd = self.normal.dot(&ball.position.coords) - ball.radius - self.distance;
        if bnd < 0.0 {
            // the ball fell through; lift it back onto the surface
            ball.position -= self.normal.into_inner() * bnd;
        }
    }
}
