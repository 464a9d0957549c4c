//! Definition of the flipper arm collider.

use crate::ball::{BallData, BallHandle};
use crate::collider::{
    CircleCollider, ColliderHeader, ColliderInfo, ColliderType, LineCollider,
};
use crate::collision::CollisionEvent;
use crate::constants::{DISP_GAIN, DISP_LIMIT, EMBEDDED, EMBED_SHOT, LOW_NORM_VEL};
use crate::dynamics::{FlipperHandle, FlipperSet};
use crate::events::EventSender;
use crate::math::{Point, Real, Vector};
use na::{Point2, Vector2};

/// The swept shape of a flipper arm: two faces tangent to the base and tip
/// circles, closed by those circles as end caps.
///
/// The collider itself stores only the rotation center; the arm's pose is
/// read from the owning [`Flipper`](crate::dynamics::Flipper) at query time,
/// so the same collider keeps working as the arm sweeps. Within one tick the
/// arm is treated as frozen at its current angle; the response still uses the
/// surface velocity of the rotating arm, which is what throws the ball.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipperCollider {
    /// The shared collider header.
    pub header: ColliderHeader,
    /// The flipper whose pose this collider follows.
    pub flipper: FlipperHandle,
    /// Rotation center on the playfield plane.
    pub base: Point2<Real>,
    /// Bottom of the arm.
    pub z_low: Real,
    /// Top of the arm.
    pub z_high: Real,
}

impl FlipperCollider {
    /// Builds a flipper arm collider around the rotation center `base`.
    pub fn new(
        info: ColliderInfo,
        flipper: FlipperHandle,
        base: Point2<Real>,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        FlipperCollider {
            header: ColliderHeader::new(ColliderType::Flipper, &info),
            flipper,
            base,
            z_low,
            z_high,
        }
    }

    /// Sweeps a ball against the arm frozen at its current angle.
    ///
    /// The earliest hit among the two faces and the two end caps wins.
    pub fn hit_test(
        &self,
        ball: &BallData,
        flippers: &FlipperSet,
        d_time: Real,
    ) -> Option<CollisionEvent> {
        let flipper = flippers.get(self.flipper)?;
        let statics = &flipper.statics;
        let angle = flipper.state.angle;

        // arm pose at the current angle
        let dir = Vector2::new(angle.sin(), -angle.cos());
        let perp = Vector2::new(-dir.y, dir.x);
        let end = self.base + dir * statics.flipper_radius;

        // the faces lean toward the tip because the base circle is wider
        let face_angle =
            ((statics.base_radius - statics.end_radius) / statics.flipper_radius).asin();
        let (sin_f, cos_f) = face_angle.sin_cos();

        let info = self.header.info();
        let mut best: Option<CollisionEvent> = None;

        for side in [1.0, -1.0] {
            let normal = perp * (cos_f * side) + dir * sin_f;
            let face_base = self.base + normal * statics.base_radius;
            let face_end = end + normal * statics.end_radius;

            // endpoint order picks the outward normal of the face
            let (v1, v2) = if side > 0.0 {
                (face_base, face_end)
            } else {
                (face_end, face_base)
            };

            let face = LineCollider::new(info, v1, v2, self.z_low, self.z_high);
            if let Some(coll) = face.hit_test_basic(ball, d_time, true, true, true) {
                if best
                    .as_ref()
                    .map_or(true, |b| coll.time_of_impact < b.time_of_impact)
                {
                    best = Some(coll);
                }
            }
        }

        for (center, radius) in [
            (self.base, statics.base_radius),
            (end, statics.end_radius),
        ] {
            let cap = CircleCollider::new(info, center, radius, self.z_low, self.z_high);
            if let Some(coll) = cap.hit_test_basic_radius(ball, d_time, true, true, true) {
                if best
                    .as_ref()
                    .map_or(true, |b| coll.time_of_impact < b.time_of_impact)
                {
                    best = Some(coll);
                }
            }
        }

        best
    }

    /// Resolves a ball impact against the arm.
    ///
    /// The ball bounces off the relative surface velocity of the rotating arm
    /// and the reaction enters the arm's net torque for its next integration.
    pub(crate) fn collide(
        &self,
        ball: &mut BallData,
        ball_handle: BallHandle,
        coll: &CollisionEvent,
        flippers: &mut FlipperSet,
        events: &EventSender,
        d_time: Real,
    ) {
        let flipper = match flippers.get_mut(self.flipper) {
            Some(flipper) => flipper,
            None => return,
        };
        let statics = &flipper.statics;
        let state = &mut flipper.state;

        let normal = coll.normal;
        let r_b = -normal * ball.radius;
        let hit_pos = ball.position + r_b;

        // bring the rotation center into the ball's z plane
        let c_f = Point::new(self.base.x, self.base.y, ball.position.z);
        let r_f = hit_pos - c_f;

        let v_b = ball.surface_velocity(r_b);
        let v_f = Vector::new(0.0, 0.0, state.angle_speed).cross(&r_f);
        let v_rel = v_b - v_f;
        let mut bnv = normal.dot(&v_rel);

        if bnv >= -LOW_NORM_VEL {
            if bnv > LOW_NORM_VEL {
                // clearly receding
                return;
            }
            if coll.distance < -EMBEDDED {
                // embedded in the arm, give it a kick
                bnv = -EMBED_SHOT;
            } else {
                return;
            }
        }

        // positional correction, mostly against low velocity blindness
        let mut h_dist = -DISP_GAIN * coll.distance;
        if h_dist > 1.0e-4 {
            if h_dist > DISP_LIMIT {
                h_dist = DISP_LIMIT;
            }
            ball.position += normal * h_dist;
        }

        // angular response of the arm to an impulse along the contact normal
        let ang_resp_z = r_f.cross(&normal).z;

        // An impulse pressing the arm against a stop it already rests on
        // vanishes into the stop; the arm then reacts with the mass of the
        // whole table behind it.
        let mut ang_imp = -ang_resp_z;
        let mut response_scaling = 1.0;
        if state.is_in_contact && state.contact_torque * ang_imp >= 0.0 {
            ang_imp = 0.0;
            response_scaling = 0.2;
        }

        let epsilon = self.header.material.elasticity_with_falloff(bnv);
        let mut impulse =
            -(1.0 + epsilon) * bnv / (ball.inv_mass() + ang_imp * ang_imp / statics.inertia);
        let mut rot_i_z = -impulse * response_scaling * ang_resp_z;

        if state.is_in_contact && rot_i_z * state.contact_torque < 0.0 {
            // time the stop needs to absorb this much angular impulse
            let recoil_time = -rot_i_z / state.contact_torque;

            // A ball rebounding off a parked arm must reflect off static
            // metal, otherwise the bounce comes out dead.
            let bnv_after = bnv + impulse * ball.inv_mass();
            if recoil_time <= 0.5 || bnv_after > 0.0 {
                impulse = -(1.0 + epsilon) * bnv * ball.mass;
                rot_i_z = 0.0;
            }
        }

        ball.velocity += normal * (impulse * ball.inv_mass());
        state.impact_torque += rot_i_z / d_time;

        // friction against the combined ball and arm surface motion
        let tangent = v_rel - normal * bnv;
        let tangent_sq = tangent.norm_squared();
        if tangent_sq > 1.0e-6 {
            let tangent = tangent / tangent_sq.sqrt();
            let pv1 = r_b.cross(&tangent);
            let pv2 = r_f.cross(&tangent);

            // effective mass along the tangent, ball and arm combined
            let kt = ball.inv_mass()
                + tangent.dot(&(pv1 / ball.inertia()).cross(&r_b))
                + tangent.dot(&(pv2 / statics.inertia).cross(&r_f));

            // Coulomb friction cone
            let max_friction = self.header.material.friction * impulse;
            let jt = (-v_rel.dot(&tangent) / kt).clamp(-max_friction, max_friction);

            if jt.is_finite() {
                ball.apply_surface_impulse(pv1 * jt, tangent * jt);
                state.impact_torque += jt * pv2.z / d_time;
            }
        }

        if self.header.should_fire_hit(-bnv) {
            self.header.fire_hit_event(ball, ball_handle, events, -bnv);
        }
    }
}
