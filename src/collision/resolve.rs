//! The 3D wall response: restitution, Coulomb friction and scatter.

use crate::ball::BallData;
use crate::collision::CollisionEvent;
use crate::constants::{DISP_GAIN, DISP_LIMIT, EMBEDDED, EMBED_SHOT, HARD_SCATTER, LOW_NORM_VEL};
use crate::material::PhysicsMaterial;
use crate::math::{Real, Vector};
use rand::Rng;

/// Reflects a ball off a fixed surface.
///
/// This is the response every solid collider funnels into once the
/// narrowphase has produced a [`CollisionEvent`]: positional correction for
/// embedded balls, a restitution impulse along `hit_normal`, a friction
/// impulse within the Coulomb cone, and an optional random scatter of the
/// outgoing direction in the playfield plane.
pub fn collide_3d_wall<R: Rng + ?Sized>(
    ball: &mut BallData,
    material: &PhysicsMaterial,
    coll: &CollisionEvent,
    hit_normal: &Vector<Real>,
    rng: &mut R,
) {
    // speed normal to the wall
    let mut dot = ball.velocity.dot(hit_normal);

    if dot >= -LOW_NORM_VEL {
        if dot > LOW_NORM_VEL {
            // clearly receding
            return;
        }

        if coll.distance < -EMBEDDED {
            // ball has become embedded in the wall, give it a kick
            dot = -EMBED_SHOT;
        } else {
            return;
        }
    }

    // correct displacements, mostly from low velocity, as an alternative to
    // true acceleration processing
    let mut h_dist = -DISP_GAIN * coll.distance;
    if h_dist > 1.0e-4 {
        if h_dist > DISP_LIMIT {
            // crossing ramps, delta noise
            h_dist = DISP_LIMIT;
        }

        // push the ball along the normal, back into free space
        ball.position += *hit_normal * h_dist;
    }

    // the impulse just sufficient to keep the ball from penetrating,
    // needed to bound the friction impulse below
    let reaction_impulse = ball.mass * dot.abs();

    let elasticity = material.elasticity_with_falloff(dot);
    dot *= -(1.0 + elasticity);
    // the restitution impulse acts along the normal, so no torque from it
    ball.velocity += *hit_normal * dot;

    // friction
    let surf_p = -ball.radius * *hit_normal;
    let surf_vel = ball.surface_velocity(surf_p);
    let tangent = surf_vel - *hit_normal * surf_vel.dot(hit_normal);

    let tangent_sp_sq = tangent.norm_squared();
    if tangent_sp_sq > 1.0e-6 {
        let tangent = tangent / tangent_sp_sq.sqrt();
        let vt = surf_vel.dot(&tangent);

        let cross = surf_p.cross(&tangent);
        let cross_inertia = cross / ball.inertia();
        let kt = ball.inv_mass() + tangent.dot(&cross_inertia.cross(&surf_p));

        // the friction impulse stays within the Coulomb cone
        let max_friction = material.friction * reaction_impulse;
        let jt = (-vt / kt).clamp(-max_friction, max_friction);

        if jt.is_finite() {
            ball.apply_surface_impulse(jt * cross, jt * tangent);
        }
    }

    let mut scatter_angle = material.scatter_angle;
    if scatter_angle < 0.0 {
        scatter_angle = HARD_SCATTER;
    }

    if dot > 1.0 && scatter_angle > 1.0e-5 {
        // no scatter at low velocity
        let scatter: Real = rng.gen_range(-1.0..1.0);
        // quadratic distribution favoring small deflections
        let scatter = scatter * (1.0 - scatter * scatter) * 2.59808 * scatter_angle;
        let rad_sin = scatter.sin();
        let rad_cos = scatter.cos();
        let vxt = ball.velocity.x;
        let vyt = ball.velocity.y;
        ball.velocity.x = vxt * rad_cos - vyt * rad_sin;
        ball.velocity.y = vyt * rad_cos + vxt * rad_sin;
    }
}
