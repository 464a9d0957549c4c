//! Surface response parameters attached to every collider.

use crate::math::Real;

/// How a surface responds to a ball striking it.
///
/// The same material block is embedded verbatim in every collider header so
/// the resolver never chases a lookup during a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicsMaterial {
    /// Coefficient of restitution at low impact speed.
    pub elasticity: Real,
    /// How quickly the restitution decays as impact speed grows. Zero disables the decay.
    pub elasticity_falloff: Real,
    /// Coulomb friction coefficient for the tangential response.
    pub friction: Real,
    /// Half-width of the random deflection cone, in radians. Negative requests the global default.
    pub scatter_angle: Real,
}

impl PhysicsMaterial {
    /// A material with the given restitution/falloff/friction/scatter parameters.
    pub const fn new(
        elasticity: Real,
        elasticity_falloff: Real,
        friction: Real,
        scatter_angle: Real,
    ) -> Self {
        PhysicsMaterial {
            elasticity,
            elasticity_falloff,
            friction,
            scatter_angle,
        }
    }

    /// Effective restitution for an impact at the given normal speed.
    ///
    /// 18.53 table units per tick is roughly one meter per second, so the
    /// falloff parameter is calibrated against real-world impact speeds.
    pub fn elasticity_with_falloff(&self, normal_speed: Real) -> Real {
        if self.elasticity_falloff > 0.0 {
            self.elasticity
                / (1.0 + self.elasticity_falloff * normal_speed.abs() * (1.0 / 18.53))
        } else {
            self.elasticity
        }
    }
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        PhysicsMaterial::new(0.3, 0.0, 0.3, 0.0)
    }
}
