//! Definition of the per-hit collision record.

use crate::math::{Real, Vector};

/// Everything the narrowphase learned about one impending ball/collider hit.
///
/// Produced by [`Collider::hit_test`](crate::collider::Collider::hit_test)
/// and consumed unchanged by resolution later in the same tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionEvent {
    /// When within the tick the contact happens, in `[0, d_time]`.
    pub time_of_impact: Real,
    /// Surface normal at the contact point, pointing away from the collider.
    pub normal: Vector<Real>,
    /// Signed distance from ball surface to collider surface when the test ran.
    pub distance: Real,
    /// True when this is a resting contact rather than an impact.
    pub is_contact: bool,
    /// Normal velocity recorded at classification time, for resting contacts.
    pub org_normal_velocity: Real,
    /// For permeable colliders: set when the crossing points out of the volume.
    pub hit_flag: bool,
}

impl CollisionEvent {
    /// An impact record with no contact/permeable flags set.
    pub fn new(time_of_impact: Real, normal: Vector<Real>, distance: Real) -> Self {
        CollisionEvent {
            time_of_impact,
            normal,
            distance,
            is_contact: false,
            org_normal_velocity: 0.0,
            hit_flag: false,
        }
    }
}
