//! Numerical thresholds shared by the narrowphase and the collision response.
//!
//! All lengths are in table units, all times in tick units. The values are
//! long-standing pinball simulation tuning constants; changing any of them
//! changes gameplay.

use crate::math::Real;

/// Normal velocities below this are treated as no approach at all.
pub const LOW_NORM_VEL: Real = 0.0001;

/// Normal velocities below this magnitude classify a hit as a resting contact.
pub const CONTACT_VEL: Real = 0.099;

/// Distance envelope within which a surface counts as touching the ball.
pub const PHYS_TOUCH: Real = 0.05;

/// Penetration depth beyond which a receding ball still gets a corrective kick.
pub const EMBEDDED: Real = 0.0;

/// Normal speed of the corrective kick applied to an embedded ball.
pub const EMBED_SHOT: Real = 0.05;

/// Fraction of the penetration depth undone by positional correction.
pub const DISP_GAIN: Real = 0.9875;

/// Upper bound on a single positional correction step.
pub const DISP_LIMIT: Real = 5.0;

/// Scatter angle applied when a material requests scatter but carries none.
pub const HARD_SCATTER: Real = 0.0;

/// Time a ball is nudged forward when it crosses a permeable boundary.
pub const STATIC_TIME: Real = 0.005;

/// Slack granted beyond a line segment's endpoints during the tangent check.
pub const TOLERANCE_END_POINTS: Real = 0.0;

/// Rolling-point radius used by non-lateral line tests.
pub const TOLERANCE_RADIUS: Real = 0.005;

/// Minimum separation enforced between a flipper's start and end angles (radians).
pub const MIN_ANGLE_SEPARATION: Real = 0.0001;

/// Angular speeds below this suppress flipper end-of-travel events (radians/tick).
pub const ANGLE_SPEED_DEAD_BAND: Real = 0.0005;

/// How close to an angular stop a slow flipper arm must be to latch onto it (radians).
pub const END_STOP_SLACK: Real = 0.01;
