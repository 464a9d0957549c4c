//! Selection of the colliders a ball could reach within one tick.

use crate::ball::BallData;
use crate::collider::{ColliderHandle, ColliderSet};
use crate::math::Real;

/// Source of candidate colliders for the narrowphase.
///
/// Spatial partitioning is the host's business: a table knows its own
/// geometry and usually keeps a per-region index of the static colliders.
/// Candidate queries run concurrently for every ball in play, hence the
/// `Send + Sync` bound.
pub trait BroadPhase: Send + Sync {
    /// Appends to `out` every collider `ball` might reach within `d_time`.
    ///
    /// Over-approximating is harmless since the narrowphase rejects misses.
    /// Omitting a genuine candidate lets the ball tunnel through it.
    fn candidates(
        &self,
        ball: &BallData,
        d_time: Real,
        colliders: &ColliderSet,
        out: &mut Vec<ColliderHandle>,
    );
}

/// Broad-phase that nominates every collider for every ball.
///
/// Adequate for tests and small tables.
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForceBroadPhase;

impl BroadPhase for BruteForceBroadPhase {
    fn candidates(
        &self,
        _ball: &BallData,
        _d_time: Real,
        colliders: &ColliderSet,
        out: &mut Vec<ColliderHandle>,
    ) {
        out.extend(colliders.iter().map(|(handle, _)| handle));
    }
}
