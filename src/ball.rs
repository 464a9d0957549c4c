//! Ball kinematic state and the arena that owns every ball in play.

use crate::collider::ItemId;
use crate::math::{Point, Real, Vector};
use slab::Slab;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Handle of a ball inside a [`BallSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BallHandle(pub usize);

impl BallHandle {
    /// The underlying index of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The set of permeable colliders a ball currently sits inside of.
///
/// Triggers and kicker pockets do not deflect the ball; instead the crossing
/// of their boundary is tracked here so enter/exit events fire exactly once
/// per transition.
#[derive(Clone, Debug, Default)]
pub struct InsideOfs(SmallVec<[ItemId; 4]>);

impl InsideOfs {
    /// Is the ball currently registered inside the given item?
    pub fn is_inside_of(&self, item: ItemId) -> bool {
        self.0.contains(&item)
    }

    /// Is the ball currently registered outside of the given item?
    pub fn is_outside_of(&self, item: ItemId) -> bool {
        !self.is_inside_of(item)
    }

    /// Registers the ball as inside the given item.
    pub fn set_inside_of(&mut self, item: ItemId) {
        if !self.0.contains(&item) {
            self.0.push(item);
        }
    }

    /// Registers the ball as outside of the given item.
    pub fn set_outside_of(&mut self, item: ItemId) {
        self.0.retain(|candidate| *candidate != item);
    }
}

/// Kinematic state of one ball.
///
/// The core never integrates free flight; the host moves balls between ticks
/// and this state is only mutated by collision resolution.
#[derive(Clone, Debug)]
pub struct BallData {
    /// Center of the ball.
    pub position: Point<Real>,
    /// Linear velocity, in table units per tick.
    pub velocity: Vector<Real>,
    /// Ball radius.
    pub radius: Real,
    /// Ball mass.
    pub mass: Real,
    /// Angular momentum about the ball center.
    pub angular_momentum: Vector<Real>,
    /// Where the last hit event fired, for duplicate suppression.
    pub event_position: Point<Real>,
    /// Permeable colliders this ball currently sits inside of.
    pub inside_ofs: InsideOfs,
}

impl BallData {
    /// A ball of unit mass with no spin.
    pub fn new(position: Point<Real>, velocity: Vector<Real>, radius: Real) -> Self {
        BallData {
            position,
            velocity,
            radius,
            mass: 1.0,
            angular_momentum: Vector::zeros(),
            event_position: position,
            inside_ofs: InsideOfs::default(),
        }
    }

    /// Moment of inertia of the solid sphere.
    pub fn inertia(&self) -> Real {
        2.0 / 5.0 * self.radius * self.radius * self.mass
    }

    /// Inverse of the ball mass.
    pub fn inv_mass(&self) -> Real {
        1.0 / self.mass
    }

    /// Angular velocity about the ball center.
    pub fn angular_velocity(&self) -> Vector<Real> {
        self.angular_momentum / self.inertia()
    }

    /// Velocity of the surface point at `surf_p` relative to the ball center.
    pub fn surface_velocity(&self, surf_p: Vector<Real>) -> Vector<Real> {
        self.velocity + self.angular_velocity().cross(&surf_p)
    }

    /// Applies an impulse at a surface point together with its rotational part.
    pub fn apply_surface_impulse(&mut self, rot_i: Vector<Real>, impulse: Vector<Real>) {
        self.velocity += impulse * self.inv_mass();
        self.angular_momentum += rot_i;
    }
}

/// Arena owning every ball in play.
#[derive(Clone, Debug, Default)]
pub struct BallSet {
    balls: Slab<BallData>,
}

impl BallSet {
    /// An empty ball set.
    pub fn new() -> Self {
        BallSet { balls: Slab::new() }
    }

    /// Spawns a ball, returning its handle.
    pub fn insert(&mut self, ball: BallData) -> BallHandle {
        BallHandle(self.balls.insert(ball))
    }

    /// Removes a ball that left the table.
    pub fn remove(&mut self, handle: BallHandle) -> Option<BallData> {
        self.balls.try_remove(handle.0)
    }

    /// The ball attached to the given handle, if any.
    pub fn get(&self, handle: BallHandle) -> Option<&BallData> {
        self.balls.get(handle.0)
    }

    /// Mutable access to the ball attached to the given handle, if any.
    pub fn get_mut(&mut self, handle: BallHandle) -> Option<&mut BallData> {
        self.balls.get_mut(handle.0)
    }

    /// Number of balls in play.
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    /// Is the table empty of balls?
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Iterates over all balls, yielding handles and references.
    pub fn iter(&self) -> impl Iterator<Item = (BallHandle, &BallData)> {
        self.balls.iter().map(|(i, ball)| (BallHandle(i), ball))
    }

    /// Iterates over all balls, yielding handles and mutable references.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BallHandle, &mut BallData)> {
        self.balls.iter_mut().map(|(i, ball)| (BallHandle(i), ball))
    }
}

impl Index<BallHandle> for BallSet {
    type Output = BallData;

    fn index(&self, handle: BallHandle) -> &BallData {
        &self.balls[handle.0]
    }
}

impl IndexMut<BallHandle> for BallSet {
    fn index_mut(&mut self, handle: BallHandle) -> &mut BallData {
        &mut self.balls[handle.0]
    }
}
