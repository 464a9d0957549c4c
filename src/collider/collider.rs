//! The collider header shared by every variant, and the enum tying them together.

use crate::ball::{BallData, BallHandle};
use crate::collider::{
    CircleCollider, FlipperCollider, LineCollider, PlaneCollider, PointCollider, TriangleCollider,
};
use crate::collision::{collide_3d_wall, CollisionEvent};
use crate::constants::STATIC_TIME;
use crate::dynamics::{FlipperHandle, FlipperSet};
use crate::events::{Event, EventSender};
use crate::material::PhysicsMaterial;
use crate::math::{Point, Real, UnitVector};
use na::Point2;
use rand::Rng;

/// Identifier of the table item owning a collider.
///
/// One item usually owns many colliders (a wall is a fan of lines, a mesh a
/// fan of triangles); events and inside-of membership are tracked per item,
/// not per collider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemId(pub u32);

/// The kind of table item owning a collider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemType {
    /// A mesh primitive; the only kind that raises plain hit events.
    Primitive,
    /// A wall or ramp surface.
    Surface,
    /// A permeable sensor tracked through inside-of membership.
    Trigger,
    /// A ball-capturing pocket, permeable like a trigger.
    Kicker,
    /// A one-way gate wire the ball passes through.
    Gate,
    /// A spinner wire the ball passes through.
    Spinner,
    /// A stand-up or drop target.
    HitTarget,
    /// A flipper arm.
    Flipper,
    /// The playfield itself.
    Playfield,
}

/// Type tag mirroring the concrete [`Collider`] variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColliderType {
    /// A swept point.
    Point,
    /// An infinite plane.
    Plane,
    /// A vertical wall segment.
    Line,
    /// A vertical cylinder.
    Circle,
    /// A mesh triangle.
    Triangle,
    /// A flipper arm.
    Flipper,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
/// Behavior switches shared by every collider.
pub struct ColliderFlags(u8);

bitflags::bitflags! {
    impl ColliderFlags: u8 {
        /// Hits on this collider may raise events for the host.
        const FIRE_EVENTS = 1 << 0;
        /// The owning item is a primitive.
        const IS_PRIMITIVE = 1 << 1;
    }
}

/// Everything a collider carries regardless of its shape.
///
/// Each collider embeds one header so the hot loop never follows a pointer
/// to learn who owns the surface it is about to bounce a ball off.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColliderHeader {
    /// Tag matching the concrete variant holding this header.
    pub collider_type: ColliderType,
    /// The owning table item.
    pub item: ItemId,
    /// The kind of the owning table item.
    pub item_type: ItemType,
    /// Surface response parameters.
    pub material: PhysicsMaterial,
    /// Minimum impact speed for a hit to raise an event.
    pub threshold: Real,
    /// Behavior switches.
    pub flags: ColliderFlags,
}

impl ColliderHeader {
    pub(crate) fn new(collider_type: ColliderType, info: &ColliderInfo) -> Self {
        let mut flags = ColliderFlags::empty();
        if info.fire_events {
            flags |= ColliderFlags::FIRE_EVENTS;
        }
        if info.item_type == ItemType::Primitive {
            flags |= ColliderFlags::IS_PRIMITIVE;
        }

        ColliderHeader {
            collider_type,
            item: info.item,
            item_type: info.item_type,
            material: info.material,
            threshold: info.threshold,
            flags,
        }
    }

    /// May hits on this collider raise events at all?
    pub fn fire_events(&self) -> bool {
        self.flags.contains(ColliderFlags::FIRE_EVENTS)
    }

    // Rebuilds the info this header was constructed from, for colliders that
    // spawn ephemeral sub-shapes.
    pub(crate) fn info(&self) -> ColliderInfo {
        ColliderInfo {
            item: self.item,
            item_type: self.item_type,
            material: self.material,
            threshold: self.threshold,
            fire_events: self.fire_events(),
        }
    }

    /// Should an impact at this pre-impact normal speed raise a hit event?
    pub fn should_fire_hit(&self, normal_speed: Real) -> bool {
        self.fire_events()
            && self.flags.contains(ColliderFlags::IS_PRIMITIVE)
            && normal_speed >= self.threshold
    }

    /// Raises a hit event unless the ball is rattling in place.
    ///
    /// Successive hits closer than half a ball-ish distance from the last
    /// reported one are dropped, except on hit targets where a captured ball
    /// legitimately hammers the same spot.
    pub(crate) fn fire_hit_event(
        &self,
        ball: &mut BallData,
        ball_handle: BallHandle,
        events: &EventSender,
        speed: Real,
    ) {
        if !self.fire_events() {
            return;
        }

        let dist_sq = (ball.event_position - ball.position).norm_squared();
        ball.event_position = ball.position;

        let normal_dist = if self.item_type == ItemType::HitTarget {
            0.0
        } else {
            0.25
        };

        if dist_sq > normal_dist {
            events.push(Event::hit(self.item, ball_handle, speed));
        }
    }
}

/// Owner and surface parameters handed to every collider constructor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColliderInfo {
    /// The owning table item.
    pub item: ItemId,
    /// The kind of the owning table item.
    pub item_type: ItemType,
    /// Surface response parameters.
    pub material: PhysicsMaterial,
    /// Minimum impact speed for a hit to raise an event.
    pub threshold: Real,
    /// Whether hits on this collider raise events.
    pub fire_events: bool,
}

impl ColliderInfo {
    /// Collider info with the default material, a unit threshold and events off.
    pub fn new(item: ItemId, item_type: ItemType) -> Self {
        ColliderInfo {
            item,
            item_type,
            material: PhysicsMaterial::default(),
            threshold: 1.0,
            fire_events: false,
        }
    }
}

/// A collider the narrowphase can sweep a ball against.
///
/// Dispatch is a plain `match`; the set of shapes a pinball table needs is
/// closed, so there is no trait object in the hot loop.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Collider {
    /// A swept point.
    Point(PointCollider),
    /// An infinite plane.
    Plane(PlaneCollider),
    /// A vertical wall segment.
    Line(LineCollider),
    /// A vertical cylinder.
    Circle(CircleCollider),
    /// A mesh triangle.
    Triangle(TriangleCollider),
    /// A flipper arm.
    Flipper(FlipperCollider),
}

impl Collider {
    /// A swept point collider.
    pub fn point(info: ColliderInfo, point: Point<Real>) -> Self {
        Collider::Point(PointCollider::new(info, point))
    }

    /// An infinite plane collider with `normal` pointing into play.
    pub fn plane(info: ColliderInfo, normal: UnitVector<Real>, distance: Real) -> Self {
        Collider::Plane(PlaneCollider::new(info, normal, distance))
    }

    /// A vertical wall segment between `v1` and `v2`, spanning `[z_low, z_high]`.
    pub fn line(
        info: ColliderInfo,
        v1: Point2<Real>,
        v2: Point2<Real>,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        Collider::Line(LineCollider::new(info, v1, v2, z_low, z_high))
    }

    /// A vertical cylinder collider spanning `[z_low, z_high]`.
    pub fn circle(
        info: ColliderInfo,
        center: Point2<Real>,
        radius: Real,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        Collider::Circle(CircleCollider::new(info, center, radius, z_low, z_high))
    }

    /// A mesh triangle collider; `(b - a) × (c - a)` must point out of the surface.
    pub fn triangle(info: ColliderInfo, a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Self {
        Collider::Triangle(TriangleCollider::new(info, a, b, c))
    }

    /// A flipper arm collider reading its pose from `flipper` every tick.
    pub fn flipper(
        info: ColliderInfo,
        flipper: FlipperHandle,
        base: Point2<Real>,
        z_low: Real,
        z_high: Real,
    ) -> Self {
        Collider::Flipper(FlipperCollider::new(info, flipper, base, z_low, z_high))
    }

    /// The header shared by every variant.
    pub fn header(&self) -> &ColliderHeader {
        match self {
            Collider::Point(c) => &c.header,
            Collider::Plane(c) => &c.header,
            Collider::Line(c) => &c.header,
            Collider::Circle(c) => &c.header,
            Collider::Triangle(c) => &c.header,
            Collider::Flipper(c) => &c.header,
        }
    }

    /// The type tag of this collider.
    pub fn collider_type(&self) -> ColliderType {
        self.header().collider_type
    }

    /// The table item owning this collider.
    pub fn item(&self) -> ItemId {
        self.header().item
    }

    /// Sweeps `ball` against this collider over the next `d_time`.
    ///
    /// Returns the collision record with its time of impact in `[0, d_time]`,
    /// or `None` when nothing can happen this tick. This is a pure query: no
    /// ball, flipper or collider state changes until resolution.
    pub fn hit_test(
        &self,
        ball: &BallData,
        flippers: &FlipperSet,
        d_time: Real,
    ) -> Option<CollisionEvent> {
        match self {
            Collider::Point(c) => c.hit_test(ball, d_time),
            Collider::Plane(c) => c.hit_test(ball, d_time),
            Collider::Line(c) => c.hit_test(ball, d_time),
            Collider::Circle(c) => c.hit_test(ball, d_time),
            Collider::Triangle(c) => c.hit_test(ball, d_time),
            Collider::Flipper(c) => c.hit_test(ball, flippers, d_time),
        }
    }

    /// Resolves a collision previously reported by [`hit_test`](Self::hit_test).
    ///
    /// Solid surfaces reflect the ball and may raise a hit event; permeable
    /// ones toggle the ball's inside-of membership and raise enter/exit
    /// events; flipper arms additionally receive the reaction torque.
    pub fn collide<R: Rng + ?Sized>(
        &self,
        ball: &mut BallData,
        ball_handle: BallHandle,
        coll: &CollisionEvent,
        flippers: &mut FlipperSet,
        events: &EventSender,
        d_time: Real,
        rng: &mut R,
    ) {
        match self {
            Collider::Flipper(c) => c.collide(ball, ball_handle, coll, flippers, events, d_time),
            Collider::Plane(c) => c.collide(ball, coll, rng),
            _ => {
                let header = self.header();
                match header.item_type {
                    ItemType::Trigger | ItemType::Kicker => {
                        collide_permeable(header, ball, ball_handle, coll, events)
                    }
                    ItemType::Spinner | ItemType::Gate => {
                        collide_crossing(header, ball, ball_handle, coll, events)
                    }
                    _ => collide_solid(header, ball, ball_handle, coll, events, rng),
                }
            }
        }
    }
}

static_assertions::assert_impl_all!(Collider: Send, Sync);

/// Wall response plus the threshold-gated hit event.
fn collide_solid<R: Rng + ?Sized>(
    header: &ColliderHeader,
    ball: &mut BallData,
    ball_handle: BallHandle,
    coll: &CollisionEvent,
    events: &EventSender,
    rng: &mut R,
) {
    // pre-impact normal speed, positive when approaching
    let dot = -coll.normal.dot(&ball.velocity);
    collide_3d_wall(ball, &header.material, coll, &coll.normal, rng);

    if header.should_fire_hit(dot) {
        header.fire_hit_event(ball, ball_handle, events, dot);
    }
}

/// Membership toggle for triggers and kicker pockets.
///
/// The crossing only counts when the direction recorded by the narrowphase
/// disagrees with the membership the ball currently holds; this keeps a ball
/// grazing the boundary from firing enter/exit storms.
fn collide_permeable(
    header: &ColliderHeader,
    ball: &mut BallData,
    ball_handle: BallHandle,
    coll: &CollisionEvent,
    events: &EventSender,
) {
    let inside = ball.inside_ofs.is_inside_of(header.item);
    if coll.hit_flag == inside {
        // move the ball slightly forward so the next tick sees it past the boundary
        ball.position += ball.velocity * STATIC_TIME;

        if !inside {
            ball.inside_ofs.set_inside_of(header.item);
            events.push(Event::enter(header.item, ball_handle));
        } else {
            ball.inside_ofs.set_outside_of(header.item);
            events.push(Event::exit(header.item, ball_handle));
        }
    }
}

/// Pass-through wires: no deflection, just tell the host how fast it was crossed.
fn collide_crossing(
    header: &ColliderHeader,
    ball: &BallData,
    ball_handle: BallHandle,
    coll: &CollisionEvent,
    events: &EventSender,
) {
    if header.fire_events() {
        let speed = coll.normal.dot(&ball.velocity).abs();
        events.push(Event::hit(header.item, ball_handle, speed));
    }
}
