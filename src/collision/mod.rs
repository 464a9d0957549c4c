//! Collision records and the wall response shared by every solid collider.

pub use self::collision_event::CollisionEvent;
pub use self::resolve::collide_3d_wall;

mod collision_event;
mod resolve;
