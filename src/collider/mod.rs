//! Collider variants understood by the narrowphase, and the arena owning them.

pub use self::circle::CircleCollider;
pub use self::collider::{
    Collider, ColliderFlags, ColliderHeader, ColliderInfo, ColliderType, ItemId, ItemType,
};
pub use self::flipper::FlipperCollider;
pub use self::line::LineCollider;
pub use self::plane::PlaneCollider;
pub use self::point::PointCollider;
pub use self::set::{ColliderHandle, ColliderSet, SetupError};
pub use self::triangle::TriangleCollider;

mod circle;
mod collider;
mod flipper;
mod line;
mod plane;
mod point;
mod set;
mod triangle;
