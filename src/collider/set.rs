use crate::collider::Collider;
use crate::dynamics::{FlipperHandle, FlipperSet};
use slab::Slab;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// The unique handle of a collider added to a [`ColliderSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColliderHandle(pub usize);

impl ColliderHandle {
    /// The underlying index of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors caught while wiring a table together, before any tick runs.
///
/// Degenerate geometry is normalized at construction instead of rejected;
/// only broken cross-references are fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A flipper collider points at a flipper missing from the set.
    #[error("collider {collider:?} references missing flipper {flipper:?}")]
    DanglingFlipperHandle {
        /// The offending collider.
        collider: ColliderHandle,
        /// The flipper handle it carries.
        flipper: FlipperHandle,
    },
}

/// The static geometry of a table, shared read-only by every ball.
///
/// Colliders are built once at load time and referenced by handle from the
/// broad phase; they outlive any single tick.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Slab<Collider>,
}

impl ColliderSet {
    /// An empty set.
    pub fn new() -> Self {
        ColliderSet {
            colliders: Slab::new(),
        }
    }

    /// Adds a collider and returns its handle.
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        ColliderHandle(self.colliders.insert(collider))
    }

    /// Removes a collider, if the handle is live.
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.colliders.try_remove(handle.0)
    }

    /// Gets a collider, if the handle is live.
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)
    }

    /// Mutably gets a collider, if the handle is live.
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle.0)
    }

    /// The number of colliders in the set.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterates over the colliders with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter().map(|(i, c)| (ColliderHandle(i), c))
    }

    /// Mutably iterates over the colliders with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ColliderHandle, &mut Collider)> {
        self.colliders
            .iter_mut()
            .map(|(i, c)| (ColliderHandle(i), c))
    }

    /// Checks every cross-reference a tick will follow.
    ///
    /// Call this once after table setup; the per-tick hot path assumes it
    /// passed and treats dead handles as silent no-hits.
    pub fn validate(&self, flippers: &FlipperSet) -> Result<(), SetupError> {
        for (handle, collider) in self.iter() {
            if let Collider::Flipper(arm) = collider {
                if flippers.get(arm.flipper).is_none() {
                    return Err(SetupError::DanglingFlipperHandle {
                        collider: handle,
                        flipper: arm.flipper,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Index<ColliderHandle> for ColliderSet {
    type Output = Collider;

    fn index(&self, handle: ColliderHandle) -> &Collider {
        &self.colliders[handle.0]
    }
}

impl IndexMut<ColliderHandle> for ColliderSet {
    fn index_mut(&mut self, handle: ColliderHandle) -> &mut Collider {
        &mut self.colliders[handle.0]
    }
}
