use crate::collider::ItemId;
use crate::dynamics::{Flipper, FlipperStatics};
use slab::Slab;
use std::ops::{Index, IndexMut};

/// The unique handle of a flipper added to a [`FlipperSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipperHandle(pub usize);

impl FlipperHandle {
    /// The underlying index of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of flipper arms, indexed by stable handles.
#[derive(Clone, Debug, Default)]
pub struct FlipperSet {
    flippers: Slab<Flipper>,
}

impl FlipperSet {
    /// An empty set.
    pub fn new() -> Self {
        FlipperSet {
            flippers: Slab::new(),
        }
    }

    /// Adds a flipper parked at its start angle and returns its handle.
    pub fn insert(&mut self, item: ItemId, statics: FlipperStatics) -> FlipperHandle {
        FlipperHandle(self.flippers.insert(Flipper::new(item, statics)))
    }

    /// Removes a flipper, if the handle is live.
    pub fn remove(&mut self, handle: FlipperHandle) -> Option<Flipper> {
        self.flippers.try_remove(handle.0)
    }

    /// Gets a flipper, if the handle is live.
    pub fn get(&self, handle: FlipperHandle) -> Option<&Flipper> {
        self.flippers.get(handle.0)
    }

    /// Mutably gets a flipper, if the handle is live.
    pub fn get_mut(&mut self, handle: FlipperHandle) -> Option<&mut Flipper> {
        self.flippers.get_mut(handle.0)
    }

    /// The number of flippers in the set.
    pub fn len(&self) -> usize {
        self.flippers.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.flippers.is_empty()
    }

    /// Iterates over the flippers with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (FlipperHandle, &Flipper)> {
        self.flippers.iter().map(|(i, f)| (FlipperHandle(i), f))
    }

    /// Mutably iterates over the flippers with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FlipperHandle, &mut Flipper)> {
        self.flippers.iter_mut().map(|(i, f)| (FlipperHandle(i), f))
    }

    /// Energizes or releases one flipper's solenoid.
    pub fn set_solenoid(&mut self, handle: FlipperHandle, energized: bool) {
        if let Some(flipper) = self.flippers.get_mut(handle.0) {
            flipper.set_solenoid(energized);
        }
    }
}

impl Index<FlipperHandle> for FlipperSet {
    type Output = Flipper;

    fn index(&self, handle: FlipperHandle) -> &Flipper {
        &self.flippers[handle.0]
    }
}

impl IndexMut<FlipperHandle> for FlipperSet {
    fn index_mut(&mut self, handle: FlipperHandle) -> &mut Flipper {
        &mut self.flippers[handle.0]
    }
}
