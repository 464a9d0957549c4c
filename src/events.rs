//! Outbound simulation events and the queue that carries them to the host.

use crate::ball::BallHandle;
use crate::collider::ItemId;
use crate::math::Real;
use crossbeam_channel::{Receiver, Sender, TryIter};

/// What happened to a table item during a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A ball struck a solid collider hard enough to cross its threshold.
    Hit,
    /// A ball crossed into a permeable collider (trigger or kicker pocket).
    Enter,
    /// A ball crossed out of a permeable collider.
    Exit,
    /// A flipper arm reached its end-of-stroke limit.
    EndOfStroke,
    /// A flipper arm returned to its begin-of-stroke limit.
    BeginOfStroke,
}

/// One discrete simulation event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The table item concerned.
    pub item: ItemId,
    /// The ball involved, when one was.
    pub ball: Option<BallHandle>,
    /// Kind-dependent payload: impact speed for hits, angular speed in
    /// degrees per tick for stroke events.
    pub param: Real,
}

impl Event {
    /// A hit event carrying the impact speed.
    pub fn hit(item: ItemId, ball: BallHandle, speed: Real) -> Self {
        Event {
            kind: EventKind::Hit,
            item,
            ball: Some(ball),
            param: speed,
        }
    }

    /// A ball entered a permeable collider.
    pub fn enter(item: ItemId, ball: BallHandle) -> Self {
        Event {
            kind: EventKind::Enter,
            item,
            ball: Some(ball),
            param: 0.0,
        }
    }

    /// A ball left a permeable collider.
    pub fn exit(item: ItemId, ball: BallHandle) -> Self {
        Event {
            kind: EventKind::Exit,
            item,
            ball: Some(ball),
            param: 0.0,
        }
    }

    /// A flipper reached one of its travel limits.
    ///
    /// `angle_speed` is the arrival speed in degrees per tick.
    pub fn stroke(item: ItemId, end_of_stroke: bool, angle_speed: Real) -> Self {
        Event {
            kind: if end_of_stroke {
                EventKind::EndOfStroke
            } else {
                EventKind::BeginOfStroke
            },
            item,
            ball: None,
            param: angle_speed,
        }
    }
}

/// Append-only queue of simulation events.
///
/// Producers clone an [`EventSender`] and push from wherever resolution
/// happens; the host drains from the single consumer end once per tick.
/// Pushing never blocks and never reorders events from the same producer.
#[derive(Debug)]
pub struct EventQueue {
    send: Sender<Event>,
    recv: Receiver<Event>,
}

impl EventQueue {
    /// An empty queue.
    pub fn new() -> Self {
        let (send, recv) = crossbeam_channel::unbounded();
        EventQueue { send, recv }
    }

    /// A new producer handle for this queue.
    pub fn sender(&self) -> EventSender {
        EventSender(self.send.clone())
    }

    /// Number of events waiting to be drained.
    pub fn len(&self) -> usize {
        self.recv.len()
    }

    /// Is the queue currently empty?
    pub fn is_empty(&self) -> bool {
        self.recv.is_empty()
    }

    /// Drains every event queued so far without blocking.
    pub fn drain(&self) -> TryIter<'_, Event> {
        self.recv.try_iter()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        EventQueue::new()
    }
}

/// Cloneable producer end of an [`EventQueue`].
#[derive(Clone, Debug)]
pub struct EventSender(Sender<Event>);

impl EventSender {
    /// Appends an event. Never blocks; if the queue is gone the event is dropped.
    pub fn push(&self, event: Event) {
        let _ = self.0.send(event);
    }
}

static_assertions::assert_impl_all!(EventSender: Send, Sync);
