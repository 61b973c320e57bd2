// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event targets and scoped listener subscriptions.
//!
//! An [`EventTarget`] is a cheap, clonable handle to a UI element that accepts
//! listeners for a small set of pointer events. Listener lifetime is expressed as
//! a value: [`subscribe`] returns a [`Subscription`] guard, and dropping the guard
//! removes exactly the listener it installed. Higher layers never call
//! [`EventTarget::remove_listener`] themselves.
//!
//! [`EventNode`] is a ready-made in-memory target. Hosts that already own a
//! retained element tree can implement [`EventTarget`] on their own node handles
//! instead.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_event_state::target::{subscribe, Event, EventKind, EventNode};
//!
//! let node = EventNode::new();
//! let clicks = Rc::new(Cell::new(0));
//! let seen = clicks.clone();
//!
//! let sub = subscribe(&node, EventKind::Click, Rc::new(move |_: &Event| {
//!     seen.set(seen.get() + 1);
//! }));
//! node.dispatch(&Event::click(Point::new(4.0, 4.0)));
//! assert_eq!(clicks.get(), 1);
//!
//! // Releasing the guard detaches the listener.
//! drop(sub);
//! assert_eq!(node.dispatch(&Event::click(Point::ZERO)), 0);
//! assert_eq!(clicks.get(), 1);
//! ```

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

/// Kind of pointer event a listener can be attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The pointer moved onto the element.
    PointerEnter,
    /// The pointer moved off the element.
    PointerLeave,
    /// The element was clicked (or received an equivalent activation gesture).
    Click,
}

bitflags::bitflags! {
    /// A set of [`EventKind`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// [`EventKind::PointerEnter`].
        const POINTER_ENTER = 0b0000_0001;
        /// [`EventKind::PointerLeave`].
        const POINTER_LEAVE = 0b0000_0010;
        /// [`EventKind::Click`].
        const CLICK         = 0b0000_0100;
        /// Both hover edges.
        const HOVER = Self::POINTER_ENTER.bits() | Self::POINTER_LEAVE.bits();
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::PointerEnter => Self::POINTER_ENTER,
            EventKind::PointerLeave => Self::POINTER_LEAVE,
            EventKind::Click => Self::CLICK,
        }
    }
}

/// A pointer event delivered to listeners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Pointer position in the host's coordinate space.
    pub position: Point,
}

impl Event {
    /// Create an event of the given kind.
    pub const fn new(kind: EventKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Pointer entered the element at `position`.
    pub const fn pointer_enter(position: Point) -> Self {
        Self::new(EventKind::PointerEnter, position)
    }

    /// Pointer left the element at `position`.
    pub const fn pointer_leave(position: Point) -> Self {
        Self::new(EventKind::PointerLeave, position)
    }

    /// Click at `position`.
    pub const fn click(position: Point) -> Self {
        Self::new(EventKind::Click, position)
    }
}

/// Shared, single-threaded event callback.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Token identifying one installed listener on one target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw token. Targets choose how tokens are allocated.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Something listeners can be attached to.
///
/// Implementations are handles: cloning must yield another handle to the same
/// element, and `PartialEq` (where higher layers require it) must compare element
/// identity rather than contents.
pub trait EventTarget {
    /// Install `listener` for `kind` and return a token for removing it.
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove the listener installed under `id` for `kind`.
    ///
    /// Returns `false` if no such listener is installed.
    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool;
}

/// Guard for one installed listener.
///
/// Dropping the guard removes the listener from its target.
#[derive(Debug)]
pub struct Subscription<T: EventTarget> {
    target: T,
    kind: EventKind,
    id: ListenerId,
}

impl<T: EventTarget> Subscription<T> {
    /// The target the listener is installed on.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The event kind the listener is installed for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The listener token.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<T: EventTarget> Drop for Subscription<T> {
    fn drop(&mut self) {
        let removed = self.target.remove_listener(self.kind, self.id);
        tracing::trace!(kind = ?self.kind, id = self.id.get(), removed, "listener detached");
    }
}

/// Install `listener` on `target` and return the guard that removes it.
pub fn subscribe<T: EventTarget + Clone>(
    target: &T,
    kind: EventKind,
    listener: Listener,
) -> Subscription<T> {
    let id = target.add_listener(kind, listener);
    tracing::trace!(?kind, id = id.get(), "listener attached");
    Subscription {
        target: target.clone(),
        kind,
        id,
    }
}

struct Entry {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct NodeInner {
    listeners: RefCell<SmallVec<[Entry; 4]>>,
    next_id: Cell<u64>,
    attached: Cell<u64>,
    detached: Cell<u64>,
}

/// In-memory [`EventTarget`].
///
/// Clones share the same listener list; equality is handle identity.
#[derive(Clone, Default)]
pub struct EventNode {
    inner: Rc<NodeInner>,
}

impl EventNode {
    /// Create a node with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every listener registered for `event.kind`, in installation order.
    ///
    /// Listeners are snapshotted first, so a listener may subscribe or unsubscribe
    /// while the event is being delivered. A listener removed during delivery is
    /// not run. Returns the number of listeners that ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        let batch: SmallVec<[(ListenerId, Listener); 4]> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|e| e.kind == event.kind)
            .map(|e| (e.id, Rc::clone(&e.listener)))
            .collect();

        let mut ran = 0;
        for (id, listener) in &batch {
            if self.is_installed(*id) {
                listener(event);
                ran += 1;
            }
        }
        ran
    }

    /// Number of listeners installed for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    /// The kinds that currently have at least one listener.
    pub fn subscribed_kinds(&self) -> EventKinds {
        self.inner
            .listeners
            .borrow()
            .iter()
            .fold(EventKinds::empty(), |acc, e| acc | EventKinds::from(e.kind))
    }

    /// Total number of listeners ever installed on this node.
    pub fn attached_total(&self) -> u64 {
        self.inner.attached.get()
    }

    /// Total number of listeners ever removed from this node.
    pub fn detached_total(&self) -> u64 {
        self.inner.detached.get()
    }

    fn is_installed(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow().iter().any(|e| e.id == id)
    }
}

impl EventTarget for EventNode {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.attached.set(self.inner.attached.get() + 1);
        self.inner.listeners.borrow_mut().push(Entry { id, kind, listener });
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let Some(pos) = listeners.iter().position(|e| e.id == id && e.kind == kind) else {
            return false;
        };
        // Keep installation order for dispatch.
        listeners.remove(pos);
        self.inner.detached.set(self.inner.detached.get() + 1);
        true
    }
}

impl PartialEq for EventNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for EventNode {}

impl fmt::Debug for EventNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNode")
            .field("addr", &Rc::as_ptr(&self.inner))
            .field("subscribed", &self.subscribed_kinds())
            .finish_non_exhaustive()
    }
}
