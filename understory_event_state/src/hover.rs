// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking for a single element.
//!
//! [`HoverTracker`] keeps a `hovered` flag in sync with pointer-enter and
//! pointer-leave events on whichever element it is currently bound to. Listeners
//! are installed only while hovering is enabled and an element is present; they
//! are released whenever the element or the flag changes, and when the tracker is
//! released or dropped.
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::hover::HoverTracker;
//! use understory_event_state::target::{Event, EventNode};
//!
//! let node = EventNode::new();
//! let mut hover = HoverTracker::new();
//! hover.update(Some(&node), true);
//!
//! node.dispatch(&Event::pointer_enter(Point::new(1.0, 1.0)));
//! assert!(hover.hovered());
//! node.dispatch(&Event::pointer_leave(Point::new(50.0, 1.0)));
//! assert!(!hover.hovered());
//! ```
//!
//! The `hovered` flag is not reset when listeners are released. It keeps the last
//! value observed until the next pointer event on a bound element.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::effect::Effect;
use crate::target::{Event, EventKind, EventTarget, Subscription, subscribe};

#[derive(Debug)]
struct HoverListeners<E: EventTarget> {
    _enter: Subscription<E>,
    _leave: Subscription<E>,
}

/// Tracks whether the pointer is over the bound element.
#[derive(Debug)]
pub struct HoverTracker<E: EventTarget> {
    hovered: Rc<Cell<bool>>,
    effect: Effect<(Option<E>, bool), HoverListeners<E>>,
}

impl<E: EventTarget + Clone + PartialEq> Default for HoverTracker<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventTarget + Clone + PartialEq> HoverTracker<E> {
    /// Create an unbound tracker; `hovered` starts out `false`.
    pub fn new() -> Self {
        Self {
            hovered: Rc::new(Cell::new(false)),
            effect: Effect::new(),
        }
    }

    /// Current hover state.
    pub fn hovered(&self) -> bool {
        self.hovered.get()
    }

    /// Whether pointer listeners are currently installed.
    pub fn is_subscribed(&self) -> bool {
        self.effect.is_active()
    }

    /// Release the listeners if `element` or `hoverable` changed since the last commit.
    ///
    /// Returns `true` if the previous binding was invalidated.
    pub fn release_if_stale(&mut self, element: Option<&E>, hoverable: bool) -> bool {
        self.effect.release_if_stale(&(element.cloned(), hoverable))
    }

    /// Bind to `element`, installing listeners when `hoverable` is set.
    ///
    /// A binding with the same inputs as the current one is left untouched.
    pub fn commit(&mut self, element: Option<&E>, hoverable: bool) {
        let hovered = &self.hovered;
        self.effect
            .commit((element.cloned(), hoverable), |(element, hoverable)| {
                if !*hoverable {
                    return None;
                }
                let node = element.as_ref()?;
                let entered = Rc::clone(hovered);
                let left = Rc::clone(hovered);
                Some(HoverListeners {
                    _enter: subscribe(
                        node,
                        EventKind::PointerEnter,
                        Rc::new(move |_: &Event| entered.set(true)),
                    ),
                    _leave: subscribe(
                        node,
                        EventKind::PointerLeave,
                        Rc::new(move |_: &Event| left.set(false)),
                    ),
                })
            });
    }

    /// Release stale listeners, then bind. See [`commit`](Self::commit).
    pub fn update(&mut self, element: Option<&E>, hoverable: bool) {
        self.release_if_stale(element, hoverable);
        self.commit(element, hoverable);
    }

    /// Remove all listeners and forget the binding.
    pub fn release(&mut self) {
        self.effect.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{EventKinds, EventNode};
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Point;

    #[test]
    fn enter_then_leave_round_trip() {
        let node = EventNode::new();
        let mut hover = HoverTracker::new();
        hover.update(Some(&node), true);

        let mut seen = Vec::new();
        seen.push(hover.hovered());
        node.dispatch(&Event::pointer_enter(Point::ZERO));
        seen.push(hover.hovered());
        node.dispatch(&Event::pointer_leave(Point::ZERO));
        seen.push(hover.hovered());
        assert_eq!(seen, vec![false, true, false]);
    }

    #[test]
    fn not_hoverable_never_subscribes() {
        let node = EventNode::new();
        let mut hover = HoverTracker::new();
        hover.update(Some(&node), false);

        assert!(!hover.is_subscribed());
        assert_eq!(node.dispatch(&Event::pointer_enter(Point::ZERO)), 0);
        assert!(!hover.hovered());
        assert_eq!(node.attached_total(), 0);
    }

    #[test]
    fn missing_element_is_a_quiet_no_op() {
        let mut hover: HoverTracker<EventNode> = HoverTracker::new();
        hover.update(None, true);
        assert!(!hover.is_subscribed());
        assert!(!hover.hovered());
    }

    #[test]
    fn repeated_update_does_not_rebind() {
        let node = EventNode::new();
        let mut hover = HoverTracker::new();
        hover.update(Some(&node), true);
        hover.update(Some(&node), true);
        hover.update(Some(&node.clone()), true);
        assert_eq!(node.attached_total(), 2);
        assert_eq!(node.detached_total(), 0);
    }

    #[test]
    fn element_swap_moves_listeners() {
        let old = EventNode::new();
        let new = EventNode::new();
        let mut hover = HoverTracker::new();
        hover.update(Some(&old), true);
        assert_eq!(old.subscribed_kinds(), EventKinds::HOVER);

        hover.update(Some(&new), true);
        assert_eq!(old.subscribed_kinds(), EventKinds::empty());
        assert_eq!(old.detached_total(), 2);
        assert_eq!(new.subscribed_kinds(), EventKinds::HOVER);

        // Events on the old element no longer reach the tracker.
        old.dispatch(&Event::pointer_enter(Point::ZERO));
        assert!(!hover.hovered());
        new.dispatch(&Event::pointer_enter(Point::ZERO));
        assert!(hover.hovered());
    }

    #[test]
    fn disabling_releases_listeners_and_keeps_last_state() {
        let node = EventNode::new();
        let mut hover = HoverTracker::new();
        hover.update(Some(&node), true);
        node.dispatch(&Event::pointer_enter(Point::ZERO));

        hover.update(Some(&node), false);
        assert!(!hover.is_subscribed());
        assert_eq!(node.subscribed_kinds(), EventKinds::empty());
        assert!(hover.hovered());
    }

    #[test]
    fn drop_releases_listeners() {
        let node = EventNode::new();
        {
            let mut hover = HoverTracker::new();
            hover.update(Some(&node), true);
            assert_eq!(node.listener_count(EventKind::PointerEnter), 1);
        }
        assert_eq!(node.subscribed_kinds(), EventKinds::empty());
        assert_eq!(node.detached_total(), 2);
    }
}
