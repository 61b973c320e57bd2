// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click binding for a single element.
//!
//! [`ClickBinder`] attaches one [`ClickHandler`] to the click event of the element
//! it is bound to. The binding is keyed by the element, the `clickable` flag and
//! the handler's identity: a new handler (even one that behaves identically)
//! replaces the installed listener, and an unchanged triple leaves it alone.
//!
//! ## Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_event_state::click::{ClickBinder, ClickHandler};
//! use understory_event_state::target::{Event, EventNode};
//!
//! let node = EventNode::new();
//! let clicks = Rc::new(Cell::new(0));
//! let seen = clicks.clone();
//! let handler = ClickHandler::new(move || seen.set(seen.get() + 1));
//!
//! let mut binder = ClickBinder::new();
//! binder.update(Some(&node), true, Some(&handler));
//! node.dispatch(&Event::click(Point::new(3.0, 3.0)));
//! assert_eq!(clicks.get(), 1);
//!
//! // Turning `clickable` off detaches the listener.
//! binder.update(Some(&node), false, Some(&handler));
//! node.dispatch(&Event::click(Point::new(3.0, 3.0)));
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! ## Binding rules
//!
//! A listener is installed only if all of these hold:
//! - `clickable` is `true`
//! - an element is present
//! - a handler is present
//!
//! Any other combination is a valid unbound state, not an error.

use alloc::rc::Rc;
use core::fmt;

use crate::effect::Effect;
use crate::target::{Event, EventKind, EventTarget, Subscription, subscribe};

/// A click callback compared by identity.
///
/// Two handlers are equal only if they share the same allocation, so cloning a
/// handler preserves equality and wrapping a fresh closure never does.
#[derive(Clone)]
pub struct ClickHandler(Rc<dyn Fn()>);

impl ClickHandler {
    /// Wrap `f` in a new handler with a fresh identity.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self) {
        (self.0)();
    }
}

impl PartialEq for ClickHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClickHandler {}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClickHandler")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

type ClickKey<E> = (Option<E>, bool, Option<ClickHandler>);

/// Keeps one click listener bound to the current element.
#[derive(Debug)]
pub struct ClickBinder<E: EventTarget> {
    effect: Effect<ClickKey<E>, Subscription<E>>,
}

impl<E: EventTarget + Clone + PartialEq> Default for ClickBinder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventTarget + Clone + PartialEq> ClickBinder<E> {
    /// Create an unbound binder.
    pub fn new() -> Self {
        Self {
            effect: Effect::new(),
        }
    }

    /// Whether a click listener is currently installed.
    pub fn is_subscribed(&self) -> bool {
        self.effect.is_active()
    }

    /// Release the listener if any input changed since the last commit.
    ///
    /// Returns `true` if the previous binding was invalidated.
    pub fn release_if_stale(
        &mut self,
        element: Option<&E>,
        clickable: bool,
        handler: Option<&ClickHandler>,
    ) -> bool {
        self.effect
            .release_if_stale(&(element.cloned(), clickable, handler.cloned()))
    }

    /// Bind `handler` to `element`'s click event, subject to the binding rules.
    pub fn commit(&mut self, element: Option<&E>, clickable: bool, handler: Option<&ClickHandler>) {
        self.effect.commit(
            (element.cloned(), clickable, handler.cloned()),
            |(element, clickable, handler)| {
                if !*clickable {
                    return None;
                }
                let node = element.as_ref()?;
                let handler = handler.clone()?;
                Some(subscribe(
                    node,
                    EventKind::Click,
                    Rc::new(move |_: &Event| handler.call()),
                ))
            },
        );
    }

    /// Release a stale listener, then bind. See [`commit`](Self::commit).
    pub fn update(&mut self, element: Option<&E>, clickable: bool, handler: Option<&ClickHandler>) {
        self.release_if_stale(element, clickable, handler);
        self.commit(element, clickable, handler);
    }

    /// Remove the listener and forget the binding.
    pub fn release(&mut self) {
        self.effect.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::EventNode;
    use core::cell::Cell;
    use kurbo::Point;

    fn counting_handler() -> (Rc<Cell<u32>>, ClickHandler) {
        let count = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&count);
        (count, ClickHandler::new(move || seen.set(seen.get() + 1)))
    }

    fn click(node: &EventNode) -> usize {
        node.dispatch(&Event::click(Point::new(5.0, 5.0)))
    }

    #[test]
    fn handler_identity_is_allocation_identity() {
        let (_, a) = counting_handler();
        let (_, b) = counting_handler();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn bound_handler_runs_on_click() {
        let node = EventNode::new();
        let (count, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&node), true, Some(&handler));

        assert!(binder.is_subscribed());
        assert_eq!(click(&node), 1);
        assert_eq!(click(&node), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn not_clickable_never_subscribes() {
        let node = EventNode::new();
        let (count, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&node), false, Some(&handler));
        binder.update(Some(&node), false, Some(&handler));

        assert!(!binder.is_subscribed());
        assert_eq!(click(&node), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(node.attached_total(), 0);
    }

    #[test]
    fn missing_handler_or_element_is_a_quiet_no_op() {
        let node = EventNode::new();
        let (_, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&node), true, None);
        assert!(!binder.is_subscribed());
        binder.update(None, true, Some(&handler));
        assert!(!binder.is_subscribed());
        assert_eq!(node.attached_total(), 0);
    }

    #[test]
    fn same_inputs_do_not_rebind() {
        let node = EventNode::new();
        let (_, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        for _ in 0..3 {
            binder.update(Some(&node), true, Some(&handler.clone()));
        }
        assert_eq!(node.attached_total(), 1);
        assert_eq!(node.detached_total(), 0);
    }

    #[test]
    fn new_handler_identity_rebinds_once() {
        let node = EventNode::new();
        let (first_count, first) = counting_handler();
        let (second_count, second) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&node), true, Some(&first));
        binder.update(Some(&node), true, Some(&second));

        assert_eq!(node.attached_total(), 2);
        assert_eq!(node.detached_total(), 1);
        assert_eq!(click(&node), 1);
        assert_eq!(first_count.get(), 0);
        assert_eq!(second_count.get(), 1);
    }

    #[test]
    fn element_swap_detaches_old_before_attaching_new() {
        let old = EventNode::new();
        let new = EventNode::new();
        let (_, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&old), true, Some(&handler));

        assert!(binder.release_if_stale(Some(&new), true, Some(&handler)));
        assert_eq!(old.listener_count(EventKind::Click), 0);
        assert_eq!(new.attached_total(), 0);

        binder.commit(Some(&new), true, Some(&handler));
        assert_eq!(new.listener_count(EventKind::Click), 1);
        assert_eq!(click(&old), 0);
    }

    #[test]
    fn release_detaches() {
        let node = EventNode::new();
        let (_, handler) = counting_handler();
        let mut binder = ClickBinder::new();
        binder.update(Some(&node), true, Some(&handler));
        binder.release();
        assert!(!binder.is_subscribed());
        assert_eq!(node.listener_count(EventKind::Click), 0);

        // Releasing forgets the key, so the same inputs bind again.
        binder.update(Some(&node), true, Some(&handler));
        assert_eq!(node.attached_total(), 2);
    }
}
