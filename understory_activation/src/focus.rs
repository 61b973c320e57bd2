// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus capability consumed by the resolver.
//!
//! Focus itself (which element is focused, how focus moves) belongs to the host.
//! The resolver only needs three things from it, bundled by [`FocusCapability`]:
//! the element to bind to, whether that element is focused, and an action that
//! requests focus for it.

use alloc::rc::Rc;
use core::fmt;

use understory_event_state::target::EventTarget;

/// A zero-argument "request focus" action, compared by identity.
///
/// Hosts should hand out the same `FocusAction` for an element across updates;
/// a fresh action counts as a change and rebuilds the click handler.
#[derive(Clone)]
pub struct FocusAction(Rc<dyn Fn()>);

impl FocusAction {
    /// Wrap `f` in a new action with a fresh identity.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Request focus.
    pub fn call(&self) {
        (self.0)();
    }
}

impl PartialEq for FocusAction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FocusAction {}

impl fmt::Debug for FocusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FocusAction")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Externally supplied focus state for one element.
pub trait FocusCapability {
    /// Element handle; equality must be element identity.
    type Element: EventTarget + Clone + PartialEq;

    /// The element currently bound, if any.
    fn element(&self) -> Option<Self::Element>;

    /// Whether the element currently has focus.
    fn is_focused(&self) -> bool;

    /// The action that requests focus for the element.
    fn focus_action(&self) -> FocusAction;
}

impl<F: FocusCapability + ?Sized> FocusCapability for &F {
    type Element = F::Element;

    fn element(&self) -> Option<Self::Element> {
        (**self).element()
    }

    fn is_focused(&self) -> bool {
        (**self).is_focused()
    }

    fn focus_action(&self) -> FocusAction {
        (**self).focus_action()
    }
}

/// A point-in-time [`FocusCapability`] built from plain values.
///
/// Useful for hosts that already know the focus state when they update the
/// resolver.
#[derive(Clone, Debug)]
pub struct FocusSnapshot<E> {
    /// The bound element.
    pub element: Option<E>,
    /// Whether the element is focused.
    pub focused: bool,
    /// Requests focus for the element.
    pub focus_self: FocusAction,
}

impl<E> FocusSnapshot<E> {
    /// Bundle the three inputs.
    pub fn new(element: Option<E>, focused: bool, focus_self: FocusAction) -> Self {
        Self {
            element,
            focused,
            focus_self,
        }
    }
}

impl<E: EventTarget + Clone + PartialEq> FocusCapability for FocusSnapshot<E> {
    type Element = E;

    fn element(&self) -> Option<E> {
        self.element.clone()
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus_action(&self) -> FocusAction {
        self.focus_self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use understory_event_state::target::EventNode;

    #[test]
    fn focus_action_identity() {
        let a = FocusAction::new(|| {});
        let b = FocusAction::new(|| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn snapshot_reports_its_values_through_a_reference() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let node = EventNode::new();
        let snapshot = FocusSnapshot::new(
            Some(node.clone()),
            true,
            FocusAction::new(move || seen.set(seen.get() + 1)),
        );

        let by_ref = &snapshot;
        assert_eq!(by_ref.element(), Some(node));
        assert!(by_ref.is_focused());
        by_ref.focus_action().call();
        assert_eq!(calls.get(), 1);
    }
}
