// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus-or-activate click resolution.
//!
//! [`ActivationResolver`] combines a [`FocusCapability`] with an
//! [`ActivationConfig`]. On every [`update`](ActivationResolver::update) it:
//!
//! 1. reads the element, focus state and focus action from the capability,
//! 2. fetches the click handler from its memo, rebuilding it only if
//!    `(focused, require_focus, on_activate, extra_context, focus_self)` changed,
//! 3. releases every hover/click listener whose inputs went stale,
//! 4. attaches hover and click listeners for the current inputs,
//! 5. returns a [`Resolved`] snapshot.
//!
//! Step 3 finishes before step 4 starts, so when the element changes, the old
//! element has no listeners left by the time the new one gets any.
//!
//! ## Click decision
//!
//! | `require_focus` | `focused` | click does                |
//! |-----------------|-----------|---------------------------|
//! | `false`         | any       | request focus, then activate |
//! | `true`          | `true`    | activate                  |
//! | `true`          | `false`   | request focus only        |
//!
//! The handler captures `focused` as of the update that built it. Hosts update
//! the resolver after focus changes, which swaps in a handler for the new state.

use alloc::rc::Rc;
use core::fmt;

use understory_event_state::click::{ClickBinder, ClickHandler};
use understory_event_state::hover::HoverTracker;
use understory_event_state::target::EventTarget;

use crate::config::{ActivateFn, ActivationConfig, CallContext};
use crate::focus::{FocusAction, FocusCapability};
use crate::memo::Memo;

/// What a click does under a given policy and focus state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickDecision {
    /// Request focus, then activate.
    FocusAndActivate,
    /// Activate only.
    Activate,
    /// Request focus only.
    Focus,
}

impl ClickDecision {
    /// Whether the click requests focus.
    pub const fn focuses(self) -> bool {
        matches!(self, Self::FocusAndActivate | Self::Focus)
    }

    /// Whether the click activates.
    pub const fn activates(self) -> bool {
        matches!(self, Self::FocusAndActivate | Self::Activate)
    }
}

/// Decide what a click does.
pub const fn decide(require_focus: bool, focused: bool) -> ClickDecision {
    match (require_focus, focused) {
        (false, _) => ClickDecision::FocusAndActivate,
        (true, true) => ClickDecision::Activate,
        (true, false) => ClickDecision::Focus,
    }
}

/// Result of an [`ActivationResolver::update`].
#[derive(Clone, Debug)]
pub struct Resolved<E> {
    /// The bound element.
    pub element: Option<E>,
    /// Focus state used for this update.
    pub focused: bool,
    /// The capability's focus action.
    pub focus_self: FocusAction,
    /// Hover state at the end of the update.
    pub hovered: bool,
}

struct HandlerKey<X> {
    focused: bool,
    require_focus: bool,
    on_activate: ActivateFn<X>,
    extra_context: Rc<X>,
    focus_self: FocusAction,
}

impl<X> PartialEq for HandlerKey<X> {
    fn eq(&self, other: &Self) -> bool {
        self.focused == other.focused
            && self.require_focus == other.require_focus
            && self.on_activate == other.on_activate
            && Rc::ptr_eq(&self.extra_context, &other.extra_context)
            && self.focus_self == other.focus_self
    }
}

impl<X> fmt::Debug for HandlerKey<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerKey")
            .field("focused", &self.focused)
            .field("require_focus", &self.require_focus)
            .field("on_activate", &self.on_activate)
            .field("extra_context", &Rc::as_ptr(&self.extra_context))
            .field("focus_self", &self.focus_self)
            .finish()
    }
}

fn build_click_handler<X: 'static>(key: &HandlerKey<X>) -> ClickHandler {
    let decision = decide(key.require_focus, key.focused);
    tracing::debug!(
        focused = key.focused,
        require_focus = key.require_focus,
        ?decision,
        "click handler rebuilt"
    );
    let focus_self = key.focus_self.clone();
    let on_activate = key.on_activate.clone();
    let extra_context = Rc::clone(&key.extra_context);
    ClickHandler::new(move || {
        tracing::debug!(?decision, "click");
        if decision.focuses() {
            focus_self.call();
        }
        if decision.activates() {
            on_activate.call(&extra_context, &CallContext::pointer());
        }
    })
}

/// Binds hover tracking and focus-or-activate clicks to one focusable element.
pub struct ActivationResolver<E: EventTarget, X> {
    handler: Memo<HandlerKey<X>, ClickHandler>,
    hover: HoverTracker<E>,
    click: ClickBinder<E>,
}

impl<E: EventTarget + Clone + PartialEq, X: 'static> Default for ActivationResolver<E, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventTarget + Clone + PartialEq, X: 'static> ActivationResolver<E, X> {
    /// Create a resolver with no bindings.
    pub fn new() -> Self {
        Self {
            handler: Memo::new(),
            hover: HoverTracker::new(),
            click: ClickBinder::new(),
        }
    }

    /// Re-read `focus`, apply `config`, and bring listeners up to date.
    ///
    /// Cheap to call on every host update: with unchanged inputs nothing is
    /// rebuilt or rebound.
    pub fn update<F>(&mut self, focus: &F, config: &ActivationConfig<X>) -> Resolved<E>
    where
        F: FocusCapability<Element = E> + ?Sized,
    {
        let element = focus.element();
        let focused = focus.is_focused();
        let focus_self = focus.focus_action();

        let key = HandlerKey {
            focused,
            require_focus: config.require_focus,
            on_activate: config.on_activate.clone(),
            extra_context: Rc::clone(&config.extra_context),
            focus_self: focus_self.clone(),
        };
        let handler = self
            .handler
            .get_or_insert_with(key, build_click_handler)
            .clone();

        // Every stale listener goes before any new one is attached.
        self.hover.release_if_stale(element.as_ref(), config.hoverable);
        self.click
            .release_if_stale(element.as_ref(), config.clickable, Some(&handler));
        self.hover.commit(element.as_ref(), config.hoverable);
        self.click
            .commit(element.as_ref(), config.clickable, Some(&handler));

        Resolved {
            element,
            focused,
            focus_self,
            hovered: self.hover.hovered(),
        }
    }

    /// The current click handler, once an update has built one.
    pub fn click_handler(&self) -> Option<&ClickHandler> {
        self.handler.get()
    }

    /// Current hover state.
    pub fn hovered(&self) -> bool {
        self.hover.hovered()
    }

    /// Whether hover listeners are installed.
    pub fn is_hover_subscribed(&self) -> bool {
        self.hover.is_subscribed()
    }

    /// Whether a click listener is installed.
    pub fn is_click_subscribed(&self) -> bool {
        self.click.is_subscribed()
    }

    /// Detach all listeners and drop the cached handler.
    ///
    /// The next [`update`](Self::update) starts from scratch.
    pub fn release(&mut self) {
        self.hover.release();
        self.click.release();
        self.handler.invalidate();
    }
}

impl<E: EventTarget + fmt::Debug, X> fmt::Debug for ActivationResolver<E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationResolver")
            .field("handler", &self.handler)
            .field("hover", &self.hover)
            .field("click", &self.click)
            .finish()
    }
}
