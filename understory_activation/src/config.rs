// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation policy and the activation target.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

/// Modifier and key state at activation time, keyed by key name.
pub type PressedKeys = HashMap<String, bool>;

/// Context passed to the activation target alongside the extra context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Keys known to be held when activation happened.
    pub pressed_keys: PressedKeys,
}

impl CallContext {
    /// Context for a pointer click. Pointer clicks carry no key state, so the
    /// map is empty.
    pub fn pointer() -> Self {
        Self::default()
    }
}

/// The activation target, compared by identity.
///
/// Receives the configured extra context and a [`CallContext`].
pub struct ActivateFn<X>(Rc<dyn Fn(&X, &CallContext)>);

impl<X> ActivateFn<X> {
    /// Wrap `f` in a new target with a fresh identity.
    pub fn new(f: impl Fn(&X, &CallContext) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the target.
    pub fn call(&self, extra_context: &X, cx: &CallContext) {
        (self.0)(extra_context, cx);
    }
}

impl<X> Clone for ActivateFn<X> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<X> PartialEq for ActivateFn<X> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<X> Eq for ActivateFn<X> {}

impl<X> fmt::Debug for ActivateFn<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActivateFn")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// How an element reacts to hover and clicks, and what activation calls.
///
/// The activation target is a constructor argument, so a config without one
/// cannot exist. Keep the config (or at least its `on_activate` and
/// `extra_context`) alive across updates: both are compared by identity, and
/// replacing either rebuilds the click handler.
///
/// ```
/// use std::rc::Rc;
/// use understory_activation::config::{ActivateFn, ActivationConfig};
///
/// let config = ActivationConfig::new(ActivateFn::new(|item: &u32, _cx| {
///     let _ = item;
/// }), Rc::new(7))
/// .require_focus(true)
/// .hoverable(false);
///
/// assert!(config.clickable);
/// assert!(config.require_focus);
/// assert!(!config.hoverable);
/// ```
pub struct ActivationConfig<X> {
    /// Track pointer enter/leave. Defaults to `true`.
    pub hoverable: bool,
    /// Bind the click handler. Defaults to `true`.
    pub clickable: bool,
    /// Clicks on an unfocused element only acquire focus. Defaults to `false`.
    pub require_focus: bool,
    /// Invoked on activation.
    pub on_activate: ActivateFn<X>,
    /// Opaque payload forwarded to `on_activate`.
    pub extra_context: Rc<X>,
}

impl<X> ActivationConfig<X> {
    /// Default policy with the given activation target and payload.
    pub fn new(on_activate: ActivateFn<X>, extra_context: Rc<X>) -> Self {
        Self {
            hoverable: true,
            clickable: true,
            require_focus: false,
            on_activate,
            extra_context,
        }
    }

    /// Set [`hoverable`](Self::hoverable).
    #[must_use]
    pub fn hoverable(mut self, hoverable: bool) -> Self {
        self.hoverable = hoverable;
        self
    }

    /// Set [`clickable`](Self::clickable).
    #[must_use]
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Set [`require_focus`](Self::require_focus).
    #[must_use]
    pub fn require_focus(mut self, require_focus: bool) -> Self {
        self.require_focus = require_focus;
        self
    }

    /// Invoke `on_activate` with the configured payload.
    pub fn activate(&self, cx: &CallContext) {
        self.on_activate.call(&self.extra_context, cx);
    }
}

impl<X> Clone for ActivationConfig<X> {
    fn clone(&self) -> Self {
        Self {
            hoverable: self.hoverable,
            clickable: self.clickable,
            require_focus: self.require_focus,
            on_activate: self.on_activate.clone(),
            extra_context: Rc::clone(&self.extra_context),
        }
    }
}

impl<X> fmt::Debug for ActivationConfig<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationConfig")
            .field("hoverable", &self.hoverable)
            .field("clickable", &self.clickable)
            .field("require_focus", &self.require_focus)
            .field("on_activate", &self.on_activate)
            .field("extra_context", &Rc::as_ptr(&self.extra_context))
            .finish()
    }
}
