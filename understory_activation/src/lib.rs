// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_activation --heading-base-level=0

//! Understory Activation: decide whether a click focuses or activates.
//!
//! A focusable element usually wants two things from the pointer: a `hovered`
//! flag for styling, and a click that either moves focus to the element or
//! activates it. This crate wires both to one element whose focus state comes
//! from the host through a [`FocusCapability`](focus::FocusCapability).
//!
//! - [`config`]: [`ActivationConfig`](config::ActivationConfig), the policy
//!   (`hoverable`, `clickable`, `require_focus`) plus the mandatory activation target.
//! - [`focus`]: the [`FocusCapability`](focus::FocusCapability) trait and a
//!   value-based [`FocusSnapshot`](focus::FocusSnapshot).
//! - [`resolver`]: [`ActivationResolver`](resolver::ActivationResolver) and the
//!   pure [`decide`](resolver::decide) function.
//! - [`memo`]: the single-entry cache that keeps the click handler's identity stable.
//!
//! Listener lifetimes are handled by [`understory_event_state`]; any of its
//! [`EventTarget`](understory_event_state::target::EventTarget)s can be bound.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_activation::config::{ActivateFn, ActivationConfig};
//! use understory_activation::focus::{FocusAction, FocusSnapshot};
//! use understory_activation::resolver::ActivationResolver;
//! use understory_event_state::target::{Event, EventNode};
//!
//! let button = EventNode::new();
//! let focused = Rc::new(Cell::new(false));
//! let opened = Rc::new(Cell::new(0));
//!
//! let flag = focused.clone();
//! let focus_self = FocusAction::new(move || flag.set(true));
//! let count = opened.clone();
//! let config = ActivationConfig::new(
//!     ActivateFn::new(move |_: &&'static str, _cx| count.set(count.get() + 1)),
//!     Rc::new("open"),
//! )
//! .require_focus(true);
//!
//! let mut resolver = ActivationResolver::new();
//! let snapshot = |f| FocusSnapshot::new(Some(button.clone()), f, focus_self.clone());
//!
//! // First click only takes focus.
//! resolver.update(&snapshot(focused.get()), &config);
//! button.dispatch(&Event::click(Point::ZERO));
//! assert!(focused.get());
//! assert_eq!(opened.get(), 0);
//!
//! // After the host refreshes, the next click activates.
//! resolver.update(&snapshot(focused.get()), &config);
//! button.dispatch(&Event::click(Point::ZERO));
//! assert_eq!(opened.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: `no_std` builds backed by `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod focus;
pub mod memo;
pub mod resolver;
