// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: listener lifetimes for interactive elements.
//!
//! This crate binds pointer listeners to one UI element at a time and guarantees
//! they are released when the element or the configuration changes.
//!
//! - [`target`]: the [`EventTarget`](target::EventTarget) trait, RAII
//!   [`Subscription`](target::Subscription)s, and an in-memory
//!   [`EventNode`](target::EventNode).
//! - [`effect`]: [`Effect`](effect::Effect), a guard slot keyed by its inputs, with
//!   detach-before-attach sequencing.
//! - [`hover`]: [`HoverTracker`](hover::HoverTracker), a `hovered` flag driven by
//!   pointer enter/leave.
//! - [`click`]: [`ClickBinder`](click::ClickBinder), one identity-keyed click
//!   handler per element.
//!
//! All state is single-threaded (`Rc`/`Cell`). Handlers run synchronously inside
//! whatever event loop dispatches to the target.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_event_state::click::{ClickBinder, ClickHandler};
//! use understory_event_state::hover::HoverTracker;
//! use understory_event_state::target::{Event, EventKinds, EventNode};
//!
//! let button = EventNode::new();
//! let pressed = Rc::new(Cell::new(false));
//! let flag = pressed.clone();
//! let on_click = ClickHandler::new(move || flag.set(true));
//!
//! let mut hover = HoverTracker::new();
//! let mut click = ClickBinder::new();
//! hover.update(Some(&button), true);
//! click.update(Some(&button), true, Some(&on_click));
//! assert_eq!(button.subscribed_kinds(), EventKinds::all());
//!
//! button.dispatch(&Event::pointer_enter(Point::new(2.0, 2.0)));
//! button.dispatch(&Event::click(Point::new(2.0, 2.0)));
//! assert!(hover.hovered());
//! assert!(pressed.get());
//!
//! // Dropping the trackers detaches everything.
//! drop((hover, click));
//! assert!(button.subscribed_kinds().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: `no_std` builds of `kurbo` backed by `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod click;
pub mod effect;
pub mod hover;
pub mod target;
