// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A three-item menu where clicks either move focus or activate.
//!
//! This example shows how to combine:
//! - a host-owned focus model (one focused index shared by all items),
//! - `understory_event_state::target::EventNode` as the element handle,
//! - one `understory_activation::resolver::ActivationResolver` per item.
//!
//! The first item activates on every click. The others need focus first, so
//! the first click on them only moves focus.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example activation_menu`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_activation::config::{ActivateFn, ActivationConfig, CallContext};
use understory_activation::focus::{FocusAction, FocusCapability};
use understory_activation::resolver::ActivationResolver;
use understory_event_state::target::{Event, EventNode};

/// Focus capability for one menu item, backed by the menu's shared focus index.
struct ItemFocus {
    index: usize,
    node: EventNode,
    focused: Rc<Cell<Option<usize>>>,
    focus_self: FocusAction,
}

impl ItemFocus {
    fn new(index: usize, focused: &Rc<Cell<Option<usize>>>) -> Self {
        let shared = Rc::clone(focused);
        Self {
            index,
            node: EventNode::new(),
            focused: Rc::clone(focused),
            focus_self: FocusAction::new(move || shared.set(Some(index))),
        }
    }
}

impl FocusCapability for ItemFocus {
    type Element = EventNode;

    fn element(&self) -> Option<EventNode> {
        Some(self.node.clone())
    }

    fn is_focused(&self) -> bool {
        self.focused.get() == Some(self.index)
    }

    fn focus_action(&self) -> FocusAction {
        self.focus_self.clone()
    }
}

struct Item {
    focus: ItemFocus,
    config: ActivationConfig<&'static str>,
    resolver: ActivationResolver<EventNode, &'static str>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let focused: Rc<Cell<Option<usize>>> = Rc::default();
    let activated: Rc<RefCell<Vec<&'static str>>> = Rc::default();

    let sink = Rc::clone(&activated);
    let on_activate = ActivateFn::new(move |label: &&'static str, cx: &CallContext| {
        println!("  activate {label} (pressed keys: {})", cx.pressed_keys.len());
        sink.borrow_mut().push(*label);
    });

    let mut items: Vec<Item> = ["open", "save", "quit"]
        .into_iter()
        .enumerate()
        .map(|(index, label)| Item {
            focus: ItemFocus::new(index, &focused),
            config: ActivationConfig::new(on_activate.clone(), Rc::new(label))
                .require_focus(index > 0),
            resolver: ActivationResolver::new(),
        })
        .collect();

    // The host's update pass: refresh every item after any state change.
    let refresh = |items: &mut [Item]| {
        for item in items.iter_mut() {
            let state = item.resolver.update(&item.focus, &item.config);
            println!(
                "  [{}] focused={} hovered={}",
                item.config.extra_context, state.focused, state.hovered
            );
        }
    };

    let at = Point::new(8.0, 8.0);
    let steps: [(&str, usize, Event); 6] = [
        ("hover save", 1, Event::pointer_enter(at)),
        ("click save", 1, Event::click(at)),
        ("click save again", 1, Event::click(at)),
        ("leave save", 1, Event::pointer_leave(at)),
        ("click open", 0, Event::click(at)),
        ("click quit", 2, Event::click(at)),
    ];

    refresh(&mut items);
    for (label, target, event) in steps {
        println!("{label}");
        items[target].focus.node.dispatch(&event);
        refresh(&mut items);
    }

    println!("activated: {:?}", activated.borrow());
    println!("focused: {:?}", focused.get());
}
