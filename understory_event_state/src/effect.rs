// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed effect slots.
//!
//! An [`Effect`] owns at most one guard (for example a set of
//! [`Subscription`](crate::target::Subscription)s) together with the dependency
//! key it was acquired for. Committing a new key releases the old guard before the
//! new one is acquired; committing the same key again does nothing.
//!
//! When several slots depend on the same inputs, call
//! [`Effect::release_if_stale`] on all of them before calling [`Effect::commit`] on
//! any of them. That sequences every detach before every attach, so no element
//! ever carries listeners from two generations at once.
//!
//! ```
//! use understory_event_state::effect::Effect;
//!
//! let mut slot: Effect<u32, &str> = Effect::new();
//! slot.commit(1, |_| Some("first"));
//! assert_eq!(slot.guard(), Some(&"first"));
//!
//! // Same key: the acquire closure is not run.
//! slot.commit(1, |_| unreachable!());
//!
//! // New key: the old guard goes away first.
//! assert!(slot.release_if_stale(&2));
//! assert!(!slot.is_active());
//! slot.commit(2, |_| Some("second"));
//! assert_eq!(slot.guard(), Some(&"second"));
//! ```

/// A guard slot keyed by the dependencies it was acquired for.
#[derive(Debug)]
pub struct Effect<K, G> {
    key: Option<K>,
    guard: Option<G>,
}

impl<K, G> Default for Effect<K, G> {
    fn default() -> Self {
        Self {
            key: None,
            guard: None,
        }
    }
}

impl<K: PartialEq, G> Effect<K, G> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is the key the slot was last committed with.
    pub fn is_current(&self, key: &K) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Whether a guard is currently held.
    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    /// The held guard, if any.
    pub fn guard(&self) -> Option<&G> {
        self.guard.as_ref()
    }

    /// Release the guard if `key` differs from the committed key.
    ///
    /// Returns `true` if the slot was invalidated. A later [`commit`](Self::commit)
    /// with `key` then acquires afresh.
    pub fn release_if_stale(&mut self, key: &K) -> bool {
        if self.is_current(key) {
            return false;
        }
        self.release();
        true
    }

    /// Make `key` the current key.
    ///
    /// If `key` is already current this is a no-op. Otherwise the held guard is
    /// dropped first and `acquire` runs afterwards; it may return `None` when the
    /// inputs call for no guard at all.
    pub fn commit(&mut self, key: K, acquire: impl FnOnce(&K) -> Option<G>) {
        if self.is_current(&key) {
            return;
        }
        self.release();
        self.guard = acquire(&key);
        self.key = Some(key);
    }

    /// Drop the guard and forget the key.
    pub fn release(&mut self) {
        self.key = None;
        drop(self.guard.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Debug)]
    struct Guard {
        name: &'static str,
        log: Log,
    }

    impl Guard {
        fn acquire(name: &'static str, log: &Log) -> Self {
            log.borrow_mut().push(alloc::format!("acquire {name}"));
            Self {
                name,
                log: Rc::clone(log),
            }
        }
    }

    impl Drop for Guard {
        fn drop(&mut self) {
            self.log.borrow_mut().push(alloc::format!("release {}", self.name));
        }
    }

    #[test]
    fn commit_same_key_keeps_guard() {
        let log: Log = Rc::default();
        let mut slot = Effect::new();
        slot.commit(1, |_| Some(Guard::acquire("a", &log)));
        slot.commit(1, |_| Some(Guard::acquire("b", &log)));
        assert_eq!(*log.borrow(), vec!["acquire a"]);
        assert!(slot.is_current(&1));
    }

    #[test]
    fn commit_new_key_releases_before_acquire() {
        let log: Log = Rc::default();
        let mut slot = Effect::new();
        slot.commit(1, |_| Some(Guard::acquire("a", &log)));
        slot.commit(2, |_| Some(Guard::acquire("b", &log)));
        assert_eq!(*log.borrow(), vec!["acquire a", "release a", "acquire b"]);
    }

    #[test]
    fn two_phase_update_detaches_all_before_attaching() {
        let log: Log = Rc::default();
        let mut first = Effect::new();
        let mut second = Effect::new();
        first.commit(1, |_| Some(Guard::acquire("first@1", &log)));
        second.commit(1, |_| Some(Guard::acquire("second@1", &log)));
        log.borrow_mut().clear();

        first.release_if_stale(&2);
        second.release_if_stale(&2);
        first.commit(2, |_| Some(Guard::acquire("first@2", &log)));
        second.commit(2, |_| Some(Guard::acquire("second@2", &log)));

        assert_eq!(
            *log.borrow(),
            vec![
                "release first@1",
                "release second@1",
                "acquire first@2",
                "acquire second@2",
            ]
        );
    }

    #[test]
    fn empty_acquire_still_records_key() {
        let mut slot: Effect<u8, ()> = Effect::new();
        let mut runs = 0;
        slot.commit(3, |_| {
            runs += 1;
            None
        });
        slot.commit(3, |_| {
            runs += 1;
            None
        });
        assert_eq!(runs, 1);
        assert!(!slot.is_active());
        assert!(!slot.release_if_stale(&3));
    }

    #[test]
    fn release_and_drop_free_the_guard() {
        let log: Log = Rc::default();
        let mut slot = Effect::new();
        slot.commit(1, |_| Some(Guard::acquire("a", &log)));
        slot.release();
        assert!(!slot.is_current(&1));
        slot.commit(1, |_| Some(Guard::acquire("b", &log)));
        drop(slot);
        assert_eq!(
            *log.borrow(),
            vec!["acquire a", "release a", "acquire b", "release b"]
        );
    }
}
