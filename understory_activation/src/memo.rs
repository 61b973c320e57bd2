// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-entry cache keyed by its dependencies.
//!
//! [`Memo`] recomputes its value only when the key differs from the key the
//! current value was computed for.
//!
//! ```
//! use understory_activation::memo::Memo;
//!
//! let mut memo = Memo::new();
//! let mut runs = 0;
//! let mut get = |memo: &mut Memo<(bool, u8), String>, key| {
//!     memo.get_or_insert_with(key, |&(flag, n)| {
//!         runs += 1;
//!         format!("{flag}:{n}")
//!     })
//!     .clone()
//! };
//!
//! assert_eq!(get(&mut memo, (true, 1)), "true:1");
//! assert_eq!(get(&mut memo, (true, 1)), "true:1");
//! assert_eq!(get(&mut memo, (false, 1)), "false:1");
//! drop(get);
//! assert_eq!(runs, 2);
//! ```

/// Single-entry memoization cell.
#[derive(Clone, Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it first if the key changed.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        if !self.is_current(&key) {
            self.entry = None;
        }
        let (_, value) = self.entry.get_or_insert_with(|| {
            let value = compute(&key);
            (key, value)
        });
        value
    }

    /// Whether the cached value was computed for `key`.
    pub fn is_current(&self, key: &K) -> bool {
        matches!(&self.entry, Some((k, _)) if k == key)
    }

    /// The cached value, if any.
    pub fn get(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
