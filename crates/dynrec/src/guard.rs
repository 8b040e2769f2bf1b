// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursion guard for cyclic record graphs.
//!
//! Equality, hashing, and rendering all recurse through contained record
//! handles. A thread-local set tracks which handles are on the current
//! logical call stack; revisiting one short-circuits instead of recursing
//! forever. Registration is scoped: the entry is removed when the guard
//! value drops, including on unwind.

use std::cell::RefCell;
use std::collections::HashSet;

/// One in-progress traversal, keyed by record handle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Visit {
    /// Pairwise comparison of two handles, normalized to (low, high) so a
    /// revisit is detected regardless of operand order.
    Compare(usize, usize),
    /// Hashing of one handle.
    Hash(usize),
    /// Rendering of one handle.
    Render(usize),
}

impl Visit {
    pub(crate) fn compare(a: usize, b: usize) -> Self {
        if a <= b {
            Self::Compare(a, b)
        } else {
            Self::Compare(b, a)
        }
    }
}

thread_local! {
    static VISITING: RefCell<HashSet<Visit>> = RefCell::new(HashSet::new());
}

/// Register `key` for the current scope.
///
/// Returns `None` when `key` is already registered somewhere up the call
/// stack, i.e. the traversal is revisiting a value it is already inside.
pub(crate) fn try_enter(key: Visit) -> Option<VisitGuard> {
    let inserted = VISITING.with(|set| set.borrow_mut().insert(key));
    inserted.then_some(VisitGuard { key })
}

/// Scoped registration in the visiting set. Unregisters on drop.
#[derive(Debug)]
pub(crate) struct VisitGuard {
    key: Visit,
}

impl Drop for VisitGuard {
    fn drop(&mut self) {
        VISITING.with(|set| {
            set.borrow_mut().remove(&self.key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_release() {
        let key = Visit::Render(0x1000);
        let guard = try_enter(key).expect("first entry");
        assert!(try_enter(key).is_none());
        drop(guard);
        assert!(try_enter(key).is_some());
    }

    #[test]
    fn test_compare_key_is_unordered() {
        assert_eq!(Visit::compare(1, 2), Visit::compare(2, 1));
        let _guard = try_enter(Visit::compare(7, 3)).expect("entry");
        assert!(try_enter(Visit::compare(3, 7)).is_none());
    }

    #[test]
    fn test_release_on_unwind() {
        let key = Visit::Hash(0x2000);
        let result = std::panic::catch_unwind(|| {
            let _guard = try_enter(key).expect("entry");
            panic!("nested traversal failed");
        });
        assert!(result.is_err());
        assert!(try_enter(key).is_some());
    }

    #[test]
    fn test_distinct_kinds_do_not_collide() {
        let _render = try_enter(Visit::Render(0x3000)).expect("render entry");
        assert!(try_enter(Visit::Hash(0x3000)).is_some());
    }
}
