//! Sync Guard
//!
//! Reentrancy guard for two-way sync. While provisioning writes an account
//! that came *from* a contact, listeners that would push that account back
//! to the directory must stand down.
//!
//! The guard is a depth counter owned by one operation and passed to
//! listeners explicitly; there is no process-wide flag.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct SyncGuard {
    depth: AtomicUsize,
}

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a self-triggered write; ends when the scope drops
    pub fn enter(&self) -> SyncScope<'_> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        SyncScope { guard: self }
    }

    /// True while at least one scope is alive
    pub fn is_active(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }
}

/// Live section of a [`SyncGuard`]
#[must_use = "the guard is released as soon as the scope is dropped"]
#[derive(Debug)]
pub struct SyncScope<'a> {
    guard: &'a SyncGuard,
}

impl Drop for SyncScope<'_> {
    fn drop(&mut self) {
        self.guard.depth.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let guard = SyncGuard::new();
        assert!(!guard.is_active());
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_scope_activates_until_drop() {
        let guard = SyncGuard::new();
        {
            let _scope = guard.enter();
            assert!(guard.is_active());
        }
        assert!(!guard.is_active());
    }

    #[test]
    fn test_nested_scopes() {
        let guard = SyncGuard::new();
        let outer = guard.enter();
        let inner = guard.enter();
        assert_eq!(guard.depth(), 2);
        drop(inner);
        assert!(guard.is_active());
        drop(outer);
        assert!(!guard.is_active());
    }

    #[test]
    fn test_guards_are_independent() {
        let a = SyncGuard::new();
        let b = SyncGuard::new();
        let _scope = a.enter();
        assert!(a.is_active());
        assert!(!b.is_active());
    }
}
