//! Per-user mutual exclusion for read-modify-persist sequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lazily created lock per user key. Entries are never removed.
#[derive(Debug, Default)]
pub struct UserLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `user`; hold `handle.lock()` across the whole sequence.
    pub fn handle(&self, user: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.entry(user.to_string()).or_default().clone()
    }
}

/// Acquire a handle. The guarded data is `()`, so a poisoned lock is still usable.
pub fn acquire(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_user_same_lock() {
        let locks = UserLocks::new();
        let a = locks.handle("u1");
        let b = locks.handle("u1");
        let c = locks.handle("u2");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_other_user_not_blocked() {
        let locks = UserLocks::new();
        let a = locks.handle("u1");
        let _held = acquire(&a);
        let b = locks.handle("u2");
        assert!(b.try_lock().is_ok());
        assert!(a.try_lock().is_err());
    }
}
