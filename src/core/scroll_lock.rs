//! Scoped suspension of table scrolling while an overlay is open.
//!
//! Opening the detail overlay acquires a `ScrollGuard`; the table ignores
//! navigation while any guard is alive. The guard is released when the
//! overlay closes or is dropped for any other reason (view switch, quit),
//! so the lock cannot leak.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }
}

#[derive(Debug)]
pub struct ScrollGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());
        let guard = lock.acquire();
        assert!(lock.is_locked());
        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_nested_guards() {
        let lock = ScrollLock::new();
        let a = lock.acquire();
        let b = lock.clone().acquire();
        drop(a);
        assert!(lock.is_locked());
        drop(b);
        assert!(!lock.is_locked());
    }
}
