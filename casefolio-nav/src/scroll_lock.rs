//! Page scroll lock.
//!
//! At most one overlay holds the lock. Holding it disables background
//! scrolling; dropping the [`ScrollLockGuard`] restores it, so every exit path
//! (close, escape, back navigation, teardown, early return) releases exactly
//! once.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::NavError;

/// Whatever actually scrolls: the document body in a browser.
pub trait ScrollPort {
    fn set_background_scroll(&mut self, enabled: bool);
}

/// Lifetime totals for one lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockStats {
    pub acquisitions: u64,
    pub releases: u64,
}

struct LockState {
    holder: Option<String>,
    port: Box<dyn ScrollPort>,
    stats: LockStats,
}

/// Shared handle to the page's single scroll lock.
#[derive(Clone)]
pub struct ScrollLock {
    state: Rc<RefCell<LockState>>,
}

impl ScrollLock {
    pub fn new(port: impl ScrollPort + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(LockState {
                holder: None,
                port: Box::new(port),
                stats: LockStats::default(),
            })),
        }
    }

    /// Take the lock for `holder`.
    pub fn acquire(&self, holder: &str) -> Result<ScrollLockGuard, NavError> {
        let mut state = self.state.borrow_mut();
        if let Some(current) = &state.holder {
            return Err(NavError::ScrollLockHeld {
                holder: current.clone(),
            });
        }
        state.holder = Some(holder.to_string());
        state.stats.acquisitions += 1;
        state.port.set_background_scroll(false);
        log::debug!("Scroll lock acquired by '{holder}'");
        Ok(ScrollLockGuard {
            state: Rc::clone(&self.state),
        })
    }

    pub fn is_held(&self) -> bool {
        self.state.borrow().holder.is_some()
    }

    pub fn holder(&self) -> Option<String> {
        self.state.borrow().holder.clone()
    }

    pub fn stats(&self) -> LockStats {
        self.state.borrow().stats
    }
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScrollLock")
            .field("holder", &state.holder)
            .field("stats", &state.stats)
            .finish()
    }
}

/// Proof of holding the lock. Released on drop.
pub struct ScrollLockGuard {
    state: Rc<RefCell<LockState>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if let Some(holder) = state.holder.take() {
            log::debug!("Scroll lock released by '{holder}'");
        }
        state.stats.releases += 1;
        state.port.set_background_scroll(true);
    }
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("holder", &self.state.borrow().holder)
            .finish()
    }
}

/// Scroll port that records every toggle. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingScrollPort {
    log: Rc<RefCell<Vec<bool>>>,
}

impl RecordingScrollPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set_background_scroll` argument, oldest first.
    pub fn toggles(&self) -> Vec<bool> {
        self.log.borrow().clone()
    }

    /// Whether the background is currently scrollable.
    pub fn background_enabled(&self) -> bool {
        self.log.borrow().last().copied().unwrap_or(true)
    }
}

impl ScrollPort for RecordingScrollPort {
    fn set_background_scroll(&mut self, enabled: bool) {
        self.log.borrow_mut().push(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_then_drop_toggles_port() {
        let port = RecordingScrollPort::new();
        let lock = ScrollLock::new(port.clone());

        let guard = lock.acquire("overlay").unwrap();
        assert!(lock.is_held());
        assert_eq!(lock.holder().as_deref(), Some("overlay"));
        assert!(!port.background_enabled());

        drop(guard);
        assert!(!lock.is_held());
        assert!(port.background_enabled());
        assert_eq!(port.toggles(), vec![false, true]);
    }

    #[test]
    fn second_holder_is_refused() {
        let lock = ScrollLock::new(RecordingScrollPort::new());
        let _guard = lock.acquire("a").unwrap();
        let err = lock.acquire("b").unwrap_err();
        assert_eq!(err, NavError::ScrollLockHeld { holder: "a".into() });
        assert_eq!(lock.stats().acquisitions, 1);
    }

    #[test]
    fn release_on_early_return() {
        fn fails_midway(lock: &ScrollLock) -> Result<(), NavError> {
            let _guard = lock.acquire("overlay")?;
            Err(NavError::unknown_slug("gone"))
        }

        let lock = ScrollLock::new(RecordingScrollPort::new());
        assert!(fails_midway(&lock).is_err());
        assert!(!lock.is_held());
        assert_eq!(
            lock.stats(),
            LockStats {
                acquisitions: 1,
                releases: 1
            }
        );
    }

    #[test]
    fn reacquire_after_release() {
        let lock = ScrollLock::new(RecordingScrollPort::new());
        drop(lock.acquire("a").unwrap());
        let _b = lock.acquire("b").unwrap();
        assert_eq!(lock.holder().as_deref(), Some("b"));
    }
}
