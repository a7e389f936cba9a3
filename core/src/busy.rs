//! Busy-State Tracking
//!
//! Reference-counted busy state for view models. A [`BusyFlag`] counts
//! overlapping units of work; the flag reads active while at least one unit
//! is still running. Views subscribe to the count to disable controls or
//! show progress without hooking into the work itself.
//!
//! Acquisition is scoped: [`BusyFlag::acquire`] hands back a guard that
//! releases on drop, and [`BusyFlag::scope`] wraps a future so the flag
//! releases on every exit path, including errors and cancellation.
//!
//! # Usage
//!
//! ```
//! use colloquy_core::BusyFlag;
//!
//! let busy = BusyFlag::new();
//! assert!(!busy.is_active());
//!
//! let outer = busy.acquire();
//! let inner = busy.acquire();
//! assert_eq!(busy.count(), 2);
//!
//! drop(outer);
//! assert!(busy.is_active());
//!
//! drop(inner);
//! assert!(!busy.is_active());
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

// =============================================================================
// Busy Flag
// =============================================================================

/// Shared, observable busy counter
///
/// Cloning produces another handle to the same counter, so a view model and
/// the views watching it always agree on the busy state. The counter only
/// moves through [`acquire`](Self::acquire) and guard drops; it is never
/// observable below zero.
#[derive(Clone)]
pub struct BusyFlag {
    count: Arc<watch::Sender<u32>>,
}

impl BusyFlag {
    /// Create a new idle flag
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Mark one unit of work as running
    ///
    /// The returned guard releases the unit exactly once, when dropped.
    /// Acquisitions nest: the flag stays active until every outstanding
    /// guard has been dropped, in any order.
    #[must_use]
    pub fn acquire(&self) -> BusyGuard {
        self.count.send_modify(|count| *count += 1);
        BusyGuard {
            count: Arc::clone(&self.count),
        }
    }

    /// Run a future while holding the flag
    ///
    /// The flag is acquired when the returned future first runs and released
    /// when it finishes, fails, or is dropped mid-flight. The work's output
    /// passes through unchanged.
    pub async fn scope<F>(&self, work: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.acquire();
        work.await
    }

    /// Whether any unit of work is currently running
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.count.borrow() > 0
    }

    /// Number of currently running units of work
    #[must_use]
    pub fn count(&self) -> u32 {
        *self.count.borrow()
    }

    /// Subscribe to counter changes
    ///
    /// The receiver is notified on every acquisition and release.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.count.subscribe()
    }

    /// Wait until no work is running
    ///
    /// Returns immediately when the flag is already idle.
    pub async fn wait_idle(&self) {
        let mut observed = self.count.subscribe();
        // Cannot fail while `self` keeps the sender alive
        let _ = observed.wait_for(|count| *count == 0).await;
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BusyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyFlag")
            .field("count", &self.count())
            .finish()
    }
}

// =============================================================================
// Busy Guard
// =============================================================================

/// RAII guard for one unit of busy work
///
/// Dropping the guard decrements the owning flag's counter exactly once.
#[must_use]
pub struct BusyGuard {
    count: Arc<watch::Sender<u32>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.count
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

impl std::fmt::Debug for BusyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyGuard").finish()
    }
}
