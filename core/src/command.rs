//! Guarded Async Commands
//!
//! A [`Command`] packages a unit of user-triggered async work together with
//! an optional executability guard and a [`BusyFlag`] that tracks running
//! executions. Views read [`Command::can_execute`] to enable or disable the
//! control bound to the command and watch the busy flag for progress.
//!
//! # Design
//!
//! The guard is advisory: [`Command::execute`] never consults it, callers
//! decide whether to check first. Overlapping executions are allowed and
//! each one holds the busy flag for its own duration, so the flag reads
//! active until the last execution finishes.
//!
//! # Usage
//!
//! ```ignore
//! let save = Command::new(|()| async move {
//!     write_settings().await?;
//!     Ok(())
//! });
//!
//! if save.can_execute(&()) {
//!     save.execute(()).await?;
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::busy::BusyFlag;

type ExecutorFn<P> = dyn Fn(P) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;
type GuardFn<P> = dyn Fn(&P) -> bool + Send + Sync;

/// An async unit of work with an executability guard and busy tracking
///
/// `P` is the parameter passed to both the guard and the executor; commands
/// bound to plain buttons use the default `()`.
pub struct Command<P = ()> {
    executor: Arc<ExecutorFn<P>>,
    guard: Option<Arc<GuardFn<P>>>,
    busy: BusyFlag,
}

impl<P> Command<P> {
    /// Create a command that is always executable
    pub fn new<F, Fut>(executor: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            executor: Arc::new(move |param| executor(param).boxed()),
            guard: None,
            busy: BusyFlag::new(),
        }
    }

    /// Attach a guard consulted by [`can_execute`](Self::can_execute)
    #[must_use]
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Whether the command is currently executable
    ///
    /// Pure query: evaluates the guard (or `true` without one) and changes
    /// no state.
    #[must_use]
    pub fn can_execute(&self, param: &P) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard(param))
    }

    /// Run the executor, holding the busy flag for the duration
    ///
    /// The guard is not consulted here. Executor failures propagate
    /// unchanged after the busy flag has been released.
    pub async fn execute(&self, param: P) -> anyhow::Result<()> {
        self.busy.scope((self.executor)(param)).await
    }

    /// Shared handle to the flag tracking this command's executions
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Whether an execution is currently running
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_active()
    }
}

impl<P> fmt::Debug for Command<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("has_guard", &self.guard.is_some())
            .field("running", &self.busy.count())
            .finish()
    }
}
