//! Single-Slot Interaction Brokerage
//!
//! The [`InteractionBroker`] mediates between view models that need a user
//! decision and whichever view is able to present one. At most one request
//! is pending at a time, and the pending slot is observable so a view can
//! react the moment a request appears.
//!
//! # Design
//!
//! Posting stores the request synchronously and returns a [`PendingAnswer`]
//! future. Responding resolves that future exactly once; the resolver is a
//! consumed one-shot channel, so a settled answer can never change. What
//! happens when a request arrives while another is pending is decided by
//! [`OverwritePolicy`]; the replaced or refused awaiter always learns its
//! fate through an [`InteractionError`] instead of hanging forever.
//!
//! # Usage
//!
//! ```
//! use colloquy_core::{InteractionBroker, InteractionRequest, InteractionResponse, ResponseId};
//!
//! # tokio_test::block_on(async {
//! let broker = InteractionBroker::new();
//!
//! let answer = broker.request_interaction(
//!     InteractionRequest::new("Quit", "Unsaved changes will be lost.")
//!         .with_response(InteractionResponse::ok())
//!         .with_response(InteractionResponse::cancel())
//!         .with_default_action(ResponseId::ok()),
//! );
//! assert!(broker.is_pending());
//!
//! // The view answers; the awaiter resolves.
//! broker.respond(Some(ResponseId::ok()));
//! assert_eq!(answer.await, Ok(Some(ResponseId::ok())));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{oneshot, watch};

use super::model::{InteractionRequest, ResponseId};

// =============================================================================
// Configuration
// =============================================================================

/// How the broker treats a new request while one is already pending
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Replace the pending request; its awaiter resolves to
    /// [`InteractionError::Superseded`]
    #[default]
    Supersede,
    /// Keep the pending request; the new awaiter resolves to
    /// [`InteractionError::AlreadyPending`]
    Reject,
}

/// Configuration for an [`InteractionBroker`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Policy applied when a request arrives while another is pending
    pub overwrite_policy: OverwritePolicy,
}

impl BrokerConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overwrite policy
    #[must_use]
    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors surfaced to interaction awaiters
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    /// The pending request was replaced by a newer one
    #[error("interaction request was superseded by a newer request")]
    Superseded,

    /// A request was already pending and the broker rejects overwrites
    #[error("an interaction request is already pending")]
    AlreadyPending,

    /// The broker was dropped while the request was pending
    #[error("interaction broker closed before the request was answered")]
    Closed,
}

type AnswerResult = Result<Option<ResponseId>, InteractionError>;

// =============================================================================
// Pending Answer
// =============================================================================

/// Future resolving to the answer of a posted interaction request
///
/// Resolves to the id the user picked, `Ok(None)` for an answerless
/// dismissal, or an [`InteractionError`] when the broker replaced, refused,
/// or abandoned the request. A request the view never answers simply stays
/// pending; awaiting it does not time out.
pub struct PendingAnswer {
    receiver: oneshot::Receiver<AnswerResult>,
}

impl PendingAnswer {
    fn awaiting(receiver: oneshot::Receiver<AnswerResult>) -> Self {
        Self { receiver }
    }

    fn settled(result: AnswerResult) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// An answer that resolves immediately
    ///
    /// Useful for canned [`InteractionMediator`] implementations in tests.
    #[must_use]
    pub fn resolved(answer: Option<ResponseId>) -> Self {
        Self::settled(Ok(answer))
    }
}

impl Future for PendingAnswer {
    type Output = AnswerResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(InteractionError::Closed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl fmt::Debug for PendingAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAnswer").finish()
    }
}

// =============================================================================
// Mediator Interface
// =============================================================================

/// Requester-side interface to an interaction mediator
///
/// View models depend on this trait rather than on a concrete broker, so
/// tests can substitute a canned implementation and observe the posted
/// requests.
pub trait InteractionMediator: Send + Sync {
    /// Post a request and receive a future for its answer
    ///
    /// The request is stored before this returns; the returned future only
    /// waits for the answer.
    fn request_interaction(&self, request: InteractionRequest) -> PendingAnswer;
}

// =============================================================================
// Broker
// =============================================================================

/// Single-slot mediator holding at most one pending interaction request
///
/// Cloning produces another handle to the same slot. The broker holds no
/// view state; it only stores the pending request and routes the answer
/// back to the awaiter.
#[derive(Clone)]
pub struct InteractionBroker {
    inner: Arc<BrokerInner>,
}

struct BrokerInner {
    config: BrokerConfig,
    pending: watch::Sender<Option<InteractionRequest>>,
    resolver: Mutex<Option<oneshot::Sender<AnswerResult>>>,
}

impl InteractionBroker {
    /// Create a broker with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BrokerConfig::default())
    }

    /// Create a broker with the given configuration
    #[must_use]
    pub fn with_config(config: BrokerConfig) -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                config,
                pending: watch::Sender::new(None),
                resolver: Mutex::new(None),
            }),
        }
    }

    /// The broker's configuration
    #[must_use]
    pub fn config(&self) -> &BrokerConfig {
        &self.inner.config
    }

    /// Post a request and receive a future for its answer
    ///
    /// The request is stored and observable before this returns, regardless
    /// of when (or whether) the returned future is polled. A pending request
    /// is handled per the configured [`OverwritePolicy`].
    ///
    /// # Panics
    ///
    /// Panics when the request is malformed: duplicate response ids, or a
    /// default/cancel action id that matches no response.
    pub fn request_interaction(&self, request: InteractionRequest) -> PendingAnswer {
        request.assert_well_formed();

        let receiver = {
            let mut resolver = self.inner.resolver.lock();

            if resolver.is_some() {
                match self.inner.config.overwrite_policy {
                    OverwritePolicy::Supersede => {
                        tracing::warn!(
                            title = %request.title(),
                            "superseding pending interaction request"
                        );
                        if let Some(replaced) = resolver.take() {
                            let _ = replaced.send(Err(InteractionError::Superseded));
                        }
                    }
                    OverwritePolicy::Reject => {
                        tracing::warn!(
                            title = %request.title(),
                            "rejecting interaction request while another is pending"
                        );
                        return PendingAnswer::settled(Err(InteractionError::AlreadyPending));
                    }
                }
            }

            let (sender, receiver) = oneshot::channel();
            *resolver = Some(sender);

            tracing::debug!(
                title = %request.title(),
                responses = request.responses().len(),
                "interaction request stored"
            );
            self.inner.pending.send_replace(Some(request));

            receiver
        };

        PendingAnswer::awaiting(receiver)
    }

    /// Answer the pending request and resolve its awaiter
    ///
    /// Clears the pending slot first, then resolves the awaiter with the
    /// given answer (`None` for an answerless dismissal). The answer of a
    /// request that has already been resolved can never change.
    ///
    /// # Panics
    ///
    /// Panics when no request is pending; answering an idle broker is a
    /// caller bug.
    pub fn respond(&self, answer: Option<ResponseId>) {
        let sender = {
            let mut resolver = self.inner.resolver.lock();
            assert!(
                resolver.is_some(),
                "respond called with no pending interaction request"
            );
            self.inner.pending.send_replace(None);
            resolver.take()
        };

        tracing::debug!(answer = ?answer, "interaction answered");

        if let Some(sender) = sender {
            if sender.send(Ok(answer)).is_err() {
                tracing::warn!("interaction answer dropped; awaiter no longer listening");
            }
        }
    }

    /// Whether a request is currently pending
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    /// Snapshot of the pending request, if any
    ///
    /// The snapshot is a clone; interactive content and commands inside it
    /// are shared by reference with the posted request.
    #[must_use]
    pub fn pending_request(&self) -> Option<InteractionRequest> {
        self.inner.pending.borrow().clone()
    }

    /// Subscribe to pending-slot changes
    ///
    /// The receiver observes `Some(request)` when a request is stored and
    /// `None` when it is answered.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<InteractionRequest>> {
        self.inner.pending.subscribe()
    }
}

impl Default for InteractionBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InteractionBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionBroker")
            .field("config", &self.inner.config)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl InteractionMediator for InteractionBroker {
    fn request_interaction(&self, request: InteractionRequest) -> PendingAnswer {
        InteractionBroker::request_interaction(self, request)
    }
}
