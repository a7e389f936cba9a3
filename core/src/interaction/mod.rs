//! Modal Interaction Coordination
//!
//! Everything needed to pose a modal question from a view model and answer
//! it from a view. [`model`] defines the shared vocabulary (requests,
//! responses, content), [`broker`] holds the single pending request and
//! routes the answer back, [`patterns`] builds the common request shapes,
//! and [`binding`] adapts the pending request for a presenting view.
//!
//! # Flow
//!
//! A view model posts a request through [`InteractionMediator`] and awaits
//! the returned [`PendingAnswer`]. The view observes the broker's pending
//! slot, binds with [`bind_view`], presents the bound request, and answers
//! through [`InteractionBroker::respond`] or lets a command-backed response
//! answer through the content's completion channel. Exactly one answer
//! reaches the awaiter.

pub mod binding;
pub mod broker;
pub mod model;
pub mod patterns;

// Re-exports for convenience
pub use binding::{bind_view, ViewBinding};
pub use broker::{
    BrokerConfig, InteractionBroker, InteractionError, InteractionMediator, OverwritePolicy,
    PendingAnswer,
};
pub use model::{
    InteractionContent, InteractionRequest, InteractionResponse, InteractiveContent, ResponseId,
};
pub use patterns::{Interact, PendingDecision};
