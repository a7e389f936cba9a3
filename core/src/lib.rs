//! Colloquy Core - Headless Interaction Coordination for View Models
//!
//! This crate provides the coordination layer between view models and
//! whatever presents them, completely independent of any UI framework.
//! View models track busyness, expose async commands, and pose modal
//! questions; a view of any kind (TUI dialog, web modal, native message
//! box, headless test driver) binds to the pending question and answers it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐          ┌──────────────────────────┐
//! │       View Models        │          │     Presenting View      │
//! │                          │          │                          │
//! │  Interact patterns       │          │  bind_view / ViewBinding │
//! │  Command + BusyFlag      │          │  respond(answer)         │
//! └────────────┬─────────────┘          └────────────┬─────────────┘
//!              │                                     │
//!     request_interaction                  pending slot + answers
//!              │                                     │
//! ┌────────────┴─────────────────────────────────────┴─────────────┐
//! │                       InteractionBroker                        │
//! │  at most one pending request, exactly one answer per request   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`BusyFlag`]: Reference-counted busy indicator shared across clones
//! - [`Command`]: Async action with an advisory executability guard
//! - [`InteractionRequest`]: A modal question with responses and content
//! - [`InteractionBroker`]: Single-slot mediator pairing one question with one answer
//! - [`Interact`]: Builders for the common confirmation shapes
//! - [`ViewBinding`]: View-side adapter for the pending request
//!
//! # Quick Start
//!
//! ```
//! use colloquy_core::{bind_view, Interact, InteractionBroker};
//!
//! # tokio_test::block_on(async {
//! let broker = InteractionBroker::new();
//!
//! // View model side: pose the question, await the decision.
//! let decision = Interact::confirm_cancel(
//!     &broker,
//!     "Remove entry",
//!     "The entry will be removed for good.",
//! );
//!
//! // View side: bind to the pending request and present it.
//! let binding = bind_view(&broker).expect("a request is pending");
//! assert!(binding.is_cancelable());
//! assert!(!binding.has_custom_action());
//!
//! // The user presses Enter; the default action answers with OK.
//! binding.activate_default().await.unwrap();
//!
//! assert_eq!(decision.await, Ok(true));
//! # });
//! ```
//!
//! # Module Overview
//!
//! - [`busy`]: Reference-counted busy tracking with RAII guards
//! - [`command`]: Async commands with advisory guards and busy tracking
//! - [`interaction`]: Modal interaction model, broker, patterns, and view binding
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure view-model logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod busy;
pub mod command;
pub mod interaction;

// Re-exports for convenience
pub use busy::{BusyFlag, BusyGuard};
pub use command::Command;
pub use interaction::{
    bind_view, BrokerConfig, Interact, InteractionBroker, InteractionContent, InteractionError,
    InteractionMediator, InteractionRequest, InteractionResponse, InteractiveContent,
    OverwritePolicy, PendingAnswer, PendingDecision, ResponseId, ViewBinding,
};
