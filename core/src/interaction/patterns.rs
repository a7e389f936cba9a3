//! Common Interaction Patterns
//!
//! [`Interact`] builds the requests view models pose most often: an OK/Cancel
//! confirmation, a plain acknowledgement, a Yes/No question, and a custom
//! primary action paired with an auto-generated Cancel. Each helper posts
//! through an [`InteractionMediator`] and reduces the answered response id to
//! a boolean, so call sites read as questions.
//!
//! # Cancel While a Command Runs
//!
//! A primary response may carry a [`Command`]. The generated Cancel response
//! is then executable only while that command is idle: once the primary work
//! starts, Cancel reports not-executable until the work finishes, so the user
//! cannot cancel out from under an in-flight action. Completion travels
//! through the content's operation-finished channel: the primary command
//! reports its own id when its work is done, and an activated Cancel reports
//! the cancel id.
//!
//! # Usage
//!
//! ```
//! use colloquy_core::{Interact, InteractionBroker, ResponseId};
//!
//! # tokio_test::block_on(async {
//! let broker = InteractionBroker::new();
//!
//! let decision = Interact::confirm_cancel(&broker, "Remove entry", "The entry will be removed.");
//!
//! // The view answers with OK; the caller learns `true`.
//! broker.respond(Some(ResponseId::ok()));
//! assert_eq!(decision.await, Ok(true));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::command::Command;

use super::broker::{InteractionError, InteractionMediator, PendingAnswer};
use super::model::{InteractionContent, InteractionRequest, InteractionResponse, ResponseId};

// =============================================================================
// Pending Decision
// =============================================================================

/// Future resolving to the outcome of a patterned interaction
///
/// Reduces the answered response id to a boolean: `Ok(true)` when the
/// pattern's affirmative response was picked, `Ok(false)` for any other
/// answer including an answerless dismissal, or the broker's error when the
/// request was replaced, refused, or abandoned.
pub struct PendingDecision {
    answer: PendingAnswer,
    affirmative: ResponseId,
}

impl PendingDecision {
    fn new(answer: PendingAnswer, affirmative: ResponseId) -> Self {
        Self {
            answer,
            affirmative,
        }
    }
}

impl Future for PendingDecision {
    type Output = Result<bool, InteractionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.answer).poll(cx) {
            Poll::Ready(Ok(answer)) => Poll::Ready(Ok(answer.as_ref() == Some(&self.affirmative))),
            Poll::Ready(Err(error)) => Poll::Ready(Err(error)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl fmt::Debug for PendingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDecision")
            .field("affirmative", &self.affirmative)
            .finish()
    }
}

// =============================================================================
// Pattern Facade
// =============================================================================

/// Builders for the common interaction shapes
///
/// All methods post eagerly: the request is stored on the mediator before the
/// method returns, and the returned [`PendingDecision`] only waits for the
/// answer. Contract violations therefore surface at the call site, never
/// inside an awaited future.
pub struct Interact;

impl Interact {
    /// Ask for confirmation with OK and Cancel
    ///
    /// Offers OK as the default action and Cancel as the cancel action.
    /// Resolves to `Ok(true)` iff the interaction was answered with the OK
    /// id.
    pub fn confirm_cancel(
        mediator: &dyn InteractionMediator,
        title: impl Into<String>,
        content: impl Into<InteractionContent>,
    ) -> PendingDecision {
        Self::custom_action_and_cancel(mediator, title, content, InteractionResponse::ok())
    }

    /// Show a message with a single OK response
    ///
    /// Offers OK as both the only response and the default action, so Enter
    /// or a click dismisses the message. Resolves to `Ok(true)` once the
    /// view answers with the OK id.
    pub fn acknowledge(
        mediator: &dyn InteractionMediator,
        title: impl Into<String>,
        content: impl Into<InteractionContent>,
    ) -> PendingDecision {
        let request = InteractionRequest::new(title, content)
            .with_response(InteractionResponse::ok())
            .with_default_action(ResponseId::ok());

        tracing::debug!(title = %request.title(), "requesting acknowledgement");
        PendingDecision::new(mediator.request_interaction(request), ResponseId::ok())
    }

    /// Ask for confirmation, running a command when OK is activated
    ///
    /// Same shape as [`confirm_cancel`](Self::confirm_cancel) with
    /// `ok_command` bound to the OK response. The command reports completion
    /// through the content's operation-finished channel instead of the view
    /// answering on click.
    ///
    /// # Panics
    ///
    /// Panics when `content` is [`InteractionContent::Plain`]; a bound
    /// command has no channel to answer through without interactive content.
    pub fn confirm_with_command(
        mediator: &dyn InteractionMediator,
        title: impl Into<String>,
        content: impl Into<InteractionContent>,
        ok_command: Arc<Command>,
    ) -> PendingDecision {
        Self::custom_action_and_cancel(
            mediator,
            title,
            content,
            InteractionResponse::ok().with_command(ok_command),
        )
    }

    /// Ask a Yes/No question
    ///
    /// Offers Yes as the default action and No as the cancel action.
    /// Resolves to `Ok(true)` iff the interaction was answered with the Yes
    /// id.
    pub fn yes_no(
        mediator: &dyn InteractionMediator,
        title: impl Into<String>,
        content: impl Into<InteractionContent>,
    ) -> PendingDecision {
        let request = InteractionRequest::new(title, content)
            .with_response(InteractionResponse::yes())
            .with_response(InteractionResponse::no())
            .with_default_action(ResponseId::yes())
            .with_cancel_action(ResponseId::no());

        tracing::debug!(title = %request.title(), "requesting yes/no decision");
        PendingDecision::new(mediator.request_interaction(request), ResponseId::yes())
    }

    /// Pair a custom primary response with an auto-generated Cancel
    ///
    /// Posts `[primary, Cancel]` with `primary` as the default action and
    /// Cancel as the cancel action. The Cancel response is bound to a command
    /// that reports the cancel id through the content's operation-finished
    /// channel and, when `primary` carries a command, is executable only
    /// while that command is idle. Resolves to `Ok(true)` iff the
    /// interaction was answered with `primary`'s id.
    ///
    /// # Panics
    ///
    /// Panics before anything is posted when `primary` carries a command but
    /// `content` is [`InteractionContent::Plain`]: the command's completion
    /// would have no channel to answer through. Use
    /// [`InteractionContent::Interactive`] content for command-backed
    /// responses.
    pub fn custom_action_and_cancel(
        mediator: &dyn InteractionMediator,
        title: impl Into<String>,
        content: impl Into<InteractionContent>,
        primary: InteractionResponse,
    ) -> PendingDecision {
        let content = content.into();
        assert!(
            primary.command().is_none() || content.is_interactive(),
            "response `{}` carries a command but the content has no operation-finished channel; \
             use InteractionContent::Interactive",
            primary.id()
        );

        let cancel = cancel_response_for(&primary, &content);
        let primary_id = primary.id().clone();

        let request = InteractionRequest::new(title, content)
            .with_response(primary)
            .with_response(cancel)
            .with_default_action(primary_id.clone())
            .with_cancel_action(ResponseId::cancel());

        tracing::debug!(
            title = %request.title(),
            primary = %primary_id,
            "requesting confirmation for custom action"
        );
        PendingDecision::new(mediator.request_interaction(request), primary_id)
    }
}

/// Build the Cancel response paired with `primary`
///
/// Activating it reports the cancel id through the content's completion
/// channel (a no-op on plain content). While `primary`'s command is busy the
/// response reports not-executable, which keeps the interaction open until
/// the running work finishes.
fn cancel_response_for(
    primary: &InteractionResponse,
    content: &InteractionContent,
) -> InteractionResponse {
    let completion = content.as_interactive().cloned();
    let command = Command::new(move |()| {
        let completion = completion.clone();
        async move {
            if let Some(channel) = completion {
                channel.notify_operation_finished(ResponseId::cancel());
            }
            Ok(())
        }
    });

    let command = match primary.command() {
        Some(primary_command) => {
            let primary_busy = primary_command.busy_flag();
            command.with_guard(move |_| !primary_busy.is_active())
        }
        None => command,
    };

    InteractionResponse::cancel().with_command(Arc::new(command))
}
