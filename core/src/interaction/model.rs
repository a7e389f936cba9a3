//! Interaction Data Model
//!
//! Types describing one modal interaction: the request a view model posts,
//! the responses (buttons) offered to the user, and the content shown in
//! between. The model is rendering-agnostic; a TUI dialog, a web modal, and
//! a headless test all consume the same types.
//!
//! # Design
//!
//! Content is a tagged sum. [`InteractionContent::Plain`] is informational
//! text with no behavior. [`InteractionContent::Interactive`] carries an
//! opaque view-model payload plus a completion channel the hosting view can
//! wire up; a command-backed response reports its outcome through that
//! channel instead of resolving on click. Clones of interactive content
//! share one payload and one completion slot.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::command::Command;

// =============================================================================
// Response Identifiers
// =============================================================================

/// Identifier of an interaction response
///
/// Answers are reported and compared by id, never by display title.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl ResponseId {
    /// Create a response id from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The well-known `ok` id
    #[must_use]
    pub fn ok() -> Self {
        Self::new("ok")
    }

    /// The well-known `cancel` id
    #[must_use]
    pub fn cancel() -> Self {
        Self::new("cancel")
    }

    /// The well-known `close` id
    #[must_use]
    pub fn close() -> Self {
        Self::new("close")
    }

    /// The well-known `yes` id
    #[must_use]
    pub fn yes() -> Self {
        Self::new("yes")
    }

    /// The well-known `no` id
    #[must_use]
    pub fn no() -> Self {
        Self::new("no")
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// One response the user can pick, usually rendered as a button
///
/// The title is observable so a running view can follow locale changes.
/// An attached [`Command`] makes the response a working action: activating
/// it starts the command instead of answering the interaction directly.
/// Commands are shared by reference; clones of a response drive the same
/// command and the same title.
#[derive(Clone)]
pub struct InteractionResponse {
    id: ResponseId,
    title: Arc<watch::Sender<String>>,
    command: Option<Arc<Command>>,
    icon: Option<String>,
}

impl InteractionResponse {
    /// Create a response with the given id and title
    pub fn new(id: ResponseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Arc::new(watch::Sender::new(title.into())),
            command: None,
            icon: None,
        }
    }

    /// The prebuilt OK response
    #[must_use]
    pub fn ok() -> Self {
        Self::new(ResponseId::ok(), "OK")
    }

    /// The prebuilt Cancel response
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(ResponseId::cancel(), "Cancel")
    }

    /// The prebuilt Close response
    #[must_use]
    pub fn close() -> Self {
        Self::new(ResponseId::close(), "Close")
    }

    /// The prebuilt Yes response
    #[must_use]
    pub fn yes() -> Self {
        Self::new(ResponseId::yes(), "Yes")
    }

    /// The prebuilt No response
    #[must_use]
    pub fn no() -> Self {
        Self::new(ResponseId::no(), "No")
    }

    /// Attach a command backing this response
    #[must_use]
    pub fn with_command(mut self, command: Arc<Command>) -> Self {
        self.command = Some(command);
        self
    }

    /// Attach an icon hint for views that render one
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The response id
    #[must_use]
    pub fn id(&self) -> &ResponseId {
        &self.id
    }

    /// Current display title
    #[must_use]
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Replace the display title, notifying subscribers
    pub fn set_title(&self, title: impl Into<String>) {
        self.title.send_replace(title.into());
    }

    /// Subscribe to title changes
    #[must_use]
    pub fn subscribe_title(&self) -> watch::Receiver<String> {
        self.title.subscribe()
    }

    /// The command backing this response, if any
    #[must_use]
    pub fn command(&self) -> Option<&Arc<Command>> {
        self.command.as_ref()
    }

    /// Icon hint, if any
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

impl fmt::Debug for InteractionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionResponse")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("has_command", &self.command.is_some())
            .field("icon", &self.icon)
            .finish()
    }
}

// =============================================================================
// Content
// =============================================================================

/// Content displayed between the title and the responses
#[derive(Clone, Debug)]
pub enum InteractionContent {
    /// Informational text with no behavior
    Plain(String),
    /// View-model payload with a completion channel
    Interactive(InteractiveContent),
}

impl InteractionContent {
    /// Plain text content
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Whether this content carries a completion channel
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    /// The interactive payload, if this content has one
    #[must_use]
    pub fn as_interactive(&self) -> Option<&InteractiveContent> {
        match self {
            Self::Interactive(content) => Some(content),
            Self::Plain(_) => None,
        }
    }
}

impl From<&str> for InteractionContent {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for InteractionContent {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<InteractiveContent> for InteractionContent {
    fn from(content: InteractiveContent) -> Self {
        Self::Interactive(content)
    }
}

type CompletionHandler = Arc<dyn Fn(ResponseId) + Send + Sync>;

/// Interactive content: an opaque view-model payload plus a completion slot
///
/// The hosting view installs the completion handler when it presents the
/// interaction; command-backed responses call
/// [`notify_operation_finished`](Self::notify_operation_finished) when their
/// work is done. Notifying with no handler installed is a no-op.
#[derive(Clone)]
pub struct InteractiveContent {
    payload: Arc<dyn Any + Send + Sync>,
    operation_finished: Arc<Mutex<Option<CompletionHandler>>>,
}

impl InteractiveContent {
    /// Wrap a view-model payload
    pub fn new(payload: impl Any + Send + Sync) -> Self {
        Self {
            payload: Arc::new(payload),
            operation_finished: Arc::new(Mutex::new(None)),
        }
    }

    /// Downcast the payload to a concrete view-model type
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Install the completion handler, replacing any previous one
    pub fn set_operation_finished_handler<F>(&self, handler: F)
    where
        F: Fn(ResponseId) + Send + Sync + 'static,
    {
        *self.operation_finished.lock() = Some(Arc::new(handler));
    }

    /// Whether a completion handler is currently installed
    #[must_use]
    pub fn has_operation_finished_handler(&self) -> bool {
        self.operation_finished.lock().is_some()
    }

    /// Report that the operation behind a response has finished
    ///
    /// Invokes the installed handler with the answering response id.
    /// Does nothing when no handler is installed.
    pub fn notify_operation_finished(&self, answer: ResponseId) {
        let handler = self.operation_finished.lock().clone();
        if let Some(handler) = handler {
            handler(answer);
        }
    }
}

impl Default for InteractiveContent {
    fn default() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for InteractiveContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveContent")
            .field(
                "has_operation_finished_handler",
                &self.has_operation_finished_handler(),
            )
            .finish()
    }
}

// =============================================================================
// Requests
// =============================================================================

/// A modal interaction posted by a view model
///
/// Responses keep their insertion order; views render them in that order.
/// The default action answers the Enter key, the cancel action answers
/// Escape. A request with no responses is legal and simply offers the user
/// nothing to pick.
#[derive(Clone, Debug)]
pub struct InteractionRequest {
    title: String,
    content: InteractionContent,
    responses: Vec<InteractionResponse>,
    default_action: Option<ResponseId>,
    cancel_action: Option<ResponseId>,
}

impl InteractionRequest {
    /// Create a request with no responses yet
    pub fn new(title: impl Into<String>, content: impl Into<InteractionContent>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            responses: Vec::new(),
            default_action: None,
            cancel_action: None,
        }
    }

    /// Append a response
    #[must_use]
    pub fn with_response(mut self, response: InteractionResponse) -> Self {
        self.responses.push(response);
        self
    }

    /// Mark the response answering the Enter key
    #[must_use]
    pub fn with_default_action(mut self, id: ResponseId) -> Self {
        self.default_action = Some(id);
        self
    }

    /// Mark the response answering the Escape key
    #[must_use]
    pub fn with_cancel_action(mut self, id: ResponseId) -> Self {
        self.cancel_action = Some(id);
        self
    }

    /// The request title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The content shown between title and responses
    #[must_use]
    pub fn content(&self) -> &InteractionContent {
        &self.content
    }

    /// All responses in presentation order
    #[must_use]
    pub fn responses(&self) -> &[InteractionResponse] {
        &self.responses
    }

    /// Id of the default action, if any
    #[must_use]
    pub fn default_action(&self) -> Option<&ResponseId> {
        self.default_action.as_ref()
    }

    /// Id of the cancel action, if any
    #[must_use]
    pub fn cancel_action(&self) -> Option<&ResponseId> {
        self.cancel_action.as_ref()
    }

    /// Look up a response by id
    #[must_use]
    pub fn response(&self, id: &ResponseId) -> Option<&InteractionResponse> {
        self.responses.iter().find(|response| response.id() == id)
    }

    /// The response behind the default action
    #[must_use]
    pub fn default_response(&self) -> Option<&InteractionResponse> {
        self.default_action.as_ref().and_then(|id| self.response(id))
    }

    /// The response behind the cancel action
    #[must_use]
    pub fn cancel_response(&self) -> Option<&InteractionResponse> {
        self.cancel_action.as_ref().and_then(|id| self.response(id))
    }

    /// Assert the structural invariants a view relies on
    ///
    /// Panics on duplicate response ids or on a default/cancel action id
    /// that matches no response. Called when the request is posted so a
    /// malformed request fails at its source.
    pub(crate) fn assert_well_formed(&self) {
        for (index, response) in self.responses.iter().enumerate() {
            for other in &self.responses[index + 1..] {
                assert!(
                    response.id() != other.id(),
                    "duplicate response id `{}` in interaction request",
                    response.id()
                );
            }
        }

        if let Some(id) = &self.default_action {
            assert!(
                self.response(id).is_some(),
                "default action `{id}` does not match any response"
            );
        }

        if let Some(id) = &self.cancel_action {
            assert!(
                self.response(id).is_some(),
                "cancel action `{id}` does not match any response"
            );
        }
    }
}
