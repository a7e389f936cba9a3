//! View Binding for Pending Interactions
//!
//! [`bind_view`] is the view-side entry point: when a request appears on the
//! broker, the presenting view binds to it once and drives the interaction
//! through the returned [`ViewBinding`]. Binding wires the content's
//! completion channel to the broker, so command-backed responses answer the
//! interaction without the view translating anything.
//!
//! The binding holds no interaction state of its own. Its request is a
//! snapshot, but commands and response titles inside the snapshot are shared
//! by reference with the posted request, so executability and titles stay
//! live. Only the completion handler is installed at bind time; a view that
//! replaces the handler afterwards should bind again.

use std::fmt;

use super::broker::InteractionBroker;
use super::model::{InteractionRequest, ResponseId};

/// Ids every rendering technology already knows how to present
const COMMON_ACTION_IDS: [&str; 5] = ["ok", "cancel", "yes", "no", "close"];

fn is_common_action(id: &ResponseId) -> bool {
    COMMON_ACTION_IDS.contains(&id.as_str())
}

/// Bind the presenting view to the broker's pending request
///
/// Returns `None` while the broker is idle. When the pending request carries
/// interactive content, its completion handler is set to answer the broker,
/// replacing any previously installed handler.
#[must_use]
pub fn bind_view(broker: &InteractionBroker) -> Option<ViewBinding> {
    let request = broker.pending_request()?;

    if let Some(content) = request.content().as_interactive() {
        let responder = broker.clone();
        content.set_operation_finished_handler(move |answer| responder.respond(Some(answer)));
    }

    Some(ViewBinding {
        broker: broker.clone(),
        request,
    })
}

/// View-side handle on one pending interaction
///
/// Answers the questions a generic dialog surface asks: can the user back
/// out, does the request carry actions the surface has no stock rendering
/// for, and what should the Enter key do.
pub struct ViewBinding {
    broker: InteractionBroker,
    request: InteractionRequest,
}

impl ViewBinding {
    /// The bound request
    #[must_use]
    pub fn request(&self) -> &InteractionRequest {
        &self.request
    }

    /// Whether the user can currently back out of the interaction
    ///
    /// True when a cancel action exists and its command, if any, is
    /// executable right now. Reads the command's guard on every call, so the
    /// answer flips while a primary command is running.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        self.request.cancel_response().is_some_and(|cancel| {
            cancel
                .command()
                .map_or(true, |command| command.can_execute(&()))
        })
    }

    /// Whether the request offers responses outside the common set
    ///
    /// The common set is OK, Cancel, Yes, No and Close. A view with stock
    /// buttons for those switches to a generic layout when this is true.
    #[must_use]
    pub fn has_custom_action(&self) -> bool {
        self.request
            .responses()
            .iter()
            .any(|response| !is_common_action(response.id()))
    }

    /// Activate the default action, as the Enter key does
    ///
    /// A command-backed default runs its command when the command is
    /// currently executable and reports completion through the content's
    /// channel; a plain default answers the broker with its id. Does nothing
    /// when the request has no default action or the command's guard says
    /// no.
    ///
    /// # Errors
    ///
    /// Returns the error of a failed default command. The interaction stays
    /// pending in that case; the user picks again.
    pub async fn activate_default(&self) -> anyhow::Result<()> {
        let Some(default) = self.request.default_response() else {
            return Ok(());
        };

        if let Some(command) = default.command() {
            if command.can_execute(&()) {
                command.execute(()).await?;
            }
        } else {
            self.broker.respond(Some(default.id().clone()));
        }

        Ok(())
    }
}

impl fmt::Debug for ViewBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBinding")
            .field("title", &self.request.title())
            .field("cancelable", &self.is_cancelable())
            .finish()
    }
}
