use snipman_client::RequestFailed;
use snipman_core::{Snippet, ValidationError};

use crate::navigation::Route;

/// What happened to a create, save or tag operation. The view-model state
/// already reflects it; the outcome is for callers that need to react, such
/// as navigating or setting an exit status.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the mutation and returned this revision.
    Saved(Snippet),
    /// Rejected locally; no request was sent.
    Invalid(ValidationError),
    Failed(RequestFailed),
    /// Another mutation for this view-model is still in flight.
    Busy,
    /// The view-model is not in a state that allows this operation.
    NotAllowed,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Deleted on the server; the caller should move to `next`.
    Deleted { next: Route },
    /// Confirmation was refused; nothing was sent.
    Cancelled,
    Failed(RequestFailed),
    Busy,
    NotAllowed,
}
