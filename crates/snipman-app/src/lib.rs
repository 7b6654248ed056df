//! snipman-app
//!
//! View-models for the snippet manager: the non-visual state and operations
//! behind the list, create and detail screens.
//!
//! Every view-model is pessimistic: local state only changes after the
//! server answers, and every successful mutation invalidates the list
//! through its [`RefreshHook`] instead of patching it in place.

pub mod create;
pub mod detail;
pub mod feedback;
mod guard;
pub mod hook;
pub mod list;
pub mod navigation;
pub mod outcome;

#[cfg(test)]
mod testing;

pub use create::{CreateSnapshot, CreateViewModel};
pub use detail::{DetailPhase, DetailSnapshot, DetailViewModel};
pub use feedback::{Feedback, FeedbackKind};
pub use hook::RefreshHook;
pub use list::{ListPhase, ListSnapshot, ListViewModel, NO_SNIPPETS_MESSAGE};
pub use navigation::Route;
pub use outcome::{DeleteOutcome, SubmitOutcome};
