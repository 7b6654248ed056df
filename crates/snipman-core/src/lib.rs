//! snipman-core
//!
//! Pure domain types for the snippet manager: snippets, tags, identifiers
//! and drafts. No HTTP dependency; this is the shared vocabulary of the
//! client, the view-models and the development backend.

pub mod error;
pub mod id;
pub mod models;

pub use error::ValidationError;
pub use id::{SnippetId, TagId};
pub use models::draft::{SnippetDraft, ValidDraft};
pub use models::snippet::Snippet;
pub use models::tag::{NewTag, Tag, normalize_tag_name};
