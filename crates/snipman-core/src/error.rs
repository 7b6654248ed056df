use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and content cannot be empty.")]
    EmptyTitleAndContent,

    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("Content cannot be empty.")]
    EmptyContent,

    #[error("identifier cannot be empty")]
    EmptyId,

    #[error("tag name cannot be empty")]
    EmptyTagName,
}
