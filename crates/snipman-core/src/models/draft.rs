use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An in-progress, unsaved title/content pair.
///
/// Drafts hold exactly what the user typed. They only reach the network as a
/// [`ValidDraft`], which can only be obtained through [`SnippetDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetDraft {
    pub title: String,
    pub content: String,
}

impl SnippetDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();
        match (title.is_empty(), content.is_empty()) {
            (true, true) => Err(ValidationError::EmptyTitleAndContent),
            (true, false) => Err(ValidationError::EmptyTitle),
            (false, true) => Err(ValidationError::EmptyContent),
            (false, false) => Ok(ValidDraft {
                title: title.to_string(),
                content: content.to_string(),
            }),
        }
    }
}

/// A trimmed draft with non-empty title and content. Serializes as the
/// `{title, content}` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidDraft {
    title: String,
    content: String,
}

impl ValidDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
