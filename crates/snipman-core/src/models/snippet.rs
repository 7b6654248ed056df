use serde::{Deserialize, Serialize};

use crate::id::{SnippetId, TagId};
use crate::models::draft::SnippetDraft;
use crate::models::tag::{deserialize_tags, Tag};

/// A titled block of documentation text, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<jiff::Timestamp>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<Tag>,
}

impl Snippet {
    /// Seed an editable draft from this revision.
    pub fn to_draft(&self) -> SnippetDraft {
        SnippetDraft::new(self.title.clone(), self.content.clone())
    }

    pub fn has_tag(&self, id: &TagId) -> bool {
        self.tags.iter().any(|t| &t.id == id)
    }

    /// Loaded snippets must carry a non-empty title and content to be shown.
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}
