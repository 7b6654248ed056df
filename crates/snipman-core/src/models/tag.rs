use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::id::TagId;

/// A label attached to snippets. Unique by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Request body for creating (or renaming) a tag by name.
///
/// Names are normalized: lowercase, trimmed, inner whitespace runs collapsed
/// to one space. `"  Rust   Tips "` and `"rust tips"` are the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    name: String,
}

impl NewTag {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_tag_name(name);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyTagName);
        }
        Ok(Self { name: normalized })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

pub fn normalize_tag_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode a tag list that may be `null`, keeping the first occurrence of
/// each id.
pub(crate) fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<Vec<Tag>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(dedup_by_id(tags))
}

pub(crate) fn dedup_by_id(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.id.clone()))
        .collect()
}
