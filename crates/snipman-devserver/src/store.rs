//! In-memory snippet and tag store.
//!
//! Ids are sequential integers starting at 1. Listing order is ascending
//! id, which doubles as creation order.

use std::collections::{BTreeMap, BTreeSet};

use jiff::Timestamp;
use thiserror::Error;

use snipman_core::{NewTag, Snippet, SnippetDraft, SnippetId, Tag, TagId, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snippet not found: {0}")]
    SnippetNotFound(String),

    #[error("tag not found: {0}")]
    TagNotFound(String),

    #[error("tag name already in use: {0}")]
    TagNameTaken(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
struct StoredSnippet {
    title: String,
    content: String,
    creation_date: Timestamp,
    last_modified_date: Timestamp,
    tag_ids: BTreeSet<u64>,
}

#[derive(Debug, Default)]
pub struct SnippetStore {
    next_snippet_id: u64,
    next_tag_id: u64,
    snippets: BTreeMap<u64, StoredSnippet>,
    tags: BTreeMap<u64, String>,
}

/// Path ids are opaque strings on the wire; anything that is not one of our
/// integers simply does not exist.
fn parse_key(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

impl SnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snippet_key(&self, raw: &str) -> Result<u64, StoreError> {
        parse_key(raw)
            .filter(|k| self.snippets.contains_key(k))
            .ok_or_else(|| StoreError::SnippetNotFound(raw.to_string()))
    }

    fn tag_key(&self, raw: &str) -> Result<u64, StoreError> {
        parse_key(raw)
            .filter(|k| self.tags.contains_key(k))
            .ok_or_else(|| StoreError::TagNotFound(raw.to_string()))
    }

    fn tag(&self, key: u64) -> Option<Tag> {
        self.tags.get(&key).map(|name| Tag {
            id: TagId::from(key),
            name: name.clone(),
        })
    }

    fn render(&self, key: u64, stored: &StoredSnippet) -> Snippet {
        Snippet {
            id: SnippetId::from(key),
            title: stored.title.clone(),
            content: stored.content.clone(),
            creation_date: Some(stored.creation_date),
            last_modified_date: Some(stored.last_modified_date),
            tags: stored.tag_ids.iter().filter_map(|t| self.tag(*t)).collect(),
        }
    }

    fn snippet(&self, key: u64) -> Result<Snippet, StoreError> {
        self.snippets
            .get(&key)
            .map(|stored| self.render(key, stored))
            .ok_or_else(|| StoreError::SnippetNotFound(key.to_string()))
    }

    pub fn list_snippets(&self) -> Vec<Snippet> {
        self.snippets
            .iter()
            .map(|(key, stored)| self.render(*key, stored))
            .collect()
    }

    pub fn get_snippet(&self, id: &str) -> Result<Snippet, StoreError> {
        let key = self.snippet_key(id)?;
        self.snippet(key)
    }

    pub fn create_snippet(&mut self, draft: &SnippetDraft) -> Result<Snippet, StoreError> {
        let valid = draft.validate()?;
        self.next_snippet_id += 1;
        let key = self.next_snippet_id;
        let now = Timestamp::now();
        self.snippets.insert(
            key,
            StoredSnippet {
                title: valid.title().to_string(),
                content: valid.content().to_string(),
                creation_date: now,
                last_modified_date: now,
                tag_ids: BTreeSet::new(),
            },
        );
        self.snippet(key)
    }

    pub fn update_snippet(&mut self, id: &str, draft: &SnippetDraft) -> Result<Snippet, StoreError> {
        let key = self.snippet_key(id)?;
        let valid = draft.validate()?;
        if let Some(stored) = self.snippets.get_mut(&key) {
            stored.title = valid.title().to_string();
            stored.content = valid.content().to_string();
            stored.last_modified_date = Timestamp::now();
        }
        self.snippet(key)
    }

    pub fn delete_snippet(&mut self, id: &str) -> Result<(), StoreError> {
        let key = self.snippet_key(id)?;
        self.snippets.remove(&key);
        Ok(())
    }

    pub fn list_tags(&self) -> Vec<Tag> {
        self.tags.keys().filter_map(|k| self.tag(*k)).collect()
    }

    pub fn get_tag(&self, id: &str) -> Result<Tag, StoreError> {
        let key = self.tag_key(id)?;
        self.tag(key)
            .ok_or_else(|| StoreError::TagNotFound(id.to_string()))
    }

    fn tag_named(&self, name: &str) -> Option<u64> {
        self.tags
            .iter()
            .find(|(_, stored)| stored.as_str() == name)
            .map(|(key, _)| *key)
    }

    /// Tag names are stored normalized and unique; asking for an existing
    /// name in any spelling returns the existing tag.
    pub fn create_or_get_tag(&mut self, tag: &NewTag) -> Result<Tag, StoreError> {
        let new = NewTag::new(tag.name())?;
        let key = match self.tag_named(new.name()) {
            Some(key) => key,
            None => {
                self.next_tag_id += 1;
                self.tags.insert(self.next_tag_id, new.name().to_string());
                self.next_tag_id
            }
        };
        self.tag(key)
            .ok_or_else(|| StoreError::TagNotFound(key.to_string()))
    }

    /// Renaming to a name held by another tag is a conflict. Renaming a tag
    /// to its own name is a no-op.
    pub fn rename_tag(&mut self, id: &str, tag: &NewTag) -> Result<Tag, StoreError> {
        let key = self.tag_key(id)?;
        let new = NewTag::new(tag.name())?;
        if self.tag_named(new.name()).is_some_and(|other| other != key) {
            return Err(StoreError::TagNameTaken(new.name().to_string()));
        }
        self.tags.insert(key, new.name().to_string());
        self.tag(key)
            .ok_or_else(|| StoreError::TagNotFound(id.to_string()))
    }

    /// Remove a tag everywhere it is used.
    pub fn delete_tag(&mut self, id: &str) -> Result<(), StoreError> {
        let key = self.tag_key(id)?;
        self.tags.remove(&key);
        for stored in self.snippets.values_mut() {
            stored.tag_ids.remove(&key);
        }
        Ok(())
    }

    pub fn attach_tag(&mut self, snippet_id: &str, tag_id: &str) -> Result<Snippet, StoreError> {
        let key = self.snippet_key(snippet_id)?;
        let tag = self.tag_key(tag_id)?;
        if let Some(stored) = self.snippets.get_mut(&key)
            && stored.tag_ids.insert(tag)
        {
            stored.last_modified_date = Timestamp::now();
        }
        self.snippet(key)
    }

    pub fn detach_tag(&mut self, snippet_id: &str, tag_id: &str) -> Result<Snippet, StoreError> {
        let key = self.snippet_key(snippet_id)?;
        let tag = self.tag_key(tag_id)?;
        if let Some(stored) = self.snippets.get_mut(&key)
            && stored.tag_ids.remove(&tag)
        {
            stored.last_modified_date = Timestamp::now();
        }
        self.snippet(key)
    }
}
