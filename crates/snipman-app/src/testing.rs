//! In-memory repository for view-model tests, with call counting, failure
//! injection and the ability to hold a call in flight.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use snipman_client::{Operation, RequestFailed, SnippetRepository};
use snipman_core::{NewTag, Snippet, SnippetId, Tag, TagId, ValidDraft};

use crate::hook::RefreshHook;

#[derive(Default)]
struct Inner {
    snippets: Vec<Snippet>,
    tags: Vec<Tag>,
    next_id: u64,
    next_tag_id: u64,
    calls: HashMap<Operation, usize>,
    failures: HashMap<Operation, RequestFailed>,
    holds: HashMap<Operation, oneshot::Receiver<()>>,
    title_rewrite: Option<fn(&str) -> String>,
}

#[derive(Default)]
pub(crate) struct FakeRepository {
    inner: Mutex<Inner>,
}

impl FakeRepository {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_snippets(snippets: Vec<Snippet>) -> Arc<Self> {
        let repo = Self::default();
        {
            let mut inner = repo.inner.lock();
            inner.next_id = snippets.len() as u64;
            inner.snippets = snippets;
        }
        Arc::new(repo)
    }

    pub(crate) fn calls(&self, op: Operation) -> usize {
        self.inner.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.inner.lock().calls.values().sum()
    }

    /// The next call of `op` fails with `status`.
    pub(crate) fn fail_next(&self, op: Operation, status: Option<u16>, message: &str) {
        self.inner
            .lock()
            .failures
            .insert(op, RequestFailed::new(op, status, message));
    }

    /// The next call of `op` waits until the returned sender fires or drops.
    pub(crate) fn hold_next(&self, op: Operation) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().holds.insert(op, rx);
        tx
    }

    /// Make the server store something other than what was submitted.
    pub(crate) fn rewrite_titles(&self, rewrite: fn(&str) -> String) {
        self.inner.lock().title_rewrite = Some(rewrite);
    }

    pub(crate) fn snippet_ids(&self) -> Vec<String> {
        self.inner
            .lock()
            .snippets
            .iter()
            .map(|s| s.id.to_string())
            .collect()
    }

    /// Count calls, honour holds, then return any injected failure.
    async fn enter(&self, op: Operation) -> Result<(), RequestFailed> {
        let hold = {
            let mut inner = self.inner.lock();
            *inner.calls.entry(op).or_default() += 1;
            inner.holds.remove(&op)
        };
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        match self.inner.lock().failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub(crate) fn snippet(id: &str, title: &str, content: &str) -> Snippet {
    Snippet {
        id: SnippetId::parse(id).unwrap(),
        title: title.to_string(),
        content: content.to_string(),
        creation_date: None,
        last_modified_date: None,
        tags: Vec::new(),
    }
}

/// A hook that counts how often it fired.
pub(crate) fn counting_hook() -> (RefreshHook, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let hook = RefreshHook::new(move || {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });
    (hook, count)
}

fn not_found(op: Operation) -> RequestFailed {
    RequestFailed::new(op, Some(404), "Not Found")
}

#[async_trait]
impl SnippetRepository for FakeRepository {
    async fn list_snippets(&self) -> Result<Vec<Snippet>, RequestFailed> {
        self.enter(Operation::ListSnippets).await?;
        Ok(self.inner.lock().snippets.clone())
    }

    async fn get_snippet(&self, id: &SnippetId) -> Result<Option<Snippet>, RequestFailed> {
        self.enter(Operation::GetSnippet).await?;
        let inner = self.inner.lock();
        inner
            .snippets
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .map(Some)
            .ok_or_else(|| not_found(Operation::GetSnippet))
    }

    async fn create_snippet(&self, draft: &ValidDraft) -> Result<Snippet, RequestFailed> {
        self.enter(Operation::CreateSnippet).await?;
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let created = snippet(&inner.next_id.to_string(), draft.title(), draft.content());
        inner.snippets.push(created.clone());
        Ok(created)
    }

    async fn update_snippet(
        &self,
        id: &SnippetId,
        draft: &ValidDraft,
    ) -> Result<Snippet, RequestFailed> {
        self.enter(Operation::UpdateSnippet).await?;
        let mut inner = self.inner.lock();
        let title = match inner.title_rewrite {
            Some(rewrite) => rewrite(draft.title()),
            None => draft.title().to_string(),
        };
        let stored = inner
            .snippets
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| not_found(Operation::UpdateSnippet))?;
        stored.title = title;
        stored.content = draft.content().to_string();
        Ok(stored.clone())
    }

    async fn delete_snippet(&self, id: &SnippetId) -> Result<(), RequestFailed> {
        self.enter(Operation::DeleteSnippet).await?;
        let mut inner = self.inner.lock();
        let before = inner.snippets.len();
        inner.snippets.retain(|s| &s.id != id);
        if inner.snippets.len() == before {
            return Err(not_found(Operation::DeleteSnippet));
        }
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, RequestFailed> {
        self.enter(Operation::ListTags).await?;
        Ok(self.inner.lock().tags.clone())
    }

    async fn create_tag(&self, tag: &NewTag) -> Result<Tag, RequestFailed> {
        self.enter(Operation::CreateTag).await?;
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.tags.iter().find(|t| t.name == tag.name()) {
            return Ok(existing.clone());
        }
        inner.next_tag_id += 1;
        let created = Tag {
            id: TagId::from(inner.next_tag_id),
            name: tag.name().to_string(),
        };
        inner.tags.push(created.clone());
        Ok(created)
    }

    async fn get_tag(&self, id: &TagId) -> Result<Tag, RequestFailed> {
        self.enter(Operation::GetTag).await?;
        self.inner
            .lock()
            .tags
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| not_found(Operation::GetTag))
    }

    async fn rename_tag(&self, id: &TagId, tag: &NewTag) -> Result<Tag, RequestFailed> {
        self.enter(Operation::RenameTag).await?;
        let mut inner = self.inner.lock();
        if inner.tags.iter().any(|t| &t.id != id && t.name == tag.name()) {
            return Err(RequestFailed::new(
                Operation::RenameTag,
                Some(409),
                "tag name already in use",
            ));
        }
        let stored = inner
            .tags
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| not_found(Operation::RenameTag))?;
        stored.name = tag.name().to_string();
        let renamed = stored.clone();
        for snippet in &mut inner.snippets {
            for attached in snippet.tags.iter_mut().filter(|t| &t.id == id) {
                attached.name = renamed.name.clone();
            }
        }
        Ok(renamed)
    }

    async fn delete_tag(&self, id: &TagId) -> Result<(), RequestFailed> {
        self.enter(Operation::DeleteTag).await?;
        let mut inner = self.inner.lock();
        let before = inner.tags.len();
        inner.tags.retain(|t| &t.id != id);
        if inner.tags.len() == before {
            return Err(not_found(Operation::DeleteTag));
        }
        for snippet in &mut inner.snippets {
            snippet.tags.retain(|t| &t.id != id);
        }
        Ok(())
    }

    async fn attach_tag(
        &self,
        snippet: &SnippetId,
        tag: &TagId,
    ) -> Result<Snippet, RequestFailed> {
        self.enter(Operation::AttachTag).await?;
        let mut inner = self.inner.lock();
        let found = inner
            .tags
            .iter()
            .find(|t| &t.id == tag)
            .cloned()
            .ok_or_else(|| not_found(Operation::AttachTag))?;
        let stored = inner
            .snippets
            .iter_mut()
            .find(|s| &s.id == snippet)
            .ok_or_else(|| not_found(Operation::AttachTag))?;
        if !stored.has_tag(tag) {
            stored.tags.push(found);
        }
        Ok(stored.clone())
    }

    async fn detach_tag(
        &self,
        snippet: &SnippetId,
        tag: &TagId,
    ) -> Result<Snippet, RequestFailed> {
        self.enter(Operation::DetachTag).await?;
        let mut inner = self.inner.lock();
        let stored = inner
            .snippets
            .iter_mut()
            .find(|s| &s.id == snippet)
            .ok_or_else(|| not_found(Operation::DetachTag))?;
        stored.tags.retain(|t| &t.id != tag);
        Ok(stored.clone())
    }
}
