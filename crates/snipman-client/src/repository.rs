use async_trait::async_trait;

use snipman_core::{NewTag, Snippet, SnippetId, Tag, TagId, ValidDraft};

use crate::error::RequestFailed;

/// The remote source of truth for snippets.
///
/// [`crate::SnippetClient`] is the HTTP implementation; view-models are
/// generic over this trait so they can run against any backend.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    async fn list_snippets(&self) -> Result<Vec<Snippet>, RequestFailed>;

    /// `Ok(None)` means the server answered successfully with no resource.
    async fn get_snippet(&self, id: &SnippetId) -> Result<Option<Snippet>, RequestFailed>;

    async fn create_snippet(&self, draft: &ValidDraft) -> Result<Snippet, RequestFailed>;

    async fn update_snippet(
        &self,
        id: &SnippetId,
        draft: &ValidDraft,
    ) -> Result<Snippet, RequestFailed>;

    async fn delete_snippet(&self, id: &SnippetId) -> Result<(), RequestFailed>;

    async fn list_tags(&self) -> Result<Vec<Tag>, RequestFailed>;

    /// Returns the existing tag when one with the same name already exists.
    async fn create_tag(&self, tag: &NewTag) -> Result<Tag, RequestFailed>;

    async fn get_tag(&self, id: &TagId) -> Result<Tag, RequestFailed>;

    /// Fails with 409 when another tag already has the name.
    async fn rename_tag(&self, id: &TagId, tag: &NewTag) -> Result<Tag, RequestFailed>;

    /// Also detaches the tag from every snippet.
    async fn delete_tag(&self, id: &TagId) -> Result<(), RequestFailed>;

    async fn attach_tag(&self, snippet: &SnippetId, tag: &TagId)
        -> Result<Snippet, RequestFailed>;

    async fn detach_tag(&self, snippet: &SnippetId, tag: &TagId)
        -> Result<Snippet, RequestFailed>;
}
