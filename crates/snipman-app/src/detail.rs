//! The single-snippet screen: view, edit, tag and delete.
//!
//! ```text
//! Idle ──load──▶ Loading ──▶ Viewing | NotFound | LoadFailed
//! Viewing ──toggle_edit──▶ Editing ──cancel / save──▶ Viewing
//! Viewing ──delete_current──▶ Deleting ──▶ Deleted | Viewing (on failure)
//! ```
//!
//! Loads and mutations are fenced by a generation number bumped on every
//! `load`. A response that arrives for an older generation, or after
//! `dispose`, leaves the state untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use snipman_client::{RequestFailed, SnippetRepository};
use snipman_core::{NewTag, Snippet, SnippetDraft, SnippetId, TagId, ValidDraft};

use crate::feedback::Feedback;
use crate::guard::InFlight;
use crate::hook::RefreshHook;
use crate::navigation::Route;
use crate::outcome::{DeleteOutcome, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    Loading,
    Viewing,
    Editing,
    Deleting,
    Deleted,
    NotFound,
    LoadFailed,
}

#[derive(Debug)]
struct DetailState {
    id: Option<SnippetId>,
    phase: DetailPhase,
    /// Last revision confirmed by the server.
    snippet: Option<Snippet>,
    draft: SnippetDraft,
    feedback: Option<Feedback>,
    load_error: Option<String>,
    is_submitting: bool,
    is_update_error: bool,
    generation: u64,
    disposed: bool,
}

impl DetailState {
    fn is_current(&self, generation: u64) -> bool {
        !self.disposed && self.generation == generation
    }

    fn reseed_draft(&mut self) {
        self.draft = self
            .snippet
            .as_ref()
            .map(Snippet::to_draft)
            .unwrap_or_default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSnapshot {
    pub id: Option<SnippetId>,
    pub phase: DetailPhase,
    pub snippet: Option<Snippet>,
    pub draft: SnippetDraft,
    pub feedback: Option<Feedback>,
    pub load_error: Option<String>,
    pub is_submitting: bool,
    pub is_update_error: bool,
}

impl DetailSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == DetailPhase::Loading
    }

    pub fn is_editing(&self) -> bool {
        self.phase == DetailPhase::Editing
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == DetailPhase::Deleting
    }
}

/// Server round trip performed under the in-flight guard by
/// [`DetailViewModel::mutate`].
enum Mutation {
    Update(ValidDraft),
    AddTag(NewTag),
    AttachTag(TagId),
    DetachTag(TagId),
}

pub struct DetailViewModel<R> {
    repo: Arc<R>,
    state: Arc<Mutex<DetailState>>,
    on_changed: RefreshHook,
}

impl<R: SnippetRepository> DetailViewModel<R> {
    pub fn new(repo: Arc<R>, on_changed: RefreshHook) -> Self {
        Self {
            repo,
            state: Arc::new(Mutex::new(DetailState {
                id: None,
                phase: DetailPhase::Idle,
                snippet: None,
                draft: SnippetDraft::default(),
                feedback: None,
                load_error: None,
                is_submitting: false,
                is_update_error: false,
                generation: 0,
                disposed: false,
            })),
            on_changed,
        }
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        let state = self.state.lock();
        DetailSnapshot {
            id: state.id.clone(),
            phase: state.phase,
            snippet: state.snippet.clone(),
            draft: state.draft.clone(),
            feedback: state.feedback.clone(),
            load_error: state.load_error.clone(),
            is_submitting: state.is_submitting,
            is_update_error: state.is_update_error,
        }
    }

    /// Fetch `id` and show it. Called on mount and whenever the identifier
    /// changes; everything from the previous snippet is discarded.
    pub async fn load(&self, id: SnippetId) -> DetailPhase {
        let generation = {
            let mut state = self.state.lock();
            if state.disposed {
                return state.phase;
            }
            state.generation += 1;
            state.id = Some(id.clone());
            state.phase = DetailPhase::Loading;
            state.snippet = None;
            state.draft.clear();
            state.feedback = None;
            state.load_error = None;
            state.is_update_error = false;
            // A mutation still pending for the previous snippet no longer
            // blocks this one; its guard only clears its own generation.
            state.is_submitting = false;
            state.generation
        };
        debug!(%id, generation, "loading snippet");

        let result = self.repo.get_snippet(&id).await;

        let mut state = self.state.lock();
        if !state.is_current(generation) {
            debug!(%id, generation, "discarding stale snippet load");
            return state.phase;
        }
        match result {
            Ok(Some(snippet)) if snippet.is_displayable() => {
                state.snippet = Some(snippet);
                state.reseed_draft();
                state.phase = DetailPhase::Viewing;
            }
            Ok(Some(_)) => {
                state.load_error = Some(format!("Snippet {id} has an empty title or content."));
                state.phase = DetailPhase::LoadFailed;
            }
            Ok(None) => state.phase = DetailPhase::NotFound,
            Err(e) if e.is_not_found() => state.phase = DetailPhase::NotFound,
            Err(e) => {
                state.load_error = Some(e.to_string());
                state.phase = DetailPhase::LoadFailed;
            }
        }
        state.phase
    }

    /// Load the current identifier again, e.g. after `LoadFailed`.
    pub async fn retry(&self) -> DetailPhase {
        let id = self.state.lock().id.clone();
        match id {
            Some(id) => self.load(id).await,
            None => DetailPhase::Idle,
        }
    }

    /// `Viewing → Editing` with a fresh draft, or `Editing → Viewing` as a
    /// cancel. Ignored in any other phase, and while a save is in flight.
    pub fn toggle_edit(&self) -> DetailPhase {
        let mut state = self.state.lock();
        match state.phase {
            DetailPhase::Viewing if !state.is_submitting => {
                state.reseed_draft();
                state.feedback = None;
                state.is_update_error = false;
                state.phase = DetailPhase::Editing;
            }
            DetailPhase::Editing if !state.is_submitting => {
                Self::cancel_locked(&mut state);
            }
            _ => {}
        }
        state.phase
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel_edit(&self) -> DetailPhase {
        let mut state = self.state.lock();
        if state.phase == DetailPhase::Editing && !state.is_submitting {
            Self::cancel_locked(&mut state);
        }
        state.phase
    }

    fn cancel_locked(state: &mut DetailState) {
        state.reseed_draft();
        state.feedback = None;
        state.is_update_error = false;
        state.phase = DetailPhase::Viewing;
    }

    pub fn set_draft_title(&self, title: impl Into<String>) {
        let mut state = self.state.lock();
        if state.phase == DetailPhase::Editing {
            state.draft.title = title.into();
        }
    }

    pub fn set_draft_content(&self, content: impl Into<String>) {
        let mut state = self.state.lock();
        if state.phase == DetailPhase::Editing {
            state.draft.content = content.into();
        }
    }

    /// Save `draft` over the current snippet.
    ///
    /// On success the authoritative copy becomes the server's response, not
    /// the submitted draft. On failure the draft is kept for another try and
    /// `is_update_error` is set.
    pub async fn submit_edit(&self, draft: SnippetDraft) -> SubmitOutcome {
        let valid = {
            let mut state = self.state.lock();
            if state.is_submitting {
                return SubmitOutcome::Busy;
            }
            if state.phase != DetailPhase::Editing {
                return SubmitOutcome::NotAllowed;
            }
            state.draft = draft;
            match state.draft.validate() {
                Ok(valid) => valid,
                Err(e) => {
                    state.feedback = Some(Feedback::error(e.to_string()));
                    state.is_update_error = true;
                    return SubmitOutcome::Invalid(e);
                }
            }
        };
        self.mutate(DetailPhase::Editing, Mutation::Update(valid))
            .await
    }

    /// Save whatever the draft currently holds.
    pub async fn submit_current_edit(&self) -> SubmitOutcome {
        let draft = self.state.lock().draft.clone();
        self.submit_edit(draft).await
    }

    /// Create-or-get a tag by name and attach it to the current snippet.
    pub async fn add_tag(&self, name: &str) -> SubmitOutcome {
        let tag = match NewTag::new(name) {
            Ok(tag) => tag,
            Err(e) => {
                self.state.lock().feedback = Some(Feedback::error(e.to_string()));
                return SubmitOutcome::Invalid(e);
            }
        };
        self.mutate(DetailPhase::Viewing, Mutation::AddTag(tag))
            .await
    }

    /// Attach an existing tag by id.
    pub async fn attach_tag(&self, tag: TagId) -> SubmitOutcome {
        self.mutate(DetailPhase::Viewing, Mutation::AttachTag(tag))
            .await
    }

    pub async fn detach_tag(&self, tag: TagId) -> SubmitOutcome {
        self.mutate(DetailPhase::Viewing, Mutation::DetachTag(tag))
            .await
    }

    /// Run one mutation from `required` phase under the submit guard, then
    /// apply the server's revision and invalidate the list.
    async fn mutate(&self, required: DetailPhase, mutation: Mutation) -> SubmitOutcome {
        let (id, generation, in_flight) = {
            let mut state = self.state.lock();
            if state.is_submitting {
                return SubmitOutcome::Busy;
            }
            let Some(id) = state.id.clone() else {
                return SubmitOutcome::NotAllowed;
            };
            if state.phase != required || state.snippet.is_none() {
                return SubmitOutcome::NotAllowed;
            }
            state.is_submitting = true;
            state.feedback = None;
            state.is_update_error = false;
            let generation = state.generation;
            let in_flight = InFlight::new(self.state.clone(), move |s: &mut DetailState| {
                if s.generation == generation {
                    s.is_submitting = false;
                }
            });
            (id, generation, in_flight)
        };

        let (result, success_text) = match &mutation {
            Mutation::Update(valid) => (
                self.repo.update_snippet(&id, valid).await,
                "Snippet updated successfully!".to_string(),
            ),
            Mutation::AddTag(tag) => (
                self.attach_by_name(&id, tag).await,
                format!("Tag \"{}\" added.", tag.name()),
            ),
            Mutation::AttachTag(tag) => (
                self.repo.attach_tag(&id, tag).await,
                "Tag added.".to_string(),
            ),
            Mutation::DetachTag(tag) => (
                self.repo.detach_tag(&id, tag).await,
                "Tag removed.".to_string(),
            ),
        };

        {
            let mut state = self.state.lock();
            if !state.is_current(generation) {
                debug!(%id, generation, "discarding stale mutation result");
            } else {
                match &result {
                    Ok(updated) => {
                        state.snippet = Some(updated.clone());
                        state.reseed_draft();
                        state.phase = DetailPhase::Viewing;
                        state.feedback = Some(Feedback::success(success_text));
                    }
                    Err(e) => {
                        state.feedback = Some(Feedback::error(e.to_string()));
                        state.is_update_error = matches!(mutation, Mutation::Update(_));
                    }
                }
            }
        }
        drop(in_flight);

        match result {
            Ok(updated) => {
                info!(%id, "snippet updated");
                self.on_changed.trigger().await;
                SubmitOutcome::Saved(updated)
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    async fn attach_by_name(&self, id: &SnippetId, tag: &NewTag) -> Result<Snippet, RequestFailed> {
        let tag = self.repo.create_tag(tag).await?;
        self.repo.attach_tag(id, &tag.id).await
    }

    /// Delete the current snippet after `confirm` approves it.
    ///
    /// `confirm` is asked before any request is made and may block (for
    /// example on a terminal prompt); the state lock is not held while it
    /// runs. Only reachable from `Viewing`.
    pub async fn delete_current<F>(&self, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&Snippet) -> bool,
    {
        let (snippet, generation) = {
            let state = self.state.lock();
            match (state.phase, &state.snippet) {
                (DetailPhase::Deleting, _) => return DeleteOutcome::Busy,
                (DetailPhase::Viewing, Some(snippet)) if !state.is_submitting => {
                    (snippet.clone(), state.generation)
                }
                (DetailPhase::Viewing, Some(_)) => return DeleteOutcome::Busy,
                _ => return DeleteOutcome::NotAllowed,
            }
        };

        if !confirm(&snippet) {
            debug!(id = %snippet.id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        let in_flight = {
            let mut state = self.state.lock();
            if !state.is_current(generation) || state.phase != DetailPhase::Viewing {
                return DeleteOutcome::NotAllowed;
            }
            if state.is_submitting {
                return DeleteOutcome::Busy;
            }
            state.phase = DetailPhase::Deleting;
            state.feedback = None;
            InFlight::new(self.state.clone(), move |s: &mut DetailState| {
                if s.generation == generation && s.phase == DetailPhase::Deleting {
                    s.phase = DetailPhase::Viewing;
                }
            })
        };

        let result = self.repo.delete_snippet(&snippet.id).await;

        {
            let mut state = self.state.lock();
            if !state.is_current(generation) {
                debug!(id = %snippet.id, generation, "discarding stale delete result");
            } else {
                match &result {
                    Ok(()) => {
                        state.snippet = None;
                        state.draft.clear();
                        state.phase = DetailPhase::Deleted;
                    }
                    Err(e) => state.feedback = Some(Feedback::error(e.to_string())),
                }
            }
        }
        drop(in_flight);

        match result {
            Ok(()) => {
                info!(id = %snippet.id, "snippet deleted");
                self.on_changed.trigger().await;
                DeleteOutcome::Deleted { next: Route::List }
            }
            Err(e) => DeleteOutcome::Failed(e),
        }
    }

    /// Navigating away: later responses no longer touch this screen.
    pub fn dispose(&self) {
        self.state.lock().disposed = true;
    }
}
