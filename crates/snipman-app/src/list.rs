use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use snipman_client::SnippetRepository;
use snipman_core::Snippet;

use crate::hook::RefreshHook;

pub const NO_SNIPPETS_MESSAGE: &str = "No snippets found.";

/// `Idle → Loading → (Loaded | Failed)`, re-entered on every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug)]
struct ListState {
    phase: ListPhase,
    snippets: Vec<Snippet>,
    error: Option<String>,
    generation: u64,
    disposed: bool,
}

/// Point-in-time copy of the list screen for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub snippets: Vec<Snippet>,
    pub error: Option<String>,
}

impl ListSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// The placeholder for a successful, empty result. Never shown together
    /// with an error.
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.phase == ListPhase::Loaded && self.snippets.is_empty()).then_some(NO_SNIPPETS_MESSAGE)
    }
}

/// The snippet collection. Always replaced wholesale from the backend.
pub struct ListViewModel<R> {
    repo: Arc<R>,
    state: Arc<Mutex<ListState>>,
}

impl<R> Clone for ListViewModel<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            state: self.state.clone(),
        }
    }
}

impl<R: SnippetRepository + 'static> ListViewModel<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            state: Arc::new(Mutex::new(ListState {
                phase: ListPhase::Idle,
                snippets: Vec::new(),
                error: None,
                generation: 0,
                disposed: false,
            })),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.state.lock();
        ListSnapshot {
            phase: state.phase,
            snippets: state.snippets.clone(),
            error: state.error.clone(),
        }
    }

    /// Re-fetch the whole collection.
    ///
    /// A refresh started while another is in flight supersedes it: only the
    /// latest request's answer is applied. On failure the collection is
    /// cleared so stale rows never sit next to an error.
    pub async fn refresh(&self) -> ListPhase {
        let generation = {
            let mut state = self.state.lock();
            if state.disposed {
                return state.phase;
            }
            state.generation += 1;
            state.phase = ListPhase::Loading;
            state.error = None;
            state.generation
        };
        debug!(generation, "refreshing snippet list");

        let result = self.repo.list_snippets().await;

        let mut state = self.state.lock();
        if state.disposed || state.generation != generation {
            debug!(generation, "discarding stale snippet list");
            return state.phase;
        }
        match result {
            Ok(snippets) => {
                debug!(count = snippets.len(), "snippet list loaded");
                state.snippets = snippets;
                state.phase = ListPhase::Loaded;
            }
            Err(e) => {
                state.snippets.clear();
                state.error = Some(e.to_string());
                state.phase = ListPhase::Failed;
            }
        }
        state.phase
    }

    /// Hook for sibling view-models to invalidate this list after a
    /// successful mutation.
    pub fn refresh_hook(&self) -> RefreshHook {
        let list = self.clone();
        RefreshHook::new(move || {
            let list = list.clone();
            async move {
                list.refresh().await;
            }
        })
    }

    /// Stop applying responses; in-flight refreshes complete as no-ops.
    pub fn dispose(&self) {
        self.state.lock().disposed = true;
    }
}
