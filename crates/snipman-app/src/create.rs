use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use snipman_client::SnippetRepository;
use snipman_core::SnippetDraft;

use crate::feedback::Feedback;
use crate::guard::InFlight;
use crate::hook::RefreshHook;
use crate::outcome::SubmitOutcome;

#[derive(Debug, Default)]
struct CreateState {
    draft: SnippetDraft,
    is_submitting: bool,
    feedback: Option<Feedback>,
    disposed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSnapshot {
    pub draft: SnippetDraft,
    pub is_submitting: bool,
    pub feedback: Option<Feedback>,
}

/// The "new snippet" form.
pub struct CreateViewModel<R> {
    repo: Arc<R>,
    state: Arc<Mutex<CreateState>>,
    on_created: RefreshHook,
}

impl<R: SnippetRepository> CreateViewModel<R> {
    pub fn new(repo: Arc<R>, on_created: RefreshHook) -> Self {
        Self {
            repo,
            state: Arc::new(Mutex::new(CreateState::default())),
            on_created,
        }
    }

    pub fn snapshot(&self) -> CreateSnapshot {
        let state = self.state.lock();
        CreateSnapshot {
            draft: state.draft.clone(),
            is_submitting: state.is_submitting,
            feedback: state.feedback.clone(),
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().draft.title = title.into();
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.state.lock().draft.content = content.into();
    }

    /// Submit `draft` as a new snippet.
    ///
    /// The draft becomes the form's content first, so it survives a
    /// validation or request failure untouched. It is cleared only when the
    /// server confirms the create.
    pub async fn submit(&self, draft: SnippetDraft) -> SubmitOutcome {
        let (valid, in_flight) = {
            let mut state = self.state.lock();
            if state.is_submitting {
                return SubmitOutcome::Busy;
            }
            state.draft = draft;
            let valid = match state.draft.validate() {
                Ok(valid) => valid,
                Err(e) => {
                    state.feedback = Some(Feedback::error(e.to_string()));
                    return SubmitOutcome::Invalid(e);
                }
            };
            state.is_submitting = true;
            state.feedback = None;
            let in_flight = InFlight::new(self.state.clone(), |s: &mut CreateState| {
                s.is_submitting = false
            });
            (valid, in_flight)
        };

        let result = self.repo.create_snippet(&valid).await;

        {
            let mut state = self.state.lock();
            if state.disposed {
                debug!("create finished after the form was discarded");
            } else {
                match &result {
                    Ok(created) => {
                        state.draft.clear();
                        state.feedback = Some(Feedback::success(format!(
                            "Snippet \"{}\" created successfully with ID: {}!",
                            created.title, created.id
                        )));
                    }
                    Err(e) => state.feedback = Some(Feedback::error(e.to_string())),
                }
            }
        }
        drop(in_flight);

        match result {
            Ok(created) => {
                info!(id = %created.id, "snippet created");
                self.on_created.trigger().await;
                SubmitOutcome::Saved(created)
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Submit whatever the form currently holds.
    pub async fn submit_current(&self) -> SubmitOutcome {
        let draft = self.state.lock().draft.clone();
        self.submit(draft).await
    }

    pub fn dispose(&self) {
        self.state.lock().disposed = true;
    }
}
