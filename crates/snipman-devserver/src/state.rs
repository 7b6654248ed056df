use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::SnippetStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<SnippetStore>>,
}

impl AppState {
    pub fn new(store: SnippetStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
