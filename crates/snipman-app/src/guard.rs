use std::sync::Arc;

use parking_lot::Mutex;

/// Single-slot in-flight token.
///
/// Created after the caller has set its busy flag under the lock; dropping
/// it runs `release` under the lock again, so the flag is cleared on every
/// exit path. `release` may capture what it needs to decide whether the
/// flag still belongs to this token. The state lock must not be held when
/// the token is dropped.
pub(crate) struct InFlight<S> {
    state: Arc<Mutex<S>>,
    release: Option<Box<dyn FnOnce(&mut S) + Send>>,
}

impl<S> InFlight<S> {
    pub(crate) fn new<F>(state: Arc<Mutex<S>>, release: F) -> Self
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        Self {
            state,
            release: Some(Box::new(release)),
        }
    }
}

impl<S> Drop for InFlight<S> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            let mut state = self.state.lock();
            release(&mut state);
        }
    }
}
