use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

type HookFn = dyn Fn() -> BoxFuture<'static, ()> + Send + Sync;

/// Function reference a view-model calls after a successful mutation so the
/// list can re-fetch from the backend. Not a data channel: it carries no
/// payload.
#[derive(Clone)]
pub struct RefreshHook(Arc<HookFn>);

impl RefreshHook {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Arc::new(move || f().boxed()))
    }

    /// A hook that does nothing, for screens with no list to invalidate.
    pub fn noop() -> Self {
        Self::new(|| async {})
    }

    pub async fn trigger(&self) {
        (self.0)().await
    }
}

impl fmt::Debug for RefreshHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshHook")
    }
}

impl Default for RefreshHook {
    fn default() -> Self {
        Self::noop()
    }
}
