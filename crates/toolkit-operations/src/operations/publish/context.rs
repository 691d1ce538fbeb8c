use std::sync::Arc;
use std::time::Duration;

use toolkit_core::ResourceId;

/// Pause between consecutive creation calls. Throughput throttling against
/// the backend's rate limit, not a correctness requirement, but dropping it
/// produces observable rate-limit errors.
const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Everything a publish needs besides the draft: the backend, the acting
/// user, and the pacing between calls. Passed in explicitly instead of
/// being read from ambient application state.
pub struct PublishContext<A> {
    api: Arc<A>,
    user_id: Option<ResourceId>,
    pacing: Duration,
}

impl<A> PublishContext<A> {
    /// `user_id` is the authenticated owner for the created toolkit, or
    /// `None` for explicit anonymous authorship.
    pub fn new(api: Arc<A>, user_id: Option<ResourceId>) -> Self {
        Self {
            api,
            user_id,
            pacing: DEFAULT_PACING,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn user_id(&self) -> Option<ResourceId> {
        self.user_id
    }

    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.pacing
    }
}
