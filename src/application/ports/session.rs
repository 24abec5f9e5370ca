use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Server-side browser sessions. Constructed at startup and injected into the
/// HTTP state; there is no process-global store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a new authenticated session and return its opaque id.
    async fn open(&self) -> ApplicationResult<String>;

    /// Return true if the session exists, has not expired and was not revoked.
    async fn is_authenticated(&self, session_id: &str) -> ApplicationResult<bool>;

    /// Revoke the given session id (e.g. on logout). Unknown ids are ignored.
    async fn revoke(&self, session_id: &str) -> ApplicationResult<()>;
}
