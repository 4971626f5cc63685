//! RemoteClient trait definition.
//!
//! The backend is a plain request/response service: no retries, no
//! idempotency key, no streaming. Each call completes exactly once with
//! either a value or a `ClientError`.

use ragdesk_types::error::ClientError;
use ragdesk_types::manual::{ManualFile, UploadConfirmation};

/// Client for the answer and manual-upload backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// The HTTP implementation lives in ragdesk-infra (`HttpRemoteClient`).
pub trait RemoteClient: Send + Sync {
    /// Ask a question, optionally scoped to a company context.
    fn ask(
        &self,
        query: &str,
        context: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String, ClientError>> + Send;

    /// Upload a manual for `context_name`.
    ///
    /// The returned confirmation carries the name the server registered.
    fn register_manual(
        &self,
        context_name: &str,
        file: ManualFile,
    ) -> impl std::future::Future<Output = Result<UploadConfirmation, ClientError>> + Send;
}
