//! Manual registration for company contexts.
//!
//! `ManualService` validates the form input, reads the manual through the
//! `ManualReader` port, uploads it, and records the server-confirmed context
//! name in the registry.

use std::path::Path;
use std::sync::Arc;

use ragdesk_types::error::{ClientError, ManualError, ValidationError};
use ragdesk_types::manual::{ManualFile, UploadConfirmation};
use tracing::{info, warn};

use crate::client::RemoteClient;
use crate::registry::{ContextRegistry, ContextStore};

/// Abstraction over reading a manual from local storage.
///
/// The `LocalFileSystem` adapter lives in ragdesk-infra.
pub trait ManualReader: Send + Sync {
    /// Read the file at `path` with its name and declared media type.
    fn read_manual(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<ManualFile, std::io::Error>> + Send;
}

/// Registers manuals and keeps the known-contexts registry in sync.
pub struct ManualService<R: RemoteClient, S: ContextStore, F: ManualReader> {
    client: Arc<R>,
    registry: ContextRegistry<S>,
    reader: F,
}

impl<R: RemoteClient, S: ContextStore, F: ManualReader> ManualService<R, S, F> {
    pub fn new(client: Arc<R>, registry: ContextRegistry<S>, reader: F) -> Self {
        Self {
            client,
            registry,
            reader,
        }
    }

    pub fn registry(&self) -> &ContextRegistry<S> {
        &self.registry
    }

    /// Upload the manual at `path` for `company_name`.
    ///
    /// Validation happens before any I/O: a blank name or a missing path is
    /// rejected without reading or sending anything. On success the name
    /// confirmed by the server, not the submitted one, is added to the
    /// registry. A blank confirmed name is treated as an empty response and
    /// nothing is recorded.
    pub async fn register(
        &self,
        company_name: &str,
        path: Option<&Path>,
    ) -> Result<UploadConfirmation, ManualError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(ClientError::from(ValidationError::EmptyContextName).into());
        }
        let path = path.ok_or(ClientError::Validation(ValidationError::NoFileSelected))?;

        let file = self
            .reader
            .read_manual(path)
            .await
            .map_err(|e| ClientError::FileRead(format!("{}: {e}", path.display())))?;

        info!(
            company = company_name,
            file = %file.file_name,
            media_type = %file.media_type,
            bytes = file.size_bytes(),
            "Uploading manual"
        );
        let confirmation = self.client.register_manual(company_name, file).await?;

        if confirmation.confirmed_name.trim().is_empty() {
            warn!(submitted = company_name, "Server confirmed the manual without a name");
            return Err(ClientError::EmptyResponse.into());
        }

        if confirmation.confirmed_name != company_name {
            warn!(
                submitted = company_name,
                confirmed = %confirmation.confirmed_name,
                "Server registered the manual under a different name"
            );
        }

        self.registry
            .add(&confirmation.confirmed_name)
            .await
            .map_err(|source| ManualError::Registry {
                confirmed_name: confirmation.confirmed_name.clone(),
                source,
            })?;

        info!(context = %confirmation.confirmed_name, "Manual registered");
        Ok(confirmation)
    }
}
