use thiserror::Error;

/// Input rejected before any network call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("company name must not be empty")]
    EmptyContextName,

    #[error("no manual file selected")]
    NoFileSelected,
}

/// Errors from the answer and upload backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("cannot reach the server: {0}")]
    Transport(String),

    #[error("server returned HTTP {code}")]
    Server { code: u16 },

    #[error("server returned no usable response body")]
    EmptyResponse,

    #[error("failed to read manual file: {0}")]
    FileRead(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Status code for server-side failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Server { code } => Some(*code),
            _ => None,
        }
    }
}

/// Errors from the local preference store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store I/O error: {0}")]
    Io(String),

    #[error("store contents are not valid: {0}")]
    Serialization(String),
}

/// Errors from the known-contexts registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from manual registration.
///
/// `Registry` means the upload itself succeeded but the confirmed name
/// could not be saved locally.
#[derive(Debug, Error)]
pub enum ManualError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("manual registered as '{confirmed_name}' but saving it locally failed: {source}")]
    Registry {
        confirmed_name: String,
        #[source]
        source: RegistryError,
    },
}
