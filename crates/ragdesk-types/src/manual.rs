//! Manual upload payload and confirmation types.

use serde::{Deserialize, Serialize};

/// A manual file read into memory, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualFile {
    /// Original file name, sent as the part's filename.
    pub file_name: String,
    /// Declared media type (e.g. `text/plain`).
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ManualFile {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of a successful manual registration.
///
/// `confirmed_name` is the context name the server registered, which may
/// differ from the name the client submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfirmation {
    pub message: String,
    pub confirmed_name: String,
}
