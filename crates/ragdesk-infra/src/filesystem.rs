//! Filesystem adapters for ragdesk.
//!
//! Implements the `ManualReader` trait from `ragdesk-core` for real file I/O
//! and resolves the data directory holding `config.toml` and preferences.

use std::path::{Path, PathBuf};

use ragdesk_core::manual::ManualReader;
use ragdesk_types::manual::ManualFile;

/// File name used when a path has no usable final component.
const FALLBACK_FILE_NAME: &str = "manual.txt";

/// Local filesystem implementation of the `ManualReader` trait.
///
/// All operations go through `tokio::fs` for async I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ManualReader for LocalFileSystem {
    async fn read_manual(&self, path: &Path) -> Result<ManualFile, std::io::Error> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();
        let media_type = detect_mime(&file_name);

        Ok(ManualFile {
            file_name,
            media_type,
            bytes,
        })
    }
}

/// Detect the declared media type of a manual from its extension.
///
/// Files without an extension are treated as plain text manuals.
pub fn detect_mime(filename: &str) -> String {
    let ext = match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return "text/plain".to_string(),
    };

    match ext.as_str() {
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "hwp" => "application/x-hwp",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `RAGDESK_DATA_DIR` environment variable
/// 2. `~/.ragdesk`
/// 3. `./.ragdesk` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RAGDESK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".ragdesk");
    }

    PathBuf::from(".ragdesk")
}
