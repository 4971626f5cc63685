//! HttpRemoteClient -- concrete [`RemoteClient`] implementation over reqwest.
//!
//! Talks to the answer service at a single base address:
//! `POST /chat` (JSON) and `POST /upload` (multipart/form-data).
//!
//! Failure mapping:
//! - connect failure or timeout -> [`ClientError::Transport`]
//! - non-2xx status -> [`ClientError::Server`]
//! - 2xx with a missing or unparseable body -> [`ClientError::EmptyResponse`]

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ragdesk_core::client::RemoteClient;
use ragdesk_types::api::{ChatRequest, ChatResponse, UploadResponse};
use ragdesk_types::config::ClientConfig;
use ragdesk_types::error::ClientError;
use ragdesk_types::manual::{ManualFile, UploadConfirmation};

/// Backend client for the answer and manual-upload endpoints.
///
/// Constructed once at startup and passed to the services that need it.
#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteClient {
    /// Build a client from configuration.
    ///
    /// Timeouts come from `connect_timeout_secs` and `request_timeout_secs`;
    /// there is no other retry or cancellation policy.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.server_url),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Transport(format!("request timed out: {e}"))
    } else {
        ClientError::Transport(e.to_string())
    }
}

/// Check the status and decode a JSON success body.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body_len = error_body.len(), "Backend returned error status");
        debug!(body = %error_body, "Backend error body");
        return Err(ClientError::Server {
            code: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(transport_error)?;
    if body.is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body_len = body.len(), "Backend success body did not parse");
        ClientError::EmptyResponse
    })
}

impl RemoteClient for HttpRemoteClient {
    async fn ask(&self, query: &str, context: Option<&str>) -> Result<String, ClientError> {
        let body = ChatRequest {
            query: query.to_string(),
            company_name: context.map(ToString::to_string),
        };
        let url = self.url("chat");
        debug!(url = %url, context = ?context, "POST chat");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let chat: ChatResponse = decode_response(response).await?;
        Ok(chat.answer)
    }

    async fn register_manual(
        &self,
        context_name: &str,
        file: ManualFile,
    ) -> Result<UploadConfirmation, ClientError> {
        let url = self.url("upload");
        debug!(
            url = %url,
            company = context_name,
            file = %file.file_name,
            bytes = file.size_bytes(),
            "POST upload"
        );

        let company_part = Part::text(context_name.to_string())
            .mime_str("text/plain")
            .map_err(transport_error)?;

        let media_type = file.media_type;
        let file_part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&media_type)
            .map_err(|e| ClientError::FileRead(format!("invalid media type '{media_type}': {e}")))?;

        let form = Form::new()
            .part("companyName", company_part)
            .part("file", file_part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let upload: UploadResponse = decode_response(response).await?;
        Ok(UploadConfirmation {
            message: upload.message,
            confirmed_name: upload.company_name,
        })
    }
}
