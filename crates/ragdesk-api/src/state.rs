//! Application state wiring all services together.
//!
//! Services are generic over the client/store/reader traits; AppState pins
//! them to the concrete infra implementations.

use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use ragdesk_core::chat::service::ChatService;
use ragdesk_core::manual::ManualService;
use ragdesk_core::registry::ContextRegistry;
use ragdesk_infra::config::{apply_server_override, load_client_config};
use ragdesk_infra::filesystem::{resolve_data_dir, LocalFileSystem};
use ragdesk_infra::http::HttpRemoteClient;
use ragdesk_infra::prefs::PrefsStore;
use ragdesk_types::config::ClientConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<HttpRemoteClient>;

pub type ConcreteManualService = ManualService<HttpRemoteClient, PrefsStore, LocalFileSystem>;

/// Shared application state for every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<HttpRemoteClient>,
    pub manual_service: Arc<ConcreteManualService>,
    pub config: ClientConfig,
}

impl AppState {
    /// Load configuration and wire the backend client and services.
    pub async fn init(server_override: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = apply_server_override(load_client_config(&data_dir).await, server_override);
        debug!(
            data_dir = %data_dir.display(),
            server = %config.server_url,
            "Client configuration loaded"
        );

        let client = Arc::new(
            HttpRemoteClient::new(&config).context("Failed to initialize the backend client")?,
        );

        let registry = ContextRegistry::new(
            PrefsStore::open_default(&data_dir),
            config.default_context.clone(),
        );
        let manual_service = ManualService::new(client.clone(), registry, LocalFileSystem::new());

        Ok(Self {
            client,
            manual_service: Arc::new(manual_service),
            config,
        })
    }

    /// Start a fresh chat service in `initial_context` (`None` = general mode).
    pub fn chat_service(&self, initial_context: Option<&str>) -> ConcreteChatService {
        ChatService::new(self.client.clone(), initial_context)
    }
}
