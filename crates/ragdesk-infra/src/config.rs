//! Client configuration loader for ragdesk.
//!
//! Reads `config.toml` from the data directory (`~/.ragdesk/` in production)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use ragdesk_types::config::ClientConfig;

/// Minimum request timeout, so a typo cannot make every ask fail instantly.
const MIN_TIMEOUT_SECS: u64 = 1;

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config with timeouts clamped to at least one second.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(mut config) => {
            config.connect_timeout_secs = config.connect_timeout_secs.max(MIN_TIMEOUT_SECS);
            config.request_timeout_secs = config.request_timeout_secs.max(MIN_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply a command-line server override on top of the loaded config.
///
/// Blank overrides are ignored.
pub fn apply_server_override(mut config: ClientConfig, server: Option<&str>) -> ClientConfig {
    if let Some(url) = server.map(str::trim).filter(|u| !u.is_empty()) {
        config.server_url = url.to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_client_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_client_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn load_client_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
server_url = "http://127.0.0.1:5000/"
connect_timeout_secs = 3
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.server_url, "http://127.0.0.1:5000/");
        assert_eq!(config.connect_timeout_secs, 3);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn load_client_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn load_client_config_clamps_zero_timeouts() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "connect_timeout_secs = 0\nrequest_timeout_secs = 0\n",
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.connect_timeout_secs, MIN_TIMEOUT_SECS);
        assert_eq!(config.request_timeout_secs, MIN_TIMEOUT_SECS);
    }

    #[test]
    fn apply_server_override_replaces_url() {
        let config = apply_server_override(ClientConfig::default(), Some("http://10.1.1.1:5000"));
        assert_eq!(config.server_url, "http://10.1.1.1:5000");
    }

    #[test]
    fn apply_server_override_ignores_blank() {
        let config = apply_server_override(ClientConfig::default(), Some("  "));
        assert_eq!(config, ClientConfig::default());
        let config = apply_server_override(ClientConfig::default(), None);
        assert_eq!(config, ClientConfig::default());
    }
}
