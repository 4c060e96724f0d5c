//! Process runtime: wires the client, the router and the webhook server.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use linebot_runtime::LineBotRuntime;
//!
//! // linebot.toml in the working directory, plus LINEBOT_* variables
//! let runtime = LineBotRuntime::builder().build()?;
//! runtime.run().await?;
//! ```

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use linebot_framework::EventRouter;
use linebot_transport::{HttpMessagingClient, ListenerHandle, MessagingApi, WebhookServer};
use tokio::signal;
use tracing::{debug, info};

use crate::config::{ConfigLoader, LineBotConfig, validate_config};
use crate::error::RuntimeResult;
use crate::logging;

/// The bot process.
///
/// Holds the validated configuration and the [`EventRouter`]. The access
/// token lives inside the Messaging API client built once here.
pub struct LineBotRuntime {
    config: LineBotConfig,
    router: Arc<EventRouter>,
}

impl LineBotRuntime {
    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from a configuration.
    ///
    /// Validates the configuration, initializes logging and builds the
    /// Messaging API client.
    pub fn from_config(config: LineBotConfig) -> RuntimeResult<Self> {
        validate_config(&config)?;
        logging::init_from_config(&config.logging);

        let client = HttpMessagingClient::builder(config.channel.access_token.clone())
            .base_url(config.channel.api_base_url.clone())
            .timeout(config.channel.timeout())
            .build()?;

        info!(
            api_base_url = %client.base_url(),
            log_level = %config.logging.level,
            "Runtime initialized from configuration"
        );

        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Creates a runtime that replies through `api` instead of the HTTP
    /// client. The configuration is used as is.
    pub fn with_api(config: LineBotConfig, api: Arc<dyn MessagingApi>) -> Self {
        Self {
            config,
            router: Arc::new(EventRouter::new(api)),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &LineBotConfig {
        &self.config
    }

    /// Returns the event router.
    pub fn router(&self) -> &Arc<EventRouter> {
        &self.router
    }

    /// Starts the webhook server.
    pub async fn start(&self) -> RuntimeResult<ListenerHandle> {
        let server = WebhookServer::new(self.router.clone())
            .path(self.config.server.path.clone());
        let handle = server.listen(&self.config.server.bind_addr()).await?;
        debug!(addr = %handle.local_addr(), "Webhook server started");
        Ok(handle)
    }

    /// Runs until Ctrl+C or SIGTERM.
    pub async fn run(&self) -> RuntimeResult<()> {
        let handle = self.start().await?;

        info!("LINE bot is now running. Press Ctrl+C to stop.");
        let result = wait_for_shutdown().await;

        info!("Stopping LINE bot");
        handle.shutdown().await;
        result
    }

    /// Runs until `shutdown` completes.
    pub async fn run_until<F>(&self, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()>,
    {
        let handle = self.start().await?;
        shutdown.await;
        handle.shutdown().await;
        Ok(())
    }
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM).
async fn wait_for_shutdown() -> RuntimeResult<()> {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::select! {
            result = signal::ctrl_c() => {
                result?;
                info!("Received Ctrl+C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down");
    }

    Ok(())
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a [`LineBotRuntime`] from configuration sources.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Sets a single key, e.g. `("server.port", 3000)`.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.config_loader = self.config_loader.set(key, value);
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: LineBotConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Loads the configuration and builds the runtime.
    pub fn build(self) -> RuntimeResult<LineBotRuntime> {
        let config = self.config_loader.load()?;
        LineBotRuntime::from_config(config)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::RuntimeError;
    use async_trait::async_trait;
    use linebot_model::Message;
    use linebot_transport::ApiResult;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        replies: Mutex<Vec<(String, Vec<Message>)>>,
    }

    #[async_trait]
    impl MessagingApi for RecordingApi {
        async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> ApiResult<()> {
            self.replies
                .lock()
                .push((reply_token.to_string(), messages));
            Ok(())
        }

        async fn push(&self, _to: Vec<String>, _messages: Vec<Message>) -> ApiResult<()> {
            Ok(())
        }
    }

    fn local_config() -> LineBotConfig {
        let mut config = LineBotConfig::default();
        config.channel.access_token = "token".into();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config
    }

    #[test]
    fn test_builder_rejects_missing_token() {
        let dir = tempfile::tempdir().unwrap();
        let result = LineBotRuntime::builder()
            .search_path(dir.path())
            .without_env()
            .build();

        assert!(matches!(
            result,
            Err(RuntimeError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_builder_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = LineBotRuntime::builder()
            .search_path(dir.path())
            .without_env()
            .set("channel.access_token", "token")
            .set("server.path", "/callback")
            .build()
            .unwrap();

        assert_eq!(runtime.config().server.path, "/callback");
    }

    #[tokio::test]
    async fn test_webhook_round_trip_over_socket() {
        let api = Arc::new(RecordingApi::default());
        let runtime = LineBotRuntime::with_api(local_config(), api.clone());
        let handle = runtime.start().await.unwrap();
        let url = format!("http://{}/webhook", handle.local_addr());

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(r#"{"destination":"U1","events":[{"type":"follow","mode":"active","timestamp":1,"source":{"type":"user","userId":"U1"},"replyToken":"T1"}]}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let response = client.post(&url).body("not json").send().await.unwrap();
        assert_eq!(response.status().as_u16(), 400);

        handle.shutdown().await;

        let replies = api.replies.lock();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].0, "T1");
        assert_eq!(
            replies[0].1,
            vec![
                Message::text("フォローありがとう"),
                Message::sticker("11538", "51626522"),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_until_returns_after_shutdown() {
        let runtime = LineBotRuntime::with_api(local_config(), Arc::new(RecordingApi::default()));
        runtime
            .run_until(tokio::time::sleep(std::time::Duration::from_millis(10)))
            .await
            .unwrap();
    }
}
