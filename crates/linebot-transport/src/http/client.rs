//! Messaging API client.

use std::time::Duration;

use async_trait::async_trait;
use linebot_model::{MAX_MESSAGES, MAX_RECIPIENTS, Message, MulticastRequest, ReplyRequest};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{ApiError, ApiResult, TransportError, TransportResult};
use crate::traits::MessagingApi;

const REPLY_PATH: &str = "/v2/bot/message/reply";
const MULTICAST_PATH: &str = "/v2/bot/message/multicast";

/// [`MessagingApi`] over HTTPS.
///
/// Every call is a single bearer-authenticated JSON POST. The response body
/// is not inspected; a non-2xx status becomes [`ApiError::Status`]. There is
/// no retry.
#[derive(Debug, Clone)]
pub struct HttpMessagingClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpMessagingClient {
    /// Production API host.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.line.me";

    /// Creates a client for the production API with a 30s timeout.
    pub fn new(access_token: impl Into<String>) -> TransportResult<Self> {
        Self::builder(access_token).build()
    }

    /// Creates a builder.
    pub fn builder(access_token: impl Into<String>) -> HttpMessagingClientBuilder {
        HttpMessagingClientBuilder {
            access_token: access_token.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Returns the API host this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json(&self, path: &str, body: Value) -> ApiResult<()> {
        let url = format!("{}{}", self.base_url, path);
        trace!(url = %url, body = %body, "Messaging API request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(url = %url, status = status.as_u16(), "Messaging API call succeeded");
        Ok(())
    }
}

#[async_trait]
impl MessagingApi for HttpMessagingClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> ApiResult<()> {
        if messages.len() > MAX_MESSAGES {
            warn!(
                count = messages.len(),
                max = MAX_MESSAGES,
                "Reply exceeds the message limit"
            );
        }

        let body = serde_json::to_value(ReplyRequest {
            reply_token: reply_token.to_string(),
            messages,
        })?;
        self.post_json(REPLY_PATH, body).await
    }

    async fn push(&self, to: Vec<String>, messages: Vec<Message>) -> ApiResult<()> {
        if messages.len() > MAX_MESSAGES {
            warn!(
                count = messages.len(),
                max = MAX_MESSAGES,
                "Push exceeds the message limit"
            );
        }
        if to.len() > MAX_RECIPIENTS {
            warn!(
                count = to.len(),
                max = MAX_RECIPIENTS,
                "Push exceeds the recipient limit"
            );
        }

        let body = serde_json::to_value(MulticastRequest { to, messages })?;
        self.post_json(MULTICAST_PATH, body).await
    }
}

/// Builder for [`HttpMessagingClient`].
#[derive(Debug, Clone)]
pub struct HttpMessagingClientBuilder {
    access_token: String,
    base_url: String,
    timeout: Duration,
}

impl HttpMessagingClientBuilder {
    /// Overrides the API host (e.g. a proxy or a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> TransportResult<HttpMessagingClient> {
        if self.access_token.is_empty() {
            return Err(TransportError::InvalidConfig(
                "channel access token is empty".to_string(),
            ));
        }

        let client = ClientBuilder::new()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;

        Ok(HttpMessagingClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            access_token: self.access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpMessagingClient {
        HttpMessagingClient::builder("test_token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_reply_posts_token_and_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("Authorization", "Bearer test_token"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "replyToken": "T1",
                "messages": [
                    {"type": "text", "text": "hi"},
                    {"type": "sticker", "packageId": "11538", "stickerId": "51626522"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .reply(
                "T1",
                vec![Message::text("hi"), Message::sticker("11538", "51626522")],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_push_uses_multicast_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/multicast"))
            .and(header("Authorization", "Bearer test_token"))
            .and(body_json(json!({
                "to": ["U1", "U2"],
                "messages": [{"type": "text", "text": "news"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .push(vec!["U1".into(), "U2".into()], vec![Message::text("news")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        let rejection = r#"{"message":"Invalid reply token"}"#;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(ResponseTemplate::new(400).set_body_string(rejection))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .reply("expired", vec![Message::text("late")])
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid reply token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpMessagingClient::builder("test_token")
            .base_url(format!("http://{addr}"))
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client
            .reply("T1", vec![Message::text("hi")])
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::Request(_)),
            "unexpected error: {err:?}"
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_reply_over_message_limit_is_sent_whole() {
        let messages: Vec<Message> = (0..6).map(|i| Message::text(format!("m{i}"))).collect();
        let expected: Vec<Value> = (0..6)
            .map(|i| json!({"type": "text", "text": format!("m{i}")}))
            .collect();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(body_json(json!({"replyToken": "T1", "messages": expected})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (logs, _guard) = capture_logs();
        client_for(&server).reply("T1", messages).await.unwrap();

        let logs = logs.contents();
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Reply exceeds the message limit"), "{logs}");
    }

    #[tokio::test]
    async fn test_push_over_recipient_limit_is_sent_whole() {
        let to: Vec<String> = (0..151).map(|i| format!("U{i}")).collect();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/multicast"))
            .and(body_json(json!({
                "to": to,
                "messages": [{"type": "text", "text": "news"}]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (logs, _guard) = capture_logs();
        client_for(&server)
            .push(to.clone(), vec![Message::text("news")])
            .await
            .unwrap();

        let logs = logs.contents();
        assert!(logs.contains("Push exceeds the recipient limit"), "{logs}");
        assert!(!logs.contains("Push exceeds the message limit"), "{logs}");
    }

    #[test]
    fn test_builder_rejects_empty_token() {
        assert!(matches!(
            HttpMessagingClient::new(""),
            Err(TransportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = HttpMessagingClient::builder("t")
            .base_url("http://localhost:9000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");

        let client = HttpMessagingClient::new("t").unwrap();
        assert_eq!(client.base_url(), HttpMessagingClient::DEFAULT_BASE_URL);
    }
}
