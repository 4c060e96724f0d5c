//! Seams between the transport and the bot logic.

use async_trait::async_trait;
use linebot_model::{Message, WebhookRequestBody};

use crate::error::ApiResult;

/// Outbound half of the Messaging API.
///
/// | Method | Endpoint | Limit |
/// |--------|----------|-------|
/// | [`reply`](MessagingApi::reply) | `/v2/bot/message/reply` | 5 messages |
/// | [`push`](MessagingApi::push) | `/v2/bot/message/multicast` | 5 messages, 150 recipients |
///
/// Limits are the caller's responsibility; implementations do not truncate.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Replies to the event that issued `reply_token`.
    ///
    /// A reply token can be used once.
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> ApiResult<()>;

    /// Sends `messages` to every user in `to`.
    async fn push(&self, to: Vec<String>, messages: Vec<Message>) -> ApiResult<()>;
}

/// Receives parsed webhook bodies from the server.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Processes one webhook delivery.
    ///
    /// # Errors
    /// Any error is reported to the platform as a failed delivery.
    async fn on_webhook(&self, body: WebhookRequestBody) -> ApiResult<()>;
}
