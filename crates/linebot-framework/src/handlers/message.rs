//! Message events from one-on-one chats.

use linebot_model::{InboundMessage, Message};
use linebot_transport::{ApiResult, MessagingApi};
use tracing::debug;

/// Placeholder reply.
pub const REPLY_TEXT: &str = "message";

/// Replies to a user message.
///
/// This is a stub: the reply is always [`REPLY_TEXT`], whatever the
/// message contains.
pub async fn handle(
    api: &dyn MessagingApi,
    reply_token: &str,
    message: &InboundMessage,
) -> ApiResult<()> {
    debug!(reply_token, message_id = ?message.id(), "Replying to message");
    let messages = vec![Message::text(REPLY_TEXT)];
    api.reply(reply_token, messages).await
}
