//! Follow events.

use linebot_model::Message;
use linebot_transport::{ApiResult, MessagingApi};
use tracing::debug;

use super::sticker;

/// Greeting sent to a new follower.
pub const GREETING_TEXT: &str = "フォローありがとう";

/// Greets a user who added the bot as a friend.
pub async fn handle(api: &dyn MessagingApi, reply_token: &str) -> ApiResult<()> {
    debug!(reply_token, "Replying to follow");
    let messages = vec![Message::text(GREETING_TEXT), sticker()];
    api.reply(reply_token, messages).await
}
