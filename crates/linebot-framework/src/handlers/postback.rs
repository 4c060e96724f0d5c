//! Postback events.

use linebot_model::{Message, Postback};
use linebot_transport::{ApiResult, MessagingApi};
use tracing::debug;

/// Placeholder reply.
pub const REPLY_TEXT: &str = "postback";

/// Replies to a postback action.
///
/// This is a stub: `data` and any date/time picker result are ignored and
/// the reply is always [`REPLY_TEXT`].
pub async fn handle(
    api: &dyn MessagingApi,
    reply_token: &str,
    postback: &Postback,
) -> ApiResult<()> {
    debug!(reply_token, data = %postback.data, "Replying to postback");
    let messages = vec![Message::text(REPLY_TEXT)];
    api.reply(reply_token, messages).await
}
