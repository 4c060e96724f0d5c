//! Reply handlers.
//!
//! Each handler builds a fixed reply and sends it with the event's reply
//! token. Handlers are free functions; they hold no state.
//!
//! | Handler | Reply |
//! |---------|-------|
//! | [`follow::handle`] | greeting text + [`STICKER`] |
//! | [`message::handle`] | `"message"` (stub) |
//! | [`postback::handle`] | `"postback"` (stub) |
//! | [`group_notice`] | one-on-one-only notice + [`STICKER`] |

pub mod follow;
pub mod message;
pub mod postback;

use linebot_model::Message;
use linebot_transport::{ApiResult, MessagingApi};
use tracing::debug;

/// Sticker attached to the greeting and to the group notice, as
/// `(package_id, sticker_id)`.
pub const STICKER: (&str, &str) = ("11538", "51626522");

/// Text sent when the bot is messaged from a group or room.
pub const GROUP_NOTICE_TEXT: &str = "個人チャットのみで対応しています";

/// Returns a message for [`STICKER`].
pub fn sticker() -> Message {
    Message::sticker(STICKER.0, STICKER.1)
}

/// Tells a group or room that the bot only talks one-on-one.
pub async fn group_notice(api: &dyn MessagingApi, reply_token: &str) -> ApiResult<()> {
    debug!(reply_token, "Replying with group notice");
    let messages = vec![Message::text(GROUP_NOTICE_TEXT), sticker()];
    api.reply(reply_token, messages).await
}
