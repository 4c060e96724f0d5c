//! Request bodies for the message sending endpoints.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Maximum number of messages in one reply or push call.
pub const MAX_MESSAGES: usize = 5;

/// Maximum number of recipients in one multicast call.
pub const MAX_RECIPIENTS: usize = 150;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<Message>,
}

/// Body of `POST /v2/bot/message/multicast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticastRequest {
    /// User IDs.
    pub to: Vec<String>,
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_request_shape() {
        let request = ReplyRequest {
            reply_token: "T1".into(),
            messages: vec![Message::text("hi")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"replyToken": "T1", "messages": [{"type": "text", "text": "hi"}]})
        );
    }

    #[test]
    fn test_multicast_request_shape() {
        let request = MulticastRequest {
            to: vec!["U1".into(), "U2".into()],
            messages: vec![Message::sticker("11538", "51626522")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "to": ["U1", "U2"],
                "messages": [{"type": "sticker", "packageId": "11538", "stickerId": "51626522"}]
            })
        );
    }
}
