//! Webhook events delivered by the LINE platform.
//!
//! # Shape
//!
//! ```text
//! WebhookRequestBody { destination, events: [WebhookEvent] }
//! WebhookEvent { type, mode, timestamp, source, ...type-specific fields }
//! ```
//!
//! The `type` discriminator and its payload are flattened into [`EventKind`],
//! so a single `serde_json` pass produces the fully typed event. Event types
//! this crate does not model (e.g. `join`, `beacon`) parse as
//! [`EventKind::Other`] rather than failing the whole batch; their `type`
//! and remaining fields are kept as received.
//!
//! The source `type` is kept as a [`SourceType`] that preserves unrecognized
//! values verbatim, so callers can report them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body POSTed to the webhook URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequestBody {
    /// User ID of the bot that should receive the events.
    pub destination: String,
    /// Events in delivery order.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

impl WebhookRequestBody {
    /// Parses a raw webhook body.
    pub fn from_slice(raw: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(raw)
    }
}

/// A single webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Type discriminator and type-specific payload.
    #[serde(flatten)]
    pub kind: EventKind,
    /// Channel state ("active" or "standby").
    pub mode: String,
    /// Time of the event in milliseconds since the epoch.
    pub timestamp: i64,
    /// Where the event happened.
    pub source: EventSource,
    /// Platform-assigned event ID, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_event_id: Option<String>,
}

impl WebhookEvent {
    /// Returns the wire name of the event type.
    pub fn event_type(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the reply token, if this event type carries one.
    pub fn reply_token(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Message { reply_token, .. }
            | EventKind::Follow { reply_token }
            | EventKind::Postback { reply_token, .. } => Some(reply_token),
            EventKind::Other(other) => other.reply_token(),
            EventKind::Unfollow => None,
        }
    }
}

/// Event type and its payload, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum EventKind {
    /// A message was sent to the bot.
    Message {
        reply_token: String,
        message: InboundMessage,
    },
    /// The bot was added as a friend or unblocked.
    Follow { reply_token: String },
    /// The bot was blocked.
    Unfollow,
    /// A postback action was performed.
    Postback {
        reply_token: String,
        postback: Postback,
    },
    /// Any event type not modeled here.
    #[serde(untagged)]
    Other(OtherEvent),
}

impl EventKind {
    /// Returns the wire name of this event type.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Message { .. } => "message",
            EventKind::Follow { .. } => "follow",
            EventKind::Unfollow => "unfollow",
            EventKind::Postback { .. } => "postback",
            EventKind::Other(other) => &other.event_type,
        }
    }
}

const MODELED_EVENT_TYPES: [&str; 4] = ["message", "follow", "unfollow", "postback"];

/// An event of a type without a dedicated [`EventKind`] variant.
///
/// A modeled type with a malformed payload is rejected instead of landing
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOtherEvent")]
pub struct OtherEvent {
    /// The `type` as received, e.g. `join`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Every other type-specific field, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl OtherEvent {
    /// Returns `replyToken` when the event carries one (e.g. `join`).
    pub fn reply_token(&self) -> Option<&str> {
        self.fields.get("replyToken").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
struct RawOtherEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl TryFrom<RawOtherEvent> for OtherEvent {
    type Error = String;

    fn try_from(raw: RawOtherEvent) -> Result<Self, Self::Error> {
        if MODELED_EVENT_TYPES.contains(&raw.event_type.as_str()) {
            return Err(format!("malformed `{}` event", raw.event_type));
        }
        Ok(Self {
            event_type: raw.event_type,
            fields: raw.fields,
        })
    }
}

/// Where an event originated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Sending user. Always set for `user`; set for group/room when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl EventSource {
    /// Creates a one-on-one chat source.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::User,
            user_id: Some(user_id.into()),
            group_id: None,
            room_id: None,
        }
    }

    /// Creates a group chat source.
    pub fn group(group_id: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Group,
            user_id: None,
            group_id: Some(group_id.into()),
            room_id: None,
        }
    }

    /// Creates a multi-person chat source.
    pub fn room(room_id: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Room,
            user_id: None,
            group_id: None,
            room_id: Some(room_id.into()),
        }
    }

    /// Returns the ID that identifies this source according to its type.
    pub fn id(&self) -> Option<&str> {
        match self.source_type {
            SourceType::User => self.user_id.as_deref(),
            SourceType::Group => self.group_id.as_deref(),
            SourceType::Room => self.room_id.as_deref(),
            SourceType::Unknown(_) => None,
        }
    }
}

/// Source type discriminator.
///
/// Unrecognized values are kept verbatim in [`SourceType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    User,
    Group,
    Room,
    Unknown(String),
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::User => "user",
            SourceType::Group => "group",
            SourceType::Room => "room",
            SourceType::Unknown(other) => other,
        }
    }
}

impl From<String> for SourceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => SourceType::User,
            "group" => SourceType::Group,
            "room" => SourceType::Room,
            _ => SourceType::Unknown(value),
        }
    }
}

impl From<SourceType> for String {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a message sent by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum InboundMessage {
    Text { id: String, text: String },
    Image {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_provider: Option<ContentProvider>,
    },
    Video { id: String },
    Audio { id: String },
    File { id: String },
    Location { id: String },
    Sticker { id: String },
    /// Any message type not modeled here.
    #[serde(other)]
    Unsupported,
}

impl InboundMessage {
    /// Returns the message ID, if the type is modeled.
    pub fn id(&self) -> Option<&str> {
        match self {
            InboundMessage::Text { id, .. }
            | InboundMessage::Image { id, .. }
            | InboundMessage::Video { id }
            | InboundMessage::Audio { id }
            | InboundMessage::File { id }
            | InboundMessage::Location { id }
            | InboundMessage::Sticker { id } => Some(id),
            InboundMessage::Unsupported => None,
        }
    }
}

/// Where the content of an image message is hosted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProvider {
    /// "line" or "external".
    #[serde(rename = "type")]
    pub provider_type: String,
    /// Only for "external".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content_url: Option<String>,
    /// Only for "external".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

/// Postback payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    /// The `data` of the postback action that was tapped.
    pub data: String,
    /// Value chosen through a date/time picker action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PostbackParams>,
}

/// Date/time picker result. Exactly one field is set, matching the picker mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostbackParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
}
