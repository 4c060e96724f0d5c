//! Outbound message objects.
//!
//! A [`Message`] is a [`MessageContent`] variant plus an optional
//! [`QuickReply`]. The content's `type` tag and fields are flattened into the
//! message object, matching the platform schema:
//!
//! ```text
//! {"type": "sticker", "packageId": "11538", "stickerId": "51626522"}
//! {"type": "text", "text": "Hi", "quickReply": {"items": [...]}}
//! ```
//!
//! # Example
//!
//! ```rust
//! use linebot_model::{Action, Message, QuickReply, QuickReplyItem};
//!
//! let greeting = Message::text("Hello").with_quick_reply(QuickReply::new(vec![
//!     QuickReplyItem::new(Action::message("Hi", "Hi")),
//! ]));
//! let sticker = Message::sticker("11538", "51626522");
//! assert_eq!(serde_json::to_value(&sticker).unwrap()["type"], "sticker");
//! # let _ = greeting;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::template::Template;

/// A message sent by the bot.
///
/// When several messages are sent at once, only the quick reply of the
/// last one is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(flatten)]
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<QuickReply>,
}

impl From<MessageContent> for Message {
    fn from(content: MessageContent) -> Self {
        Self {
            content,
            quick_reply: None,
        }
    }
}

impl Message {
    /// Creates a text message (max 5000 characters).
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text { text: text.into() }.into()
    }

    /// Creates a sticker message.
    ///
    /// See the platform's sticker list for valid package/sticker pairs.
    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        MessageContent::Sticker {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
        }
        .into()
    }

    /// Creates an image message. Both URLs must be HTTPS.
    pub fn image(
        original_content_url: impl Into<String>,
        preview_image_url: impl Into<String>,
    ) -> Self {
        MessageContent::Image {
            original_content_url: original_content_url.into(),
            preview_image_url: preview_image_url.into(),
        }
        .into()
    }

    /// Creates a location message.
    pub fn location(
        title: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        MessageContent::Location {
            title: title.into(),
            address: address.into(),
            latitude,
            longitude,
        }
        .into()
    }

    /// Creates a template message.
    pub fn template(alt_text: impl Into<String>, template: Template) -> Self {
        MessageContent::Template {
            alt_text: alt_text.into(),
            template,
        }
        .into()
    }

    /// Creates a Flex message from a raw flex container.
    pub fn flex(alt_text: impl Into<String>, contents: Value) -> Self {
        MessageContent::Flex {
            alt_text: alt_text.into(),
            contents,
        }
        .into()
    }

    /// Attaches a quick reply.
    pub fn with_quick_reply(mut self, quick_reply: QuickReply) -> Self {
        self.quick_reply = Some(quick_reply);
        self
    }

    /// Returns the wire name of the message type.
    pub fn message_type(&self) -> &'static str {
        self.content.as_str()
    }
}

/// Message content, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum MessageContent {
    Text { text: String },
    Sticker {
        package_id: String,
        sticker_id: String,
    },
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    Video {
        original_content_url: String,
        preview_image_url: String,
    },
    Audio {
        original_content_url: String,
        /// Length in milliseconds.
        duration: u64,
    },
    Location {
        /// Max 100 characters.
        title: String,
        /// Max 100 characters.
        address: String,
        latitude: f64,
        longitude: f64,
    },
    Imagemap {
        base_url: String,
        alt_text: String,
        base_size: Size,
        actions: Vec<ImagemapAction>,
    },
    Template {
        /// Max 400 characters.
        alt_text: String,
        template: Template,
    },
    Flex {
        alt_text: String,
        /// Flex container (bubble or carousel), passed through unchanged.
        contents: Value,
    },
}

impl MessageContent {
    /// Returns the wire name of this content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Sticker { .. } => "sticker",
            MessageContent::Image { .. } => "image",
            MessageContent::Video { .. } => "video",
            MessageContent::Audio { .. } => "audio",
            MessageContent::Location { .. } => "location",
            MessageContent::Imagemap { .. } => "imagemap",
            MessageContent::Template { .. } => "template",
            MessageContent::Flex { .. } => "flex",
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Tappable area of an imagemap, relative to the base size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagemapArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Action performed when an imagemap area is tapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum ImagemapAction {
    Uri {
        link_uri: String,
        area: ImagemapArea,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Message {
        text: String,
        area: ImagemapArea,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

/// Quick reply buttons shown at the bottom of the chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    /// Max 13.
    pub items: Vec<QuickReplyItem>,
}

impl QuickReply {
    /// Maximum number of items the platform accepts.
    pub const MAX_ITEMS: usize = 13;

    pub fn new(items: Vec<QuickReplyItem>) -> Self {
        Self { items }
    }
}

/// A single quick reply button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplyItem {
    #[serde(rename = "type", default)]
    pub item_type: QuickReplyItemType,
    pub action: Action,
    /// Icon shown at the start of the button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuickReplyItem {
    pub fn new(action: Action) -> Self {
        Self {
            item_type: QuickReplyItemType::Action,
            action,
            image_url: None,
        }
    }
}

/// Quick reply item type. The platform only defines `action`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickReplyItemType {
    #[default]
    Action,
}
