//! # LINE Messaging API data model
//!
//! Strongly-typed mirrors of the JSON schemas used by the LINE Messaging API:
//!
//! - [`event`]: webhook request bodies and the events they carry
//! - [`message`]: outbound message objects and quick replies
//! - [`template`]: template message payloads (buttons, confirm, carousel)
//! - [`action`]: action objects triggered by taps
//! - [`request`]: request bodies for the reply and multicast endpoints
//!
//! ## Model Hierarchy
//!
//! ```text
//! WebhookRequestBody { destination, events }
//! └── WebhookEvent { mode, timestamp, source, kind }
//!     ├── EventKind::Follow   { reply_token }
//!     ├── EventKind::Unfollow
//!     ├── EventKind::Message  { reply_token, message: InboundMessage }
//!     ├── EventKind::Postback { reply_token, postback: Postback }
//!     └── EventKind::Other(OtherEvent { event_type, fields })
//!
//! Message { content, quick_reply }
//! └── MessageContent::{Text, Sticker, Image, Video, Audio, Location,
//!                      Imagemap, Template(Template), Flex}
//! ```
//!
//! Every type serializes with the platform's camelCase field names and omits
//! optional fields that are `None`.

pub mod action;
pub mod event;
pub mod message;
pub mod request;
pub mod template;

pub use action::{Action, DatetimePickerMode};
pub use event::{
    ContentProvider, EventKind, EventSource, InboundMessage, OtherEvent, Postback,
    PostbackParams, SourceType, WebhookEvent, WebhookRequestBody,
};
pub use message::{
    ImagemapAction, ImagemapArea, Message, MessageContent, QuickReply, QuickReplyItem,
    QuickReplyItemType, Size,
};
pub use request::{MAX_MESSAGES, MAX_RECIPIENTS, MulticastRequest, ReplyRequest};
pub use template::{CarouselColumn, ImageCarouselColumn, Template};
