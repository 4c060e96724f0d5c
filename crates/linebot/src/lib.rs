//! # linebot
//!
//! A LINE Messaging API webhook bot.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐     ┌─────────────┐     ┌──────────────────────┐     ┌──────────────────────┐
//! │ WebhookServer │────▶│ EventRouter │────▶│ follow / message /   │────▶│ HttpMessagingClient  │──▶ LINE
//! │ (axum)        │     │             │     │ postback / group     │     │ (reqwest)            │
//! └───────────────┘     └─────────────┘     └──────────────────────┘     └──────────────────────┘
//! ```
//!
//! - **Model** ([`model`]): webhook events and outbound messages as serde types
//! - **Transport** ([`transport`]): Messaging API client and webhook server
//! - **Framework** ([`framework`]): routing by source and event type, and the replies
//! - **Runtime** ([`runtime`]): configuration, logging and process lifecycle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linebot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = LineBotRuntime::builder().build()?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): load `linebot.toml`
//! - `json-log`: JSON log output

pub use linebot_framework as framework;
pub use linebot_model as model;
pub use linebot_runtime as runtime;
pub use linebot_transport as transport;

/// Commonly used types.
///
/// ```rust,ignore
/// use linebot::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use linebot_runtime::{LineBotConfig, LineBotRuntime};

    // Routing
    pub use linebot_framework::EventRouter;

    // Transport seams
    pub use linebot_transport::{
        ApiError, ApiResult, HttpMessagingClient, MessagingApi, WebhookHandler, WebhookServer,
    };

    // Outbound payloads
    pub use linebot_model::{
        Action, CarouselColumn, DatetimePickerMode, Message, QuickReply, QuickReplyItem, Template,
    };

    // Inbound events
    pub use linebot_model::{EventKind, EventSource, SourceType, WebhookEvent, WebhookRequestBody};
}
