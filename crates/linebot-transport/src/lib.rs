//! # LINE bot transport
//!
//! Network plumbing between the bot and the LINE platform.
//!
//! ## Features
//!
//! - `http-client` (default): [`HttpMessagingClient`], the reqwest-backed
//!   Messaging API client
//! - `http-server` (default): [`WebhookServer`], the axum webhook endpoint
//!
//! ## Architecture
//!
//! ```text
//!              POST /webhook                      POST /v2/bot/message/reply
//! LINE ──────────────────────▶ WebhookServer      ┌──────────────────────────▶ LINE
//!                                   │              │
//!                                   ▼              │
//!                            WebhookHandler ──▶ MessagingApi
//!                           (implemented by the event router)
//! ```
//!
//! The two traits in [`traits`] are the seams: the router only sees
//! [`MessagingApi`], and the server only sees [`WebhookHandler`], so both sides
//! can be exercised in isolation.

pub mod error;
pub mod traits;

#[cfg(any(feature = "http-client", feature = "http-server"))]
pub mod http;

pub use error::{ApiError, ApiResult, TransportError, TransportResult};
pub use traits::{MessagingApi, WebhookHandler};

#[cfg(feature = "http-client")]
pub use http::{HttpMessagingClient, HttpMessagingClientBuilder};

#[cfg(feature = "http-server")]
pub use http::{ListenerHandle, WebhookServer};
