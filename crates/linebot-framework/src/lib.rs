//! # LINE bot framework
//!
//! Bot behaviour on top of the transport:
//!
//! - [`EventRouter`]: classifies each webhook event by source and type and
//!   calls the matching handler
//! - [`handlers`]: the fixed replies
//!
//! The router depends on the transport only through
//! [`MessagingApi`](linebot_transport::MessagingApi), and is itself a
//! [`WebhookHandler`](linebot_transport::WebhookHandler), so it plugs straight
//! into the webhook server.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use linebot_framework::EventRouter;
//! use linebot_transport::{HttpMessagingClient, WebhookServer};
//!
//! let client = Arc::new(HttpMessagingClient::new(token)?);
//! let router = Arc::new(EventRouter::new(client));
//! let handle = WebhookServer::new(router).listen("0.0.0.0:8080").await?;
//! ```

pub mod handlers;
pub mod router;

pub use router::EventRouter;
