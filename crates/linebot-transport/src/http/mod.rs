//! HTTP transport.
//!
//! This module provides the Messaging API client and the webhook server.

#[cfg(feature = "http-client")]
mod client;
#[cfg(feature = "http-client")]
pub use client::{HttpMessagingClient, HttpMessagingClientBuilder};

#[cfg(feature = "http-server")]
mod server;
#[cfg(feature = "http-server")]
pub use server::{ListenerHandle, WebhookServer};
