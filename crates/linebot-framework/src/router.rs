//! Event router.
//!
//! Routing is a two-level match, first on the event source and then on the
//! event type:
//!
//! | Source | Event | Action |
//! |--------|-------|--------|
//! | `user` | `message` | [`handlers::message::handle`] |
//! | `user` | `follow` | [`handlers::follow::handle`] |
//! | `user` | `postback` | [`handlers::postback::handle`] |
//! | `user` | other | nothing |
//! | `group`, `room` | `message` | [`handlers::group_notice`] |
//! | `group`, `room` | other | nothing |
//! | unrecognized | any | error log, nothing sent |
//!
//! Every matched row issues exactly one reply call.

use std::sync::Arc;

use async_trait::async_trait;
use linebot_model::{EventKind, SourceType, WebhookEvent, WebhookRequestBody};
use linebot_transport::{ApiResult, MessagingApi, WebhookHandler};
use tracing::{Instrument, debug, debug_span, error};

use crate::handlers;

/// Routes webhook events to the reply handlers.
#[derive(Clone)]
pub struct EventRouter {
    api: Arc<dyn MessagingApi>,
}

impl EventRouter {
    /// Creates a router that replies through `api`.
    pub fn new(api: Arc<dyn MessagingApi>) -> Self {
        Self { api }
    }

    /// Handles a single event.
    ///
    /// An unrecognized source type is logged and treated as handled.
    ///
    /// # Errors
    /// Returns the error of the reply call, if one was made and failed.
    pub async fn handle_event(&self, event: &WebhookEvent) -> ApiResult<()> {
        match &event.source.source_type {
            SourceType::User => self.dispatch_user(event).await,
            SourceType::Group | SourceType::Room => self.dispatch_group(event).await,
            SourceType::Unknown(source_type) => {
                error!(
                    source_type = %source_type,
                    event_type = event.event_type(),
                    "Unrecognized event source, skipping event"
                );
                Ok(())
            }
        }
    }

    /// Handles every event of a webhook body, in order.
    ///
    /// Each event is handled to completion before the next one starts.
    ///
    /// # Errors
    /// The first failed reply call stops the batch; later events are not
    /// handled.
    pub async fn handle_request(&self, body: &WebhookRequestBody) -> ApiResult<()> {
        debug!(
            destination = %body.destination,
            events = body.events.len(),
            "Handling webhook request"
        );

        for event in &body.events {
            let span = debug_span!(
                "event",
                event_type = event.event_type(),
                source_type = %event.source.source_type,
            );
            self.handle_event(event).instrument(span).await?;
        }
        Ok(())
    }

    async fn dispatch_user(&self, event: &WebhookEvent) -> ApiResult<()> {
        let api = self.api.as_ref();
        match &event.kind {
            EventKind::Message {
                reply_token,
                message,
            } => handlers::message::handle(api, reply_token, message).await,
            EventKind::Follow { reply_token } => handlers::follow::handle(api, reply_token).await,
            EventKind::Postback {
                reply_token,
                postback,
            } => handlers::postback::handle(api, reply_token, postback).await,
            EventKind::Unfollow | EventKind::Other(_) => {
                debug!(event_type = event.event_type(), "Ignoring user event");
                Ok(())
            }
        }
    }

    async fn dispatch_group(&self, event: &WebhookEvent) -> ApiResult<()> {
        match &event.kind {
            EventKind::Message { reply_token, .. } => {
                handlers::group_notice(self.api.as_ref(), reply_token).await
            }
            _ => {
                debug!(event_type = event.event_type(), "Ignoring group event");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter").finish_non_exhaustive()
    }
}

#[async_trait]
impl WebhookHandler for EventRouter {
    async fn on_webhook(&self, body: WebhookRequestBody) -> ApiResult<()> {
        self.handle_request(&body).await
    }
}
