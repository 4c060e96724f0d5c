//! Webhook server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use linebot_model::WebhookRequestBody;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::error::TransportResult;
use crate::traits::WebhookHandler;

/// HTTP endpoint that receives webhook deliveries.
///
/// A single `POST` route is registered at [`path`](WebhookServer::path).
/// The request body is parsed into a [`WebhookRequestBody`] and handed to the
/// [`WebhookHandler`]:
///
/// | Outcome | Status |
/// |---------|--------|
/// | body is not a valid webhook body | `400 Bad Request` |
/// | handler returned an error | `500 Internal Server Error` |
/// | handler succeeded | `200 OK` |
///
/// No signature verification is performed.
pub struct WebhookServer {
    handler: Arc<dyn WebhookHandler>,
    path: String,
}

/// Shared state for the route.
struct ServerState {
    handler: Arc<dyn WebhookHandler>,
}

impl WebhookServer {
    /// Creates a server that serves `/webhook`.
    pub fn new(handler: Arc<dyn WebhookHandler>) -> Self {
        Self {
            handler,
            path: "/webhook".to_string(),
        }
    }

    /// Sets the route path. A leading `/` is added if missing.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }

    /// Builds the axum router without binding a socket.
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            handler: Arc::clone(&self.handler),
        });
        Router::new()
            .route(&self.path, post(webhook_handler))
            .with_state(state)
    }

    /// Binds `addr` and serves in a background task.
    pub async fn listen(&self, addr: &str) -> TransportResult<ListenerHandle> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        info!(addr = %local_addr, path = %self.path, "Webhook server listening");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let shutdown = async move {
            let _ = shutdown_rx.await;
        };
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, router);
            if let Err(e) = serve.with_graceful_shutdown(shutdown).await {
                error!(error = %e, "Webhook server error");
            }
            info!("Webhook server stopped");
        });

        Ok(ListenerHandle {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

/// Handle to a running [`WebhookServer`]. Dropping it stops the server.
pub struct ListenerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    /// Address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting requests and waits for in-flight ones to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

type WebhookResponse = Result<&'static str, (StatusCode, &'static str)>;

/// Webhook POST handler.
async fn webhook_handler(State(state): State<Arc<ServerState>>, body: Bytes) -> WebhookResponse {
    trace!(len = body.len(), body = %String::from_utf8_lossy(&body), "Received webhook POST");

    let request = match WebhookRequestBody::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to parse webhook body");
            return Err((StatusCode::BAD_REQUEST, "invalid webhook body"));
        }
    };

    debug!(
        destination = %request.destination,
        events = request.events.len(),
        "Parsed webhook body"
    );

    match state.handler.on_webhook(request).await {
        Ok(()) => Ok("ok"),
        Err(e) => {
            error!(error = %e, "Webhook processing failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "processing failed"))
        }
    }
}
