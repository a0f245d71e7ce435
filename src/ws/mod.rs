//! WebSocket transport for the bridge — maps bus subscriptions to socket frames.
//!
//! Requires the `ws` feature. Uses axum for routing and the upgrade.
//!
//! ## Routes
//!
//! - `GET /subscribe` — WebSocket upgrade. Each connection gets its own
//!   [`BridgeQueue`] bound to every topic; every dequeued event becomes one
//!   outbound JSON text frame. An identity token may be presented via the
//!   `token` query parameter or the `Authorization` header; it is carried as
//!   connection metadata only.
//! - `POST /publish` — body = one `ChatEvent` JSON value, published on the bus.
//! - `GET /health` — health check returning `{ "ok": true, "topics": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use event_bridge::{ws, EventBus};
//!
//! let bus = EventBus::new();
//!
//! // Get the router to compose with other axum routes
//! let app = ws::router(bus.clone());
//!
//! // Or serve directly
//! ws::serve(bus, "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use serde_json::json;

use crate::bus::EventBus;
use crate::event::{ChatEvent, Topic};
use crate::queue::{BridgeQueue, RecvError};

/// Build an axum `Router` exposing the bridge over the given bus.
pub fn router(bus: EventBus) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/publish", post(publish_handler))
        .route("/subscribe", get(subscribe_handler))
        .with_state(bus)
}

/// Serve the bridge over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(bus: EventBus, addr: &str) -> Result<(), std::io::Error> {
    let app = router(bus);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "topics": [...] }`.
async fn health_handler() -> impl IntoResponse {
    let topics: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();
    Json(json!({ "ok": true, "topics": topics }))
}

/// `POST /publish` — publish one event on the bus.
///
/// An undeclared topic never reaches the bus: deserialization into
/// `ChatEvent` rejects it at this boundary with a client error.
async fn publish_handler(
    State(bus): State<EventBus>,
    Json(event): Json<ChatEvent>,
) -> impl IntoResponse {
    bus.publish(event);
    (StatusCode::OK, Json(json!({ "ok": true })))
}

/// `GET /subscribe` — upgrade and stream events until the client goes away.
async fn subscribe_handler(
    ws: WebSocketUpgrade,
    State(bus): State<EventBus>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = identity_token(&params, &headers);
    ws.on_upgrade(move |socket| handle_socket(socket, bus, token))
}

/// Extract the caller's identity token, if presented.
///
/// Query parameter `token` wins over the `Authorization` header. No
/// validation happens here — auth is the surrounding system's concern.
fn identity_token(params: &HashMap<String, String>, headers: &HeaderMap) -> Option<String> {
    params.get("token").cloned().or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    })
}

/// Per-connection pump: one queue in, one frame stream out.
async fn handle_socket(socket: WebSocket, bus: EventBus, token: Option<String>) {
    let queue = BridgeQueue::new();
    let binding = bus.bind_queue(&Topic::ALL, queue.clone());
    tracing::debug!(
        token = token.as_deref().unwrap_or("anonymous"),
        "subscription opened"
    );

    let (mut sink, mut stream) = socket.split();

    // Forward half: dequeue -> serialize -> one text frame per event.
    // Ends when the binding closes the queue or the socket rejects a send.
    let forward = tokio::spawn(async move {
        loop {
            match queue.dequeue().await {
                Ok(event) => {
                    let frame = match serde_json::to_string(&event) {
                        Ok(frame) => frame,
                        Err(err) => {
                            tracing::error!(%err, "dropping unserializable event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Inbound half: client frames are commands for the surrounding
    // request/response system, not this core — drain and ignore them.
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(%err, "socket read error");
                break;
            }
        }
    }

    // Cancellation sequence: unsubscribe so no further enqueues occur, then
    // close the queue so the forward half is released rather than left
    // suspended. Undelivered items are discarded with the queue.
    binding.close();
    let _ = forward.await;
    tracing::debug!("subscription closed");
}
