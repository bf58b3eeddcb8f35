//! WebSocket connection handlers.
//!
//! One task pair per connection: a receive loop that feeds inbound frames
//! through the send-message pipeline, and a send task that drains this
//! connection's channel onto the socket. Broadcast payloads arrive on the
//! channel already serialized and are forwarded verbatim.
//!
//! Malformed frame policy: a frame whose `message` field is missing or not a
//! string gets one `{"error": ...}` frame back, then the connection closes.
//! Store failures are also reported with an error frame but leave the
//! connection open.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::hub::room_group;
use crate::infrastructure::dto::websocket::{ErrorFrame, InboundChatFrame};
use crate::ui::state::AppState;
use crate::usecase::SendMessageUseCase;

/// `GET /ws/chat/{room_id}` — upgrade and hand the socket to
/// [`handle_socket`].
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, room_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: i64) {
    let group = room_group(room_id);
    let connection_id = Uuid::new_v4();

    // Register with the hub before reading anything, so broadcasts from
    // other connections reach this one from the first moment it is open.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.hub.join(&group, connection_id, tx.clone()).await;
    tracing::info!("Connection {} joined {}", connection_id, group);

    let (mut sender, mut receiver) = socket.split();

    // Forward everything queued for this connection to the socket, verbatim.
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let usecase = SendMessageUseCase::new(state.repository.clone(), state.hub.clone());
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    let inbound = match serde_json::from_str::<InboundChatFrame>(&text) {
                        Ok(inbound) => inbound,
                        Err(e) => {
                            tracing::warn!(
                                "Malformed frame on {}: {}. Closing connection.",
                                connection_id,
                                e
                            );
                            let error = ErrorFrame::new(format!("malformed payload: {e}"));
                            let _ = tx.send(serde_json::to_string(&error).unwrap());
                            // malformed input is fatal to the connection
                            break;
                        }
                    };

                    if let Err(e) = usecase.execute(room_id, inbound.user, inbound.message).await {
                        tracing::warn!("Failed to send message on {}: {}", connection_id, e);
                        let error = ErrorFrame::new(e.to_string());
                        let _ = tx.send(serde_json::to_string(&error).unwrap());
                        // store/validation failures leave the connection open
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                // Ping/pong is answered by the protocol layer; binary frames
                // carry nothing in this protocol.
                _ => {}
            }
        }
    });

    // Leaving the hub must happen on every exit path. When the receive side
    // finishes first, removing the hub entry drops the last channel sender,
    // so the send task drains what was already queued (error frames
    // included) and then ends on its own.
    tokio::select! {
        _ = &mut recv_task => {
            state.hub.leave(&group, connection_id).await;
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            state.hub.leave(&group, connection_id).await;
        }
    }

    tracing::info!("Connection {} left {}", connection_id, group);
}
