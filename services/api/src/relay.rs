use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::Extension;
use tokio::sync::broadcast;
use tracing::debug;

use crate::infra::AppState;

/// Upgrade handler for the dashboard notification stream. Every published
/// notification is relayed to the socket as one JSON text frame.
pub(crate) async fn ws_handler(
    Extension(state): Extension<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    let receiver = state.notifications.subscribe();
    ws.on_upgrade(move |socket| relay(socket, receiver))
}

async fn relay(mut socket: WebSocket, mut receiver: broadcast::Receiver<String>) {
    loop {
        tokio::select! {
            published = receiver.recv() => match published {
                Ok(payload) => {
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "notification subscriber lagged; missed messages dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }
}
