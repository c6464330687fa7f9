//! WebSocket connection handler: the gateway's front door.
//!
//! One socket task per connection. Intents are parsed, dispatched to the
//! use cases, and any failure is answered with a scoped `error` fact on
//! this connection only. A connection's bad input never reaches the
//! rest of the room, and no handler path panics.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use flashtrack_shared::protocol::{ClientEvent, ServerEvent};

use crate::domain::{ConnectionId, RoomId, Username};
use crate::usecase::GameError;

use super::super::state::AppState;

/// Room/name pair a connection is currently associated with.
type Session = Option<(RoomId, Username)>;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn_id: ConnectionId = Uuid::new_v4();
    let (sender, receiver) = socket.split();

    // Outbound channel for this client; the pusher owns the sender side.
    let (tx, rx) = mpsc::unbounded_channel();
    state.pusher.register(conn_id, tx).await;
    state.metrics.connection_opened();
    tracing::info!("connection {} opened", conn_id);

    let session: Arc<Mutex<Session>> = Arc::new(Mutex::new(None));

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(recv_loop(
        receiver,
        state.clone(),
        conn_id,
        session.clone(),
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Abrupt disconnect is an implicit leave, same path as the explicit
    // event, using the connection's stored room and name.
    if let Some((room_id, username)) = session.lock().await.take() {
        if let Err(e) = state
            .leave_room
            .execute(conn_id, &room_id, &username)
            .await
        {
            tracing::warn!("disconnect cleanup failed for {}: {}", conn_id, e);
        }
    }
    state.pusher.unregister(&conn_id).await;
    state.metrics.connection_closed();
    tracing::info!("connection {} closed", conn_id);
}

async fn recv_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    state: Arc<AppState>,
    conn_id: ConnectionId,
    session: Arc<Mutex<Session>>,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("websocket error on {}: {}", conn_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let event = match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!("malformed payload from {}: {}", conn_id, e);
                        let error = GameError::MalformedPayload(e.to_string());
                        send_error(&state, &conn_id, &error).await;
                        continue;
                    }
                };

                if let Err(error) = dispatch(&state, conn_id, &session, event).await {
                    send_error(&state, &conn_id, &error).await;
                }
            }
            Message::Ping(_) => {
                // Ping/pong is handled by the protocol layer.
                tracing::debug!("ping from {}", conn_id);
            }
            Message::Close(_) => {
                tracing::info!("connection {} requested close", conn_id);
                break;
            }
            _ => {}
        }
    }
}

/// Route one intent to its use case.
async fn dispatch(
    state: &Arc<AppState>,
    conn_id: ConnectionId,
    session: &Arc<Mutex<Session>>,
    event: ClientEvent,
) -> Result<(), GameError> {
    state.metrics.event_received(event_name(&event));

    match event {
        ClientEvent::Join { room_id, username } => {
            // Re-joining from the same connection moves it: leave the
            // previous room first so the membership invariant holds.
            let previous = session.lock().await.take();
            if let Some((old_room, old_name)) = previous {
                state
                    .leave_room
                    .execute(conn_id, &old_room, &old_name)
                    .await?;
            }

            let (room_id, username, _state) = state
                .join_room
                .execute(conn_id, room_id, username)
                .await?;
            *session.lock().await = Some((room_id, username));
            Ok(())
        }
        ClientEvent::Leave { room_id: _ } => {
            let Some((room_id, username)) = session.lock().await.take() else {
                return Err(GameError::NotInRoom);
            };
            state.leave_room.execute(conn_id, &room_id, &username).await
        }
        ClientEvent::UseFlash { role } => {
            let (room_id, username) = current_session(session).await?;
            state.flash_timer.use_flash(&room_id, role, &username).await
        }
        ClientEvent::CancelFlash { role } => {
            let (room_id, username) = current_session(session).await?;
            state
                .flash_timer
                .cancel_flash(&room_id, role, &username)
                .await
        }
        ClientEvent::ToggleItem { role, item } => {
            let (room_id, username) = current_session(session).await?;
            state
                .toggle_item
                .execute(&room_id, role, item, &username)
                .await
        }
        ClientEvent::AdjustTimer {
            role,
            adjustment_seconds,
        } => {
            let (room_id, username) = current_session(session).await?;
            state
                .flash_timer
                .adjust_timer(&room_id, role, adjustment_seconds, &username)
                .await
        }
        ClientEvent::UpdateChampions { roles, game_info } => {
            let (room_id, username) = current_session(session).await?;
            state
                .update_champions
                .execute(&room_id, roles, game_info, &username)
                .await
        }
    }
}

async fn current_session(session: &Arc<Mutex<Session>>) -> Result<(RoomId, Username), GameError> {
    session.lock().await.clone().ok_or(GameError::NotInRoom)
}

async fn send_error(state: &Arc<AppState>, conn_id: &ConnectionId, error: &GameError) {
    let event = ServerEvent::Error {
        code: error.code().to_string(),
        message: error.to_string(),
    };
    let payload = crate::usecase::encode(&event);
    if let Err(e) = state.pusher.push_to(conn_id, &payload).await {
        tracing::warn!("failed to send error to {}: {}", conn_id, e);
    }
}

fn event_name(event: &ClientEvent) -> &'static str {
    match event {
        ClientEvent::Join { .. } => "join",
        ClientEvent::Leave { .. } => "leave",
        ClientEvent::UseFlash { .. } => "use_flash",
        ClientEvent::CancelFlash { .. } => "cancel_flash",
        ClientEvent::ToggleItem { .. } => "toggle_item",
        ClientEvent::AdjustTimer { .. } => "adjust_timer",
        ClientEvent::UpdateChampions { .. } => "update_champions",
    }
}
