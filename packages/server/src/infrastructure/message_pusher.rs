//! WebSocket-backed MessagePusher.
//!
//! The UI layer owns each socket and hands this pusher the connection's
//! `UnboundedSender`; room membership mirrors the join/leave events.
//! Broadcasts fan out over the current members and tolerate individual
//! send failures (the failing connection is about to be torn down by its
//! own socket task anyway).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomId};

#[derive(Default)]
struct PusherState {
    /// Outbound channel per live connection.
    clients: HashMap<ConnectionId, PusherChannel>,
    /// Broadcast group membership per room.
    members: HashMap<RoomId, HashSet<ConnectionId>>,
}

/// WebSocket implementation of [`MessagePusher`].
#[derive(Default)]
pub struct WebSocketMessagePusher {
    state: Arc<Mutex<PusherState>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, conn_id: ConnectionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        state.clients.insert(conn_id, sender);
        tracing::debug!("connection {} registered", conn_id);
    }

    async fn unregister(&self, conn_id: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.clients.remove(conn_id);
        for members in state.members.values_mut() {
            members.remove(conn_id);
        }
        state.members.retain(|_, members| !members.is_empty());
        tracing::debug!("connection {} unregistered", conn_id);
    }

    async fn join_room(&self, room_id: RoomId, conn_id: ConnectionId) {
        let mut state = self.state.lock().await;
        state.members.entry(room_id).or_default().insert(conn_id);
    }

    async fn leave_room(&self, room_id: &RoomId, conn_id: &ConnectionId) {
        let mut state = self.state.lock().await;
        if let Some(members) = state.members.get_mut(room_id) {
            members.remove(conn_id);
            if members.is_empty() {
                state.members.remove(room_id);
            }
        }
    }

    async fn push_to(&self, conn_id: &ConnectionId, content: &str) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;
        let sender = state
            .clients
            .get(conn_id)
            .ok_or(MessagePushError::ConnectionNotFound(*conn_id))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast(&self, room_id: &RoomId, content: &str) {
        let state = self.state.lock().await;
        let Some(members) = state.members.get(room_id) else {
            return;
        };
        for conn_id in members {
            if let Some(sender) = state.clients.get(conn_id) {
                if sender.send(content.to_string()).is_err() {
                    tracing::warn!("failed to push to connection {}, skipping", conn_id);
                }
            }
        }
    }

    async fn broadcast_except(&self, room_id: &RoomId, except: &ConnectionId, content: &str) {
        let state = self.state.lock().await;
        let Some(members) = state.members.get(room_id) else {
            return;
        };
        for conn_id in members {
            if conn_id == except {
                continue;
            }
            if let Some(sender) = state.clients.get(conn_id) {
                if sender.send(content.to_string()).is_err() {
                    tracing::warn!("failed to push to connection {}, skipping", conn_id);
                }
            }
        }
    }
}
