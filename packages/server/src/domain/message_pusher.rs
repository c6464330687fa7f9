//! MessagePusher seam: how the gateway reaches connected sockets.
//!
//! The WebSocket itself is owned by the UI layer; this trait only sees
//! each connection's outbound channel and the room membership needed for
//! broadcast fan-out. Delivery is best-effort: a closed channel is
//! logged and skipped, never propagated as a fault to other members.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::value_object::RoomId;

/// Identifier for one live connection.
pub type ConnectionId = Uuid;

/// Outbound channel handed over by the UI layer on upgrade.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Failures when pushing to a specific connection.
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not registered")]
    ConnectionNotFound(ConnectionId),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Message delivery to connected clients, grouped by room.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound sender.
    async fn register(&self, conn_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection and any room membership it had.
    async fn unregister(&self, conn_id: &ConnectionId);

    /// Add a connection to a room's broadcast group.
    async fn join_room(&self, room_id: RoomId, conn_id: ConnectionId);

    /// Remove a connection from a room's broadcast group.
    async fn leave_room(&self, room_id: &RoomId, conn_id: &ConnectionId);

    /// Send to a single connection.
    async fn push_to(&self, conn_id: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// Fire-and-forget fan-out to every member of a room.
    async fn broadcast(&self, room_id: &RoomId, content: &str);

    /// Fan-out to every member of a room except one connection.
    async fn broadcast_except(&self, room_id: &RoomId, except: &ConnectionId, content: &str);
}
