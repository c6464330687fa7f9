//! Infrastructure layer: in-memory storage, WebSocket delivery, and the
//! read-only HTTP collaborators.

pub mod champions;
pub mod message_pusher;
pub mod riot;
pub mod room_store;

pub use message_pusher::WebSocketMessagePusher;
pub use room_store::{RoomStore, StoreError};
