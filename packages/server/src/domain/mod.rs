//! Domain layer: entities, value objects, and the seams the
//! infrastructure layer implements.

pub mod message_pusher;
pub mod room;
pub mod value_object;

pub use message_pusher::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};
pub use room::Room;
pub use value_object::{RoomId, Username, ValidationError};
