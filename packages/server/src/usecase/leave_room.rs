//! UseCase: leave a room, explicitly or on disconnect.

use std::sync::Arc;

use flashtrack_shared::protocol::ServerEvent;

use crate::domain::{ConnectionId, MessagePusher, RoomId, Username};
use crate::infrastructure::RoomStore;

use super::{encode, GameError};

/// Leaving removes the user from the roster and notifies whoever is
/// left. The store destroys the room the instant it empties, in which
/// case there is nobody to notify.
///
/// An abrupt disconnect runs the same path, using the room and name the
/// connection was associated with.
pub struct LeaveRoomUseCase {
    store: Arc<RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(store: Arc<RoomStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    pub async fn execute(
        &self,
        conn_id: ConnectionId,
        room_id: &RoomId,
        username: &Username,
    ) -> Result<(), GameError> {
        self.pusher.leave_room(room_id, &conn_id).await;

        match self.store.remove_user(room_id, username).await {
            Some(state) => {
                let left = encode(&ServerEvent::UserLeft {
                    username: username.as_str().to_string(),
                    users: state.users,
                });
                self.pusher.broadcast(room_id, &left).await;
                tracing::info!("user '{}' left room {}", username, room_id);
            }
            None => {
                tracing::info!(
                    "user '{}' left room {} (room destroyed)",
                    username,
                    room_id
                );
            }
        }

        Ok(())
    }
}
