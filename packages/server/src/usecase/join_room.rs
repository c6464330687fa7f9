//! UseCase: join a room.

use std::sync::Arc;

use flashtrack_shared::game::RoomState;
use flashtrack_shared::protocol::ServerEvent;

use crate::domain::{ConnectionId, MessagePusher, RoomId, Username};
use crate::infrastructure::RoomStore;

use super::{encode, GameError};

/// Joining associates the connection with a room, creating the room on
/// first use of the id.
pub struct JoinRoomUseCase {
    store: Arc<RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(store: Arc<RoomStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    /// Validate the identifiers, add the user, and notify the room.
    ///
    /// The joiner receives the full snapshot (it has no prior state to
    /// merge against); everyone else additionally gets the lightweight
    /// roster delta.
    pub async fn execute(
        &self,
        conn_id: ConnectionId,
        room_id: String,
        username: String,
    ) -> Result<(RoomId, Username, RoomState), GameError> {
        let room_id = RoomId::new(room_id)?;
        let username = Username::new(username)?;

        self.pusher.join_room(room_id.clone(), conn_id).await;
        let state = self.store.add_user(&room_id, username.clone()).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot {
            room: state.clone(),
        });
        self.pusher.broadcast(&room_id, &snapshot).await;

        let joined = encode(&ServerEvent::UserJoined {
            username: username.as_str().to_string(),
            users: state.users.clone(),
        });
        self.pusher
            .broadcast_except(&room_id, &conn_id, &joined)
            .await;

        tracing::info!("user '{}' joined room {}", username, room_id);

        Ok((room_id, username, state))
    }
}
