//! UseCase: merge live-match champion data into the room.

use std::collections::HashMap;
use std::sync::Arc;

use flashtrack_shared::game::{ChampionInfo, GameInfo};
use flashtrack_shared::protocol::ServerEvent;
use flashtrack_shared::role::Role;

use crate::domain::{MessagePusher, RoomId, Username};
use crate::infrastructure::RoomStore;

use super::{encode, GameError};

/// Pure data merge: champion display data and the optional live-match
/// identifiers. Never touches a timer.
pub struct UpdateChampionsUseCase {
    store: Arc<RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl UpdateChampionsUseCase {
    pub fn new(store: Arc<RoomStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        roles: HashMap<Role, ChampionInfo>,
        game_info: Option<GameInfo>,
        username: &Username,
    ) -> Result<(), GameError> {
        let room = self
            .store
            .update_champions(room_id, &roles, game_info)
            .await?;

        let fact = encode(&ServerEvent::ChampionsUpdated {
            roles,
            game_info,
            username: username.as_str().to_string(),
        });
        self.pusher.broadcast(room_id, &fact).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot { room });
        self.pusher.broadcast(room_id, &snapshot).await;

        tracing::info!("'{}' imported champion data into room {}", username, room_id);

        Ok(())
    }
}
