//! UseCase: flip a cooldown-reduction item.

use std::sync::Arc;

use flashtrack_shared::protocol::ServerEvent;
use flashtrack_shared::role::{Item, Role};

use crate::domain::{MessagePusher, RoomId, Username};
use crate::infrastructure::RoomStore;

use super::{encode, GameError};

/// Toggling an item mid-cooldown rescales the remaining wait
/// proportionally to the change in total cooldown (the math lives in
/// `RoleState::toggle_item`); on an available role only the flag flips.
pub struct ToggleItemUseCase {
    store: Arc<RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl ToggleItemUseCase {
    pub fn new(store: Arc<RoomStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        role: Role,
        item: Item,
        username: &Username,
    ) -> Result<(), GameError> {
        let outcome = self.store.toggle_item(room_id, role, item).await?;

        let fact = encode(&ServerEvent::ItemToggled {
            role,
            item,
            value: outcome.value,
            username: username.as_str().to_string(),
        });
        self.pusher.broadcast(room_id, &fact).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot { room: outcome.room });
        self.pusher.broadcast(room_id, &snapshot).await;

        tracing::info!(
            "'{}' toggled {} to {} on {} in room {}",
            username,
            item,
            outcome.value,
            role,
            room_id
        );

        Ok(())
    }
}
