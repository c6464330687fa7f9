//! In-memory room store.
//!
//! The only shared mutable resource in the process. Every public
//! operation takes the store lock exactly once and performs its whole
//! read-modify-write under it, so each mutation is atomic with respect
//! to every other operation. Handler bodies never await mid-mutation,
//! which is what lets one store-wide lock stand in for per-room locks.
//!
//! Rooms are created lazily on first join and destroyed the instant the
//! roster empties; a later join with the same id gets a brand-new
//! default room.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use flashtrack_shared::game::{ChampionInfo, GameInfo, RoomState};
use flashtrack_shared::role::{Item, Role};
use flashtrack_shared::time::Clock;

use crate::domain::{Room, RoomId, Username};

/// Store-level failures: a referenced room no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Result of starting a cooldown.
#[derive(Debug, Clone)]
pub struct FlashUsed {
    pub cooldown_seconds: u32,
    pub ready_at: i64,
    pub room: RoomState,
}

/// Result of flipping an item.
#[derive(Debug, Clone)]
pub struct ItemToggled {
    pub value: bool,
    pub room: RoomState,
}

/// Result of nudging a timer.
#[derive(Debug, Clone)]
pub struct TimerAdjusted {
    /// False when the role was not on cooldown (silent no-op).
    pub applied: bool,
    pub room: RoomState,
}

/// Keyed collection of rooms with process-lifetime scope.
///
/// Explicitly constructed and injected (`Arc<RoomStore>`) rather than
/// reached through a global.
pub struct RoomStore {
    rooms: Mutex<HashMap<RoomId, Room>>,
    clock: Arc<dyn Clock>,
}

impl RoomStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Pure lookup, does not create.
    pub async fn get(&self, room_id: &RoomId) -> Option<RoomState> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::to_state)
    }

    /// Return the existing room or create a default one.
    pub async fn get_or_create(&self, room_id: &RoomId) -> RoomState {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), now))
            .to_state()
    }

    /// Idempotent roster append; creates the room if absent.
    pub async fn add_user(&self, room_id: &RoomId, username: Username) -> RoomState {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), now));
        if room.add_user(username) {
            room.updated_at = now;
        }
        room.to_state()
    }

    /// Remove a user; the room is deleted entirely the moment its roster
    /// empties, in which case (and when the room never existed) `None`
    /// is returned.
    pub async fn remove_user(&self, room_id: &RoomId, username: &Username) -> Option<RoomState> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id)?;
        if room.remove_user(username) {
            room.updated_at = now;
        }
        if room.is_empty() {
            rooms.remove(room_id);
            return None;
        }
        Some(room.to_state())
    }

    /// Start a role's cooldown from its current item flags.
    pub async fn use_flash(&self, room_id: &RoomId, role: Role) -> Result<FlashUsed, StoreError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.as_str().to_string()))?;

        let state = room.roles.get_mut(role);
        let cooldown_seconds = state.use_flash(now);
        let ready_at = state.ready_at.unwrap_or(now);
        room.updated_at = now;

        Ok(FlashUsed {
            cooldown_seconds,
            ready_at,
            room: room.to_state(),
        })
    }

    /// Reset a role to available. Idempotent at the data level.
    pub async fn cancel_flash(&self, room_id: &RoomId, role: Role) -> Result<RoomState, StoreError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.as_str().to_string()))?;

        room.roles.get_mut(role).cancel_flash();
        room.updated_at = now;

        Ok(room.to_state())
    }

    /// Flip an item, rescaling any running cooldown proportionally.
    pub async fn toggle_item(
        &self,
        room_id: &RoomId,
        role: Role,
        item: Item,
    ) -> Result<ItemToggled, StoreError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.as_str().to_string()))?;

        let value = room.roles.get_mut(role).toggle_item(item, now);
        room.updated_at = now;

        Ok(ItemToggled {
            value,
            room: room.to_state(),
        })
    }

    /// Shift a running cooldown, clamped so it never moves before now.
    pub async fn adjust_timer(
        &self,
        room_id: &RoomId,
        role: Role,
        adjustment_seconds: i64,
    ) -> Result<TimerAdjusted, StoreError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.as_str().to_string()))?;

        let applied = room.roles.get_mut(role).adjust_timer(adjustment_seconds, now);
        room.updated_at = now;

        Ok(TimerAdjusted {
            applied,
            room: room.to_state(),
        })
    }

    /// Merge champion display data into the named roles, optionally
    /// recording the live-match identifiers. No cooldown interaction.
    pub async fn update_champions(
        &self,
        room_id: &RoomId,
        roles: &HashMap<Role, ChampionInfo>,
        game_info: Option<GameInfo>,
    ) -> Result<RoomState, StoreError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.as_str().to_string()))?;

        for (role, info) in roles {
            room.roles.get_mut(*role).champion = Some(info.clone());
        }
        if let Some(info) = game_info {
            room.game_info = Some(info);
        }
        room.updated_at = now;

        Ok(room.to_state())
    }

    /// Number of live rooms (monitoring).
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Number of users across all rooms (monitoring).
    pub async fn user_count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.values().map(|r| r.users.len()).sum()
    }

    /// Snapshot of every live room (debug endpoint).
    pub async fn all_rooms(&self) -> Vec<RoomState> {
        let rooms = self.rooms.lock().await;
        rooms.values().map(Room::to_state).collect()
    }
}
