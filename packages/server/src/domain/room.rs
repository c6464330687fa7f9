//! Room entity: one shared tracking session.

use flashtrack_shared::game::{GameInfo, RoleBoard, RoomState};

use super::value_object::{RoomId, Username};

/// One shared tracking session.
///
/// The five role slots exist from creation and are never added or
/// removed; the roster grows and shrinks as users join and leave. The
/// store destroys a room the instant its roster empties.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    /// Display names in join order, no duplicates.
    pub users: Vec<Username>,
    pub roles: RoleBoard,
    pub game_info: Option<GameInfo>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Room {
    /// Create a default room: empty roster, all five roles available
    /// with no items.
    pub fn new(id: RoomId, now_ms: i64) -> Self {
        Self {
            id,
            users: Vec::new(),
            roles: RoleBoard::default(),
            game_info: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Append a user unless the same name is already present.
    /// Returns whether the roster changed.
    pub fn add_user(&mut self, username: Username) -> bool {
        if self.users.contains(&username) {
            return false;
        }
        self.users.push(username);
        true
    }

    /// Remove a user if present. Returns whether the roster changed.
    pub fn remove_user(&mut self, username: &Username) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u != username);
        self.users.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Roster as plain strings, for wire payloads.
    pub fn user_names(&self) -> Vec<String> {
        self.users.iter().map(|u| u.as_str().to_string()).collect()
    }

    /// Snapshot for broadcasting.
    pub fn to_state(&self) -> RoomState {
        RoomState {
            room_id: self.id.as_str().to_string(),
            users: self.user_names(),
            roles: self.roles.clone(),
            game_info: self.game_info,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
