//! Local room view and the snapshot merge policy.
//!
//! The merge rule is deliberately dumb: the server's `ready_at` is the
//! truth and is stored verbatim. The client never decrements a counter
//! of its own and never compares old against new; both habits caused
//! visible cross-client drift in earlier countdown-based designs. The
//! only derived value is the *rendered* remaining time, recomputed from
//! `ready_at` on every tick.

use flashtrack_shared::game::{RoleBoard, RoomState};
use flashtrack_shared::protocol::ServerEvent;
use flashtrack_shared::role::Role;

/// Upper bound on the notice transcript kept for display.
const MAX_NOTICES: usize = 6;

/// The client's local copy of the room.
#[derive(Debug, Default)]
pub struct RoomView {
    pub room_id: String,
    pub users: Vec<String>,
    pub roles: RoleBoard,
    pub game_id: Option<i64>,
    /// Recent human-readable fact lines, newest last.
    pub notices: Vec<String>,
}

impl RoomView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an authoritative snapshot.
    ///
    /// Timers and item flags are overwritten verbatim. Champion info is
    /// the one exception: a snapshot without champion data for a role
    /// keeps whatever the client already knew (display data may have
    /// been imported before this client joined the broadcast).
    pub fn apply_snapshot(&mut self, snapshot: RoomState) {
        self.room_id = snapshot.room_id;
        self.users = snapshot.users;
        self.game_id = snapshot.game_info.map(|info| info.game_id);

        for role in Role::ALL {
            let incoming = snapshot.roles.get(role);
            let current = self.roles.get_mut(role);

            current.ready_at = incoming.ready_at;
            current.boots = incoming.boots;
            current.rune = incoming.rune;
            if incoming.champion.is_some() {
                current.champion = incoming.champion.clone();
            }
        }
    }

    /// Handle one server event. Facts only produce notice lines; state
    /// always comes from the snapshot that follows them.
    pub fn apply_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::RoomSnapshot { room } => self.apply_snapshot(room),
            ServerEvent::FlashUsed {
                role,
                username,
                cooldown_seconds,
                ..
            } => {
                self.push_notice(format!(
                    "{username} started {role} flash ({cooldown_seconds}s)"
                ));
            }
            ServerEvent::FlashCancelled { role, username } => {
                self.push_notice(format!("{username} cleared {role} flash"));
            }
            ServerEvent::ItemToggled {
                role,
                item,
                value,
                username,
            } => {
                let what = if value { "on" } else { "off" };
                self.push_notice(format!("{username} turned {item} {what} for {role}"));
            }
            ServerEvent::TimerAdjusted {
                role,
                adjustment_seconds,
                username,
            } => {
                self.push_notice(format!(
                    "{username} adjusted {role} timer by {adjustment_seconds:+}s"
                ));
            }
            ServerEvent::ChampionsUpdated { username, .. } => {
                self.push_notice(format!("{username} imported live game data"));
            }
            ServerEvent::UserJoined { username, users } => {
                self.users = users;
                self.push_notice(format!("{username} joined"));
            }
            ServerEvent::UserLeft { username, users } => {
                self.users = users;
                self.push_notice(format!("{username} left"));
            }
            ServerEvent::Error { code, message } => {
                self.push_notice(format!("error [{code}]: {message}"));
            }
        }
    }

    fn push_notice(&mut self, notice: String) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }
}
