//! Wire protocol between clients and the session gateway.
//!
//! Every frame is a JSON object with a `type` tag. Clients send intents;
//! the gateway answers with facts (what changed) and with full
//! [`RoomState`] snapshots. After any mutation the gateway broadcasts
//! the fact *and* a fresh snapshot, so a client that only understands
//! snapshots still converges.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::{ChampionInfo, GameInfo, RoomState};
use crate::role::{Item, Role};

/// Client → server intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join a room, creating it on first use of the id.
    Join { room_id: String, username: String },
    /// Leave the current room explicitly.
    Leave { room_id: String },
    /// Flash was used on a role; start its cooldown.
    UseFlash { role: Role },
    /// Clear a role's cooldown (Flash is back up early).
    CancelFlash { role: Role },
    /// Flip a cooldown-reduction item on a role.
    ToggleItem { role: Role, item: Item },
    /// Nudge a running cooldown by a few seconds.
    AdjustTimer { role: Role, adjustment_seconds: i64 },
    /// Merge champion display data imported from a live match.
    UpdateChampions {
        roles: HashMap<Role, ChampionInfo>,
        #[serde(skip_serializing_if = "Option::is_none")]
        game_info: Option<GameInfo>,
    },
}

/// Server → client facts and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Authoritative full room state.
    RoomSnapshot { room: RoomState },
    /// A Flash was used.
    FlashUsed {
        role: Role,
        username: String,
        cooldown_seconds: u32,
        ready_at: i64,
    },
    /// A cooldown was cleared early.
    FlashCancelled { role: Role, username: String },
    /// An item was flipped.
    ItemToggled {
        role: Role,
        item: Item,
        value: bool,
        username: String,
    },
    /// A running cooldown was nudged.
    TimerAdjusted {
        role: Role,
        adjustment_seconds: i64,
        username: String,
    },
    /// Champion display data was merged.
    ChampionsUpdated {
        roles: HashMap<Role, ChampionInfo>,
        #[serde(skip_serializing_if = "Option::is_none")]
        game_info: Option<GameInfo>,
        username: String,
    },
    /// Someone joined; carries the full roster.
    UserJoined { username: String, users: Vec<String> },
    /// Someone left; carries the full roster.
    UserLeft { username: String, users: Vec<String> },
    /// Scoped error for the offending connection only.
    Error { code: String, message: String },
}
