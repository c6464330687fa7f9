//! Room and role state tracked for one session.
//!
//! The central design decision lives in [`RoleState::ready_at`]: the
//! server never stores a countdown that has to be ticked down. It stores
//! the absolute instant the ability comes back up, and every reader
//! (server or client) derives the remaining time against its own clock.

use serde::{Deserialize, Serialize};

use crate::cooldown::{flash_cooldown, remaining_seconds};
use crate::role::{Item, Role};

/// Denormalized champion display data imported from a live match.
///
/// Never required for the timer logic to be correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionInfo {
    pub champion_id: u32,
    pub champion_name: String,
    pub champion_icon_url: String,
    pub summoner_name: String,
}

/// Live-match identifiers, display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: i64,
    pub game_start_time: i64,
}

/// Cooldown tracking for a single role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleState {
    /// `None` when Flash is available; otherwise the epoch-millis
    /// instant at which it becomes available again.
    pub ready_at: Option<i64>,
    /// Cooldown-reduction boots toggle.
    pub boots: bool,
    /// Cooldown-reduction rune toggle.
    pub rune: bool,
    /// Champion display data, populated from a live match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<ChampionInfo>,
}

impl RoleState {
    /// Start the cooldown: compute the duration from the current item
    /// flags and set `ready_at`. Returns the cooldown in seconds.
    pub fn use_flash(&mut self, now_ms: i64) -> u32 {
        let cooldown = flash_cooldown(self.boots, self.rune);
        self.ready_at = Some(now_ms + i64::from(cooldown) * 1000);
        cooldown
    }

    /// Clear the cooldown unconditionally. Cancelling an already
    /// available Flash is a harmless no-op.
    pub fn cancel_flash(&mut self) {
        self.ready_at = None;
    }

    /// Flip the named item and, when a cooldown is running, rescale the
    /// remaining time so the same *fraction* of the total is left.
    ///
    /// Swapping the absolute remaining seconds onto the new total would
    /// be inconsistent, and leaving it untouched would ignore the new
    /// item state until the next use.
    ///
    /// Returns the item's new value.
    pub fn toggle_item(&mut self, item: Item, now_ms: i64) -> bool {
        let old_total = flash_cooldown(self.boots, self.rune);

        let new_value = match item {
            Item::Boots => {
                self.boots = !self.boots;
                self.boots
            }
            Item::Rune => {
                self.rune = !self.rune;
                self.rune
            }
        };

        if let Some(ready_at) = self.ready_at {
            let remaining_ms = (ready_at - now_ms).max(0) as f64;
            let new_total = flash_cooldown(self.boots, self.rune);

            let fraction = remaining_ms / (f64::from(old_total) * 1000.0);
            let new_remaining_ms = fraction * f64::from(new_total) * 1000.0;

            self.ready_at = Some(now_ms + new_remaining_ms.round() as i64);
        }

        new_value
    }

    /// Shift `ready_at` by the signed amount, clamped so the result is
    /// never earlier than `now_ms`. A role that is not on cooldown is
    /// left untouched; the return value tells whether anything changed.
    pub fn adjust_timer(&mut self, adjustment_seconds: i64, now_ms: i64) -> bool {
        match self.ready_at {
            Some(ready_at) => {
                let shifted = ready_at + adjustment_seconds * 1000;
                self.ready_at = Some(shifted.max(now_ms));
                true
            }
            None => false,
        }
    }

    /// Seconds until Flash is back up, zero when available or expired.
    pub fn remaining_seconds(&self, now_ms: i64) -> u32 {
        match self.ready_at {
            Some(ready_at) => remaining_seconds(ready_at, now_ms),
            None => 0,
        }
    }

    /// Whether a cooldown is still running at `now_ms`. Natural expiry
    /// is detected here, by comparison, not by a separate state flag.
    pub fn is_on_cooldown(&self, now_ms: i64) -> bool {
        self.remaining_seconds(now_ms) > 0
    }
}

/// The five role slots of a room.
///
/// A fixed struct rather than a map: the five keys exist from creation,
/// can never be added or removed, and every serialized snapshot carries
/// all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleBoard {
    #[serde(rename = "TOP")]
    pub top: RoleState,
    #[serde(rename = "JUNGLE")]
    pub jungle: RoleState,
    #[serde(rename = "MID")]
    pub mid: RoleState,
    #[serde(rename = "ADC")]
    pub adc: RoleState,
    #[serde(rename = "SUPPORT")]
    pub support: RoleState,
}

impl RoleBoard {
    pub fn get(&self, role: Role) -> &RoleState {
        match role {
            Role::Top => &self.top,
            Role::Jungle => &self.jungle,
            Role::Mid => &self.mid,
            Role::Adc => &self.adc,
            Role::Support => &self.support,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut RoleState {
        match role {
            Role::Top => &mut self.top,
            Role::Jungle => &mut self.jungle,
            Role::Mid => &mut self.mid,
            Role::Adc => &mut self.adc,
            Role::Support => &mut self.support,
        }
    }

    /// Iterate the board in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleState)> {
        Role::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}

/// Full shared state of one tracking session, as broadcast to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub room_id: String,
    /// Display names in join order, no duplicates.
    pub users: Vec<String>,
    pub roles: RoleBoard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_info: Option<GameInfo>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_flash_sets_ready_at_from_item_flags() {
        // given: no items active
        let mut state = RoleState::default();
        let now = 1_000_000;

        // when:
        let cooldown = state.use_flash(now);

        // then: full 300s cooldown
        assert_eq!(cooldown, 300);
        assert_eq!(state.ready_at, Some(now + 300_000));
    }

    #[test]
    fn test_use_flash_with_both_items() {
        // given:
        let mut state = RoleState {
            boots: true,
            rune: true,
            ..Default::default()
        };

        // when:
        let cooldown = state.use_flash(0);

        // then:
        assert_eq!(cooldown, 231);
        assert_eq!(state.ready_at, Some(231_000));
    }

    #[test]
    fn test_cancel_flash_is_idempotent() {
        // given: an available role
        let mut state = RoleState::default();

        // when: cancelled twice in a row
        state.cancel_flash();
        state.cancel_flash();

        // then: still available, no error
        assert_eq!(state.ready_at, None);
    }

    #[test]
    fn test_natural_expiry_reads_as_available() {
        // given: a cooldown started at t=0 with no items
        let mut state = RoleState::default();
        state.use_flash(0);

        // when: read one millisecond after expiry
        let remaining = state.remaining_seconds(300_001);

        // then: zero, never negative
        assert_eq!(remaining, 0);
        assert!(!state.is_on_cooldown(300_001));
    }

    #[test]
    fn test_toggle_item_rescales_remaining_proportionally() {
        // given: flash used at t=0 with no items, half the cooldown left
        let mut state = RoleState::default();
        state.use_flash(0);
        let now = 150_000;

        // when: boots toggled on at 50% remaining
        state.toggle_item(Item::Boots, now);

        // then: remaining becomes 50% of the new 268s total (134s),
        // not 150s unchanged and not a 268s reset
        assert_eq!(state.ready_at, Some(now + 134_000));
        assert!(state.boots);
    }

    #[test]
    fn test_toggle_item_round_trip_restores_remaining() {
        // given: 150s of a 300s cooldown left
        let mut state = RoleState::default();
        state.use_flash(0);
        let now = 150_000;

        // when: the rune is toggled on and immediately back off
        state.toggle_item(Item::Rune, now);
        state.toggle_item(Item::Rune, now);

        // then: the original remaining time is restored within rounding
        let remaining = state.ready_at.unwrap() - now;
        assert!((remaining - 150_000).abs() <= 1000, "remaining={remaining}");
    }

    #[test]
    fn test_toggle_item_while_available_only_flips_flag() {
        // given: an available role
        let mut state = RoleState::default();

        // when:
        let value = state.toggle_item(Item::Rune, 42);

        // then: flag flipped, no timer appeared
        assert!(value);
        assert!(state.rune);
        assert_eq!(state.ready_at, None);
    }

    #[test]
    fn test_adjust_timer_shifts_ready_at() {
        // given: 100s remaining
        let mut state = RoleState::default();
        state.ready_at = Some(100_000);

        // when: pushed back 10 seconds
        let applied = state.adjust_timer(10, 0);

        // then:
        assert!(applied);
        assert_eq!(state.ready_at, Some(110_000));
    }

    #[test]
    fn test_adjust_timer_clamps_to_now() {
        // given: 2 seconds remaining
        let now = 98_000;
        let mut state = RoleState::default();
        state.ready_at = Some(100_000);

        // when: adjusted by -10 seconds
        state.adjust_timer(-10, now);

        // then: clamped to now, remaining resolves to zero, never negative
        assert_eq!(state.ready_at, Some(now));
        assert_eq!(state.remaining_seconds(now), 0);
    }

    #[test]
    fn test_adjust_timer_on_available_role_is_noop() {
        // given:
        let mut state = RoleState::default();

        // when:
        let applied = state.adjust_timer(5, 0);

        // then:
        assert!(!applied);
        assert_eq!(state.ready_at, None);
    }

    #[test]
    fn test_role_board_serializes_all_five_uppercase_keys() {
        // given:
        let board = RoleBoard::default();

        // when:
        let json = serde_json::to_value(&board).unwrap();

        // then: exactly the five fixed keys
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for key in ["TOP", "JUNGLE", "MID", "ADC", "SUPPORT"] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_role_board_accessors_are_consistent() {
        // given:
        let mut board = RoleBoard::default();

        // when:
        board.get_mut(Role::Mid).boots = true;

        // then:
        assert!(board.get(Role::Mid).boots);
        assert!(!board.get(Role::Top).boots);
    }
}
