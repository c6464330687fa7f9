//! Terminal rendering of the cooldown board.

use flashtrack_shared::cooldown::format_cooldown;
use flashtrack_shared::game::RoleState;
use flashtrack_shared::role::Role;

use super::state::RoomView;

/// Formats room state and notices for terminal output.
pub struct BoardFormatter;

impl BoardFormatter {
    /// One line per role, e.g. `MID      4:58  [boots] [rune]  Ahri`.
    pub fn format_role_line(role: Role, state: &RoleState, now_ms: i64) -> String {
        let timer = match state.ready_at {
            Some(_) if state.is_on_cooldown(now_ms) => {
                format_cooldown(state.remaining_seconds(now_ms))
            }
            // A ready_at at or behind now renders as available; the
            // flip happens purely in the renderer, nothing is written
            // back.
            _ => "UP".to_string(),
        };

        let boots = if state.boots { "[boots]" } else { "[     ]" };
        let rune = if state.rune { "[rune]" } else { "[    ]" };
        let champion = state
            .champion
            .as_ref()
            .map(|c| c.champion_name.as_str())
            .unwrap_or("");

        format!("{:<8} {:>5}  {} {}  {}", role, timer, boots, rune, champion)
    }

    /// The whole board plus roster and recent notices.
    pub fn format_board(view: &RoomView, now_ms: i64) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "room {}  users: {}\n",
            view.room_id,
            view.users.join(", ")
        ));
        for (role, state) in view.roles.iter() {
            out.push_str(&Self::format_role_line(role, state, now_ms));
            out.push('\n');
        }
        for notice in &view.notices {
            out.push_str(&format!("  * {notice}\n"));
        }
        out
    }

    pub fn format_help() -> String {
        [
            "commands:",
            "  f <role>            flash used (starts the cooldown)",
            "  c <role>            cancel (flash is back up)",
            "  b <role>            toggle cooldown boots",
            "  r <role>            toggle cooldown rune",
            "  adj <role> <±sec>   nudge a running timer (max ±10)",
            "  users               show the roster",
            "  quit                exit",
            "roles: top jungle mid adc support",
        ]
        .join("\n")
    }
}
