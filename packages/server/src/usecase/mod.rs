//! Use cases: the authoritative event handlers behind the gateway.
//!
//! Each use case validates its input before touching the store, applies
//! exactly one mutation, and fans the result out to the room: a narrow
//! fact describing what changed, immediately followed by a full
//! snapshot, so clients that only understand snapshots stay consistent.

pub mod error;
pub mod flash_timer;
pub mod join_room;
pub mod leave_room;
pub mod toggle_item;
pub mod update_champions;

pub use error::GameError;
pub use flash_timer::FlashTimerUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use toggle_item::ToggleItemUseCase;
pub use update_champions::UpdateChampionsUseCase;

use flashtrack_shared::protocol::ServerEvent;

/// Serialize a server event for the wire.
///
/// Our own enums always serialize; a failure here is a programming
/// error, not a runtime condition.
pub(crate) fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("server event serialization cannot fail")
}
