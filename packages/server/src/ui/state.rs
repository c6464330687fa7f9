//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::infrastructure::champions::ChampionCatalog;
use crate::infrastructure::riot::RiotClient;
use crate::infrastructure::RoomStore;
use crate::monitoring::GatewayMetrics;
use crate::usecase::{
    FlashTimerUseCase, JoinRoomUseCase, LeaveRoomUseCase, ToggleItemUseCase,
    UpdateChampionsUseCase,
};

/// Shared application state
pub struct AppState {
    /// Room authority (also read directly by the debug endpoints)
    pub store: Arc<RoomStore>,
    /// Message delivery to connected sockets
    pub pusher: Arc<dyn MessagePusher>,
    /// Gateway counters
    pub metrics: Arc<GatewayMetrics>,

    // use cases
    pub join_room: Arc<JoinRoomUseCase>,
    pub leave_room: Arc<LeaveRoomUseCase>,
    pub flash_timer: Arc<FlashTimerUseCase>,
    pub toggle_item: Arc<ToggleItemUseCase>,
    pub update_champions: Arc<UpdateChampionsUseCase>,

    // read-only HTTP collaborators
    pub riot: Arc<RiotClient>,
    pub champions: Arc<ChampionCatalog>,
}
