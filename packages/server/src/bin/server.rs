//! flashtrack gateway server.
//!
//! Tracks enemy Flash cooldowns per room and synchronizes them to every
//! connected client over WebSocket. State is in-memory only.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin flashtrack-server
//! cargo run --bin flashtrack-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use flashtrack_server::{
    infrastructure::{
        champions::ChampionCatalog, riot::RiotClient, RoomStore, WebSocketMessagePusher,
    },
    monitoring::GatewayMetrics,
    ui::{AppState, Server},
    usecase::{
        FlashTimerUseCase, JoinRoomUseCase, LeaveRoomUseCase, ToggleItemUseCase,
        UpdateChampionsUseCase,
    },
};
use flashtrack_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "flashtrack-server")]
#[command(about = "Flash cooldown tracker gateway", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8888")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Wire dependencies in order: clock → store → pusher → use cases →
    // collaborators → state → server.
    let clock = Arc::new(SystemClock);
    let store = Arc::new(RoomStore::new(clock));
    let pusher = Arc::new(WebSocketMessagePusher::new());
    let metrics = Arc::new(GatewayMetrics::new());

    let join_room = Arc::new(JoinRoomUseCase::new(store.clone(), pusher.clone()));
    let leave_room = Arc::new(LeaveRoomUseCase::new(store.clone(), pusher.clone()));
    let flash_timer = Arc::new(FlashTimerUseCase::new(store.clone(), pusher.clone()));
    let toggle_item = Arc::new(ToggleItemUseCase::new(store.clone(), pusher.clone()));
    let update_champions = Arc::new(UpdateChampionsUseCase::new(store.clone(), pusher.clone()));

    let riot = Arc::new(RiotClient::new(std::env::var("RIOT_API_KEY").ok()));
    let champions = Arc::new(ChampionCatalog::new());

    let state = Arc::new(AppState {
        store,
        pusher,
        metrics,
        join_room,
        leave_room,
        flash_timer,
        toggle_item,
        update_champions,
        riot,
        champions,
    });

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
