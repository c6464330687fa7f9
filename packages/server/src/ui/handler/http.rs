//! HTTP handlers: health, debug, monitoring, and the read-only
//! collaborator endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::champions::ChampionSkins;
use crate::infrastructure::riot::LiveGameResponse;
use crate::monitoring::MetricsReport;

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Room summary for the debug listing.
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub users: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// List live rooms (for debugging)
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.store.all_rooms().await;
    let summaries = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            room_id: room.room_id,
            users: room.users,
            created_at: room.created_at,
            updated_at: room.updated_at,
        })
        .collect();
    Json(summaries)
}

/// Gateway counters plus live room/user gauges
pub async fn metrics_report(State(state): State<Arc<AppState>>) -> Json<MetricsReport> {
    let active_rooms = state.store.room_count().await;
    let total_users = state.store.user_count().await;
    Json(state.metrics.report(active_rooms, total_users))
}

/// Champion skin catalog, cached for 24 hours
pub async fn champion_skins(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChampionSkins>>, StatusCode> {
    match state.champions.all_champion_skins().await {
        Ok(catalog) => Ok(Json(catalog.as_ref().clone())),
        Err(e) => {
            tracing::error!("champion catalog unavailable: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Query parameters for the live-game lookup
#[derive(Debug, Deserialize)]
pub struct LiveGameQuery {
    pub summoner: String,
    pub region: String,
}

/// Live-match lookup; failures are structured `success: false` results
pub async fn live_game(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LiveGameQuery>,
) -> Json<LiveGameResponse> {
    Json(state.riot.live_game(&query.summoner, &query.region).await)
}
