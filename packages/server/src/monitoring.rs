//! In-process gateway counters.
//!
//! Plain atomics, read out as JSON by the monitoring endpoint. These
//! observe the gateway; they never participate in it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use serde::Serialize;

/// Counters kept by the gateway since process start.
pub struct GatewayMetrics {
    started_at: Instant,
    active_connections: AtomicU64,
    total_connections: AtomicU64,
    total_disconnections: AtomicU64,
    events_received: Mutex<HashMap<&'static str, u64>>,
}

/// JSON shape of the monitoring report.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub uptime_seconds: u64,
    pub active_connections: u64,
    pub total_connections: u64,
    pub total_disconnections: u64,
    pub events_received: HashMap<String, u64>,
    pub active_rooms: usize,
    pub total_users: usize,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            active_connections: AtomicU64::new(0),
            total_connections: AtomicU64::new(0),
            total_disconnections: AtomicU64::new(0),
            events_received: Mutex::new(HashMap::new()),
        }
    }

    pub fn connection_opened(&self) {
        self.active_connections.fetch_add(1, Ordering::Relaxed);
        self.total_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
        self.total_disconnections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn event_received(&self, event_name: &'static str) {
        if let Ok(mut events) = self.events_received.lock() {
            *events.entry(event_name).or_insert(0) += 1;
        }
    }

    /// Build the report; room/user gauges are sampled by the caller.
    pub fn report(&self, active_rooms: usize, total_users: usize) -> MetricsReport {
        let events_received = self
            .events_received
            .lock()
            .map(|events| {
                events
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect()
            })
            .unwrap_or_default();

        MetricsReport {
            uptime_seconds: self.started_at.elapsed().as_secs(),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            total_connections: self.total_connections.load(Ordering::Relaxed),
            total_disconnections: self.total_disconnections.load(Ordering::Relaxed),
            events_received,
            active_rooms,
            total_users,
        }
    }
}

impl Default for GatewayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
