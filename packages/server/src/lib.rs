//! Room authority and session gateway for the flashtrack cooldown
//! tracker.
//!
//! State is held in memory only: a room exists from the first join to
//! the moment its roster empties, and is gone after a restart. Clients
//! talk to the gateway over a single WebSocket; mutations are validated,
//! applied to the room store, and fanned out to every member as a fact
//! plus a fresh snapshot.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// cross-cutting
pub mod monitoring;
