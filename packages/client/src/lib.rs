//! Terminal client for the flashtrack cooldown tracker.
//!
//! Holds a local copy of the room, merges authoritative snapshots from
//! the gateway (trusting the server's `ready_at` timestamps verbatim),
//! and derives the live countdown display on a short render tick.

pub mod client;
pub mod error;
