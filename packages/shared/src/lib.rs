//! Shared vocabulary for the flashtrack cooldown tracker.
//!
//! Everything that crosses the wire lives here so the server and the
//! terminal client agree on role names, room state, and event payloads.

pub mod cooldown;
pub mod game;
pub mod logger;
pub mod protocol;
pub mod role;
pub mod time;
