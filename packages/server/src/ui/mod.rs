//! UI layer: the WebSocket endpoint, the HTTP surface, and server
//! assembly.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{build_router, Server};
pub use state::AppState;
