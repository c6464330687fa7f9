//! flashtrack terminal client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin flashtrack-client -- --room a1b2c3d4e5 --username alice
//! cargo run --bin flashtrack-client -- --url ws://host:8888/ws --room a1b2c3d4e5
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use flashtrack_client::client::domain::should_attempt_reconnect;
use flashtrack_client::client::prefs;
use flashtrack_client::client::session::{run_client_session, SessionConfig};
use flashtrack_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "flashtrack-client")]
#[command(about = "Terminal client for the flashtrack cooldown tracker", long_about = None)]
struct Args {
    /// WebSocket URL of the gateway
    #[arg(long, default_value = "ws://127.0.0.1:8888/ws")]
    url: String,

    /// Room code to join (10 alphanumeric characters)
    #[arg(long)]
    room: String,

    /// Display name; defaults to the saved preference
    #[arg(long)]
    username: Option<String>,

    /// Preference file path (default: ~/.flashtrack/prefs.json)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Reconnection attempts before giving up
    #[arg(long, default_value_t = 5)]
    max_reconnects: u32,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let prefs_path = args.prefs.clone().or_else(prefs::default_path);

    // Username: flag first, then the preference file.
    let username = match args.username.clone() {
        Some(username) => username,
        None => {
            let saved = prefs_path
                .as_deref()
                .and_then(|path| prefs::load(path).ok())
                .and_then(|p| p.username);
            match saved {
                Some(username) => username,
                None => {
                    eprintln!("No username given and none saved; pass --username");
                    std::process::exit(2);
                }
            }
        }
    };

    // Remember the name for next time. Best-effort.
    if let Some(path) = prefs_path.as_deref() {
        let saved = prefs::Prefs {
            username: Some(username.clone()),
        };
        if let Err(e) = prefs::save(path, &saved) {
            tracing::warn!("could not save preferences: {}", e);
        }
    }

    let config = SessionConfig {
        url: args.url,
        room_id: args.room,
        username,
    };

    let mut attempt = 0;
    loop {
        match run_client_session(&config).await {
            Ok(()) => break,
            Err(e) => {
                if should_attempt_reconnect(&e, attempt, args.max_reconnects) {
                    attempt += 1;
                    eprintln!(
                        "{e}; reconnecting ({attempt}/{})...",
                        args.max_reconnects
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                } else {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
