//! WebSocket client session.
//!
//! Three concurrent pieces: a read task merging server events into the
//! local [`RoomView`], a render tick deriving the countdown display from
//! the stored `ready_at` timestamps, and a blocking rustyline thread
//! feeding parsed commands into the write loop. No piece ever ticks a
//! timer down: the render recomputes remaining time from scratch every
//! pass, which is what keeps independent clients in agreement.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use flashtrack_shared::protocol::{ClientEvent, ServerEvent};
use flashtrack_shared::time::now_millis;

use crate::error::ClientError;

use super::commands::{parse, Command};
use super::formatter::BoardFormatter;
use super::state::RoomView;

/// How often the board is redrawn. The countdown is derived from
/// `ready_at` on every pass, so the tick rate only affects smoothness.
const RENDER_TICK: Duration = Duration::from_millis(500);

/// Server rejections that make this session unsalvageable.
const FATAL_CODES: [&str; 2] = ["invalid_room_id", "invalid_username"];

/// Session parameters.
pub struct SessionConfig {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:8888/ws`.
    pub url: String,
    pub room_id: String,
    pub username: String,
}

/// Run one client session until the user quits or the connection dies.
///
/// Returns `Ok(())` on a user-requested quit; connection loss and server
/// rejections come back as errors so the caller can decide whether to
/// reconnect.
pub async fn run_client_session(config: &SessionConfig) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(&config.url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("connected to {}", config.url);
    let (mut write, mut read) = ws_stream.split();

    // First frame: join the room.
    let join = ClientEvent::Join {
        room_id: config.room_id.clone(),
        username: config.username.clone(),
    };
    send_event(&mut write, &join).await?;

    let view = Arc::new(Mutex::new(RoomView::new()));

    // Read task: merge every server event into the local view.
    let read_view = view.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => return ClientError::ConnectionError(e.to_string()),
            };

            match message {
                Message::Text(text) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(ServerEvent::Error { code, message })
                        if FATAL_CODES.contains(&code.as_str()) =>
                    {
                        return ClientError::Rejected { code, message };
                    }
                    Ok(event) => read_view.lock().await.apply_event(event),
                    Err(e) => tracing::warn!("unparseable server frame: {}", e),
                },
                Message::Close(_) => {
                    return ClientError::ConnectionError("server closed the connection".to_string());
                }
                _ => {}
            }
        }
        ClientError::ConnectionError("connection lost".to_string())
    });

    // Render tick: redraw the board from the current timestamps.
    let tick_view = view.clone();
    let render_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(RENDER_TICK);
        loop {
            interval.tick().await;
            let board = {
                let view = tick_view.lock().await;
                BoardFormatter::format_board(&view, now_millis())
            };
            print!("\x1b[2J\x1b[H{board}\n> ");
            let _ = std::io::stdout().flush();
        }
    });

    // Blocking rustyline thread feeding lines into the async loop.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {e}");
                return;
            }
        };

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(&line).ok();
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    let _ = input_tx.send("quit".to_string());
                    break;
                }
                Err(e) => {
                    tracing::error!("readline error: {}", e);
                    break;
                }
            }
        }
    });

    // Write loop: dispatch parsed commands until quit or disconnect.
    let result = loop {
        tokio::select! {
            read_result = &mut read_task => {
                let error = read_result
                    .unwrap_or_else(|_| ClientError::ConnectionError("read task failed".to_string()));
                break Err(error);
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    break Ok(());
                };
                match parse(&line) {
                    Ok(Command::Send(event)) => {
                        if let Err(e) = send_event(&mut write, &event).await {
                            break Err(e);
                        }
                    }
                    Ok(Command::Users) => {
                        let view = view.lock().await;
                        println!("users: {}", view.users.join(", "));
                    }
                    Ok(Command::Help) => {
                        println!("{}", BoardFormatter::format_help());
                    }
                    Ok(Command::Quit) => {
                        let leave = ClientEvent::Leave {
                            room_id: config.room_id.clone(),
                        };
                        let _ = send_event(&mut write, &leave).await;
                        let _ = write.close().await;
                        break Ok(());
                    }
                    Err(e) => {
                        println!("{}", e.0);
                    }
                }
            }
        }
    };

    render_task.abort();
    read_task.abort();
    result
}

async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: SinkExt<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let payload = serde_json::to_string(event)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(payload.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
