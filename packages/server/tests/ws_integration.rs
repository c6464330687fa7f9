//! In-process integration tests for the session gateway: a real axum
//! server on an ephemeral port, real WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use flashtrack_server::infrastructure::{
    champions::ChampionCatalog, riot::RiotClient, RoomStore, WebSocketMessagePusher,
};
use flashtrack_server::monitoring::GatewayMetrics;
use flashtrack_server::ui::{build_router, AppState};
use flashtrack_server::usecase::{
    FlashTimerUseCase, JoinRoomUseCase, LeaveRoomUseCase, ToggleItemUseCase,
    UpdateChampionsUseCase,
};
use flashtrack_shared::protocol::{ClientEvent, ServerEvent};
use flashtrack_shared::role::{Item, Role};
use flashtrack_shared::time::SystemClock;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const ROOM: &str = "a1b2c3d4e5";

fn app_state() -> Arc<AppState> {
    let store = Arc::new(RoomStore::new(Arc::new(SystemClock)));
    let pusher = Arc::new(WebSocketMessagePusher::new());
    Arc::new(AppState {
        store: store.clone(),
        pusher: pusher.clone(),
        metrics: Arc::new(GatewayMetrics::new()),
        join_room: Arc::new(JoinRoomUseCase::new(store.clone(), pusher.clone())),
        leave_room: Arc::new(LeaveRoomUseCase::new(store.clone(), pusher.clone())),
        flash_timer: Arc::new(FlashTimerUseCase::new(store.clone(), pusher.clone())),
        toggle_item: Arc::new(ToggleItemUseCase::new(store.clone(), pusher.clone())),
        update_champions: Arc::new(UpdateChampionsUseCase::new(store, pusher)),
        riot: Arc::new(RiotClient::new(None)),
        champions: Arc::new(ChampionCatalog::new()),
    })
}

async fn spawn_server() -> (SocketAddr, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let app = build_router(app_state());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server = tokio::spawn(async move {
        let shutdown = async {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            eprintln!("test server error: {e}");
        }
    });

    (addr, shutdown_tx, server)
}

async fn connect(addr: SocketAddr) -> WsClient {
    let (stream, _response) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect websocket");
    stream
}

async fn send(client: &mut WsClient, event: &ClientEvent) {
    let payload = serde_json::to_string(event).expect("encode client event");
    client
        .send(Message::Text(payload.into()))
        .await
        .expect("send event");
}

/// Read the next server event, failing the test after two seconds.
async fn recv(client: &mut WsClient) -> ServerEvent {
    let frame = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<ServerEvent>(&text).expect("decode event");
                }
                Some(Ok(_)) => continue,
                other => panic!("websocket closed unexpectedly: {other:?}"),
            }
        }
    })
    .await;
    frame.expect("timed out waiting for server event")
}

async fn join(client: &mut WsClient, username: &str) -> ServerEvent {
    send(
        client,
        &ClientEvent::Join {
            room_id: ROOM.to_string(),
            username: username.to_string(),
        },
    )
    .await;
    recv(client).await
}

#[tokio::test]
async fn test_join_returns_full_snapshot() {
    // given:
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;

    // when:
    let event = join(&mut alice, "alice").await;

    // then: the joiner gets the full room, all five roles available
    match event {
        ServerEvent::RoomSnapshot { room } => {
            assert_eq!(room.room_id, ROOM);
            assert_eq!(room.users, vec!["alice"]);
            for (_, state) in room.roles.iter() {
                assert_eq!(state.ready_at, None);
            }
        }
        other => panic!("expected room_snapshot, got {other:?}"),
    }

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_flash_fans_out_fact_then_snapshot_to_all_members() {
    // given: alice and bob in the same room
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;

    join(&mut alice, "alice").await;
    join(&mut bob, "bob").await;
    // alice also sees bob's join: snapshot + user_joined
    let _snapshot = recv(&mut alice).await;
    let _joined = recv(&mut alice).await;

    // when: alice reports mid's flash
    send(&mut alice, &ClientEvent::UseFlash { role: Role::Mid }).await;

    // then: both members receive the fact first, then the snapshot
    for client in [&mut alice, &mut bob] {
        let fact = recv(client).await;
        match fact {
            ServerEvent::FlashUsed {
                role,
                username,
                cooldown_seconds,
                ready_at,
            } => {
                assert_eq!(role, Role::Mid);
                assert_eq!(username, "alice");
                assert_eq!(cooldown_seconds, 300);
                assert!(ready_at > 0);
            }
            other => panic!("expected flash_used, got {other:?}"),
        }

        let snapshot = recv(client).await;
        match snapshot {
            ServerEvent::RoomSnapshot { room } => {
                assert!(room.roles.mid.ready_at.is_some());
                assert_eq!(room.users, vec!["alice", "bob"]);
            }
            other => panic!("expected room_snapshot, got {other:?}"),
        }
    }

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_toggle_item_rescale_is_visible_in_snapshot() {
    // given: a running cooldown
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;
    join(&mut alice, "alice").await;

    send(&mut alice, &ClientEvent::UseFlash { role: Role::Top }).await;
    let _fact = recv(&mut alice).await;
    let before = match recv(&mut alice).await {
        ServerEvent::RoomSnapshot { room } => room.roles.top.ready_at.expect("on cooldown"),
        other => panic!("expected room_snapshot, got {other:?}"),
    };

    // when: boots toggled on right away
    send(
        &mut alice,
        &ClientEvent::ToggleItem {
            role: Role::Top,
            item: Item::Boots,
        },
    )
    .await;
    let _fact = recv(&mut alice).await;
    let after = match recv(&mut alice).await {
        ServerEvent::RoomSnapshot { room } => room.roles.top.ready_at.expect("still on cooldown"),
        other => panic!("expected room_snapshot, got {other:?}"),
    };

    // then: near-full rescale 300s → 268s shortens ready_at by ~32s
    let shortened_ms = before - after;
    assert!(
        (30_000..=34_000).contains(&shortened_ms),
        "expected ~32s rescale, got {shortened_ms}ms"
    );

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_event_before_join_gets_scoped_error() {
    // given: a connection that never joined
    let (addr, shutdown, server) = spawn_server().await;
    let mut lurker = connect(addr).await;

    // when:
    send(&mut lurker, &ClientEvent::UseFlash { role: Role::Top }).await;

    // then:
    match recv(&mut lurker).await {
        ServerEvent::Error { code, .. } => assert_eq!(code, "not_in_room"),
        other => panic!("expected error, got {other:?}"),
    }

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_malformed_payload_gets_scoped_error_and_connection_survives() {
    // given:
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;
    join(&mut alice, "alice").await;

    // when: garbage on the wire
    alice
        .send(Message::Text("{not json".to_string().into()))
        .await
        .expect("send garbage");

    // then: a scoped error, and the connection still works afterwards
    match recv(&mut alice).await {
        ServerEvent::Error { code, .. } => assert_eq!(code, "malformed_payload"),
        other => panic!("expected error, got {other:?}"),
    }

    send(&mut alice, &ClientEvent::UseFlash { role: Role::Adc }).await;
    assert!(matches!(recv(&mut alice).await, ServerEvent::FlashUsed { .. }));

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_invalid_room_id_is_rejected_on_join() {
    // given:
    let (addr, shutdown, server) = spawn_server().await;
    let mut client = connect(addr).await;

    // when:
    send(
        &mut client,
        &ClientEvent::Join {
            room_id: "short".to_string(),
            username: "alice".to_string(),
        },
    )
    .await;

    // then:
    match recv(&mut client).await {
        ServerEvent::Error { code, .. } => assert_eq!(code, "invalid_room_id"),
        other => panic!("expected error, got {other:?}"),
    }

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_http_endpoints_work() {
    // given: a running gateway with one occupied room
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;
    join(&mut alice, "alice").await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("build http client");
    let base = format!("http://{addr}");

    // when/then: health
    let health = http.get(format!("{base}/api/health")).send().await.unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    // rooms debug listing shows the occupied room
    let rooms: serde_json::Value = http
        .get(format!("{base}/api/rooms"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rooms[0]["room_id"], ROOM);
    assert_eq!(rooms[0]["users"][0], "alice");

    // monitoring counters reflect the connection and the join event
    let metrics: serde_json::Value = http
        .get(format!("{base}/api/monitoring/metrics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(metrics["active_connections"], 1);
    assert_eq!(metrics["active_rooms"], 1);
    assert_eq!(metrics["events_received"]["join"], 1);

    // live-game lookup without an API key is a structured failure
    let live: serde_json::Value = http
        .get(format!("{base}/api/live-game?summoner=someone%23EUW&region=euw1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(live["success"], false);

    shutdown.send(()).ok();
    let _ = server.await;
}

#[tokio::test]
async fn test_disconnect_notifies_remaining_members() {
    // given: two members
    let (addr, shutdown, server) = spawn_server().await;
    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut alice, "alice").await;
    join(&mut bob, "bob").await;
    let _snapshot = recv(&mut alice).await;
    let _joined = recv(&mut alice).await;

    // when: bob's socket drops without an explicit leave
    drop(bob);

    // then: alice learns bob left, with the shrunken roster
    match recv(&mut alice).await {
        ServerEvent::UserLeft { username, users } => {
            assert_eq!(username, "bob");
            assert_eq!(users, vec!["alice"]);
        }
        other => panic!("expected user_left, got {other:?}"),
    }

    shutdown.send(()).ok();
    let _ = server.await;
}
