//! UseCase: the cooldown timer itself (use, cancel, manual adjust).

use std::sync::Arc;

use flashtrack_shared::protocol::ServerEvent;
use flashtrack_shared::role::Role;

use crate::domain::{MessagePusher, RoomId, Username};
use crate::infrastructure::RoomStore;

use super::{encode, GameError};

/// Manual corrections are a nudge tool, not a rewrite tool.
pub const ADJUSTMENT_LIMIT_SECONDS: i64 = 10;

/// Timer state machine per role: Available → (use) → OnCooldown →
/// (cancel | natural expiry) → Available. Expiry is detected by readers
/// comparing `ready_at` to now; the server never ticks.
pub struct FlashTimerUseCase {
    store: Arc<RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl FlashTimerUseCase {
    pub fn new(store: Arc<RoomStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    /// Start a role's cooldown from its current item flags and tell the
    /// whole room: the fact first, then the fresh snapshot.
    pub async fn use_flash(
        &self,
        room_id: &RoomId,
        role: Role,
        username: &Username,
    ) -> Result<(), GameError> {
        let outcome = self.store.use_flash(room_id, role).await?;

        let fact = encode(&ServerEvent::FlashUsed {
            role,
            username: username.as_str().to_string(),
            cooldown_seconds: outcome.cooldown_seconds,
            ready_at: outcome.ready_at,
        });
        self.pusher.broadcast(room_id, &fact).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot { room: outcome.room });
        self.pusher.broadcast(room_id, &snapshot).await;

        tracing::info!(
            "'{}' used flash on {} in room {} ({}s)",
            username,
            role,
            room_id,
            outcome.cooldown_seconds
        );

        Ok(())
    }

    /// Reset a role to available. Cancelling an available role is a
    /// harmless no-op that still broadcasts, so every client converges.
    pub async fn cancel_flash(
        &self,
        room_id: &RoomId,
        role: Role,
        username: &Username,
    ) -> Result<(), GameError> {
        let room = self.store.cancel_flash(room_id, role).await?;

        let fact = encode(&ServerEvent::FlashCancelled {
            role,
            username: username.as_str().to_string(),
        });
        self.pusher.broadcast(room_id, &fact).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot { room });
        self.pusher.broadcast(room_id, &snapshot).await;

        tracing::info!("'{}' cancelled flash on {} in room {}", username, role, room_id);

        Ok(())
    }

    /// Nudge a running cooldown by up to ±10 seconds, clamped so the
    /// result never lands in the past. Adjusting an available role is a
    /// silent no-op (the broadcast still happens so clients converge on
    /// the unchanged state).
    pub async fn adjust_timer(
        &self,
        room_id: &RoomId,
        role: Role,
        adjustment_seconds: i64,
        username: &Username,
    ) -> Result<(), GameError> {
        if adjustment_seconds.abs() > ADJUSTMENT_LIMIT_SECONDS {
            return Err(GameError::InvalidAdjustment);
        }

        let outcome = self
            .store
            .adjust_timer(room_id, role, adjustment_seconds)
            .await?;

        let fact = encode(&ServerEvent::TimerAdjusted {
            role,
            adjustment_seconds,
            username: username.as_str().to_string(),
        });
        self.pusher.broadcast(room_id, &fact).await;

        let snapshot = encode(&ServerEvent::RoomSnapshot { room: outcome.room });
        self.pusher.broadcast(room_id, &snapshot).await;

        tracing::info!(
            "'{}' adjusted {} timer by {}s in room {} (applied: {})",
            username,
            role,
            adjustment_seconds,
            room_id,
            outcome.applied
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::WebSocketMessagePusher;
    use flashtrack_shared::time::FixedClock;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn setup() -> (
        Arc<RoomStore>,
        Arc<WebSocketMessagePusher>,
        FlashTimerUseCase,
        RoomId,
    ) {
        let store = Arc::new(RoomStore::new(Arc::new(FixedClock::new(1_000_000))));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = FlashTimerUseCase::new(store.clone(), pusher.clone());
        let id = RoomId::new("a1b2c3d4e5".to_string()).unwrap();
        (store, pusher, usecase, id)
    }

    fn user(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_use_flash_broadcasts_fact_then_snapshot() {
        // given: alice in a room with a listening connection
        let (store, pusher, usecase, id) = setup();
        store.add_user(&id, user("alice")).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        pusher.register(conn, tx).await;
        pusher.join_room(id.clone(), conn).await;

        // when:
        usecase.use_flash(&id, Role::Top, &user("alice")).await.unwrap();

        // then: the fact arrives first, carrying the absolute ready_at
        let first: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        match first {
            ServerEvent::FlashUsed {
                role,
                username,
                cooldown_seconds,
                ready_at,
            } => {
                assert_eq!(role, Role::Top);
                assert_eq!(username, "alice");
                assert_eq!(cooldown_seconds, 300);
                assert_eq!(ready_at, 1_000_000 + 300_000);
            }
            other => panic!("expected flash_used, got {other:?}"),
        }

        // and the snapshot follows, carrying the same timer
        let second: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        match second {
            ServerEvent::RoomSnapshot { room } => {
                assert_eq!(room.roles.top.ready_at, Some(1_300_000));
            }
            other => panic!("expected room_snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_use_flash_in_destroyed_room_errors_without_broadcast() {
        // given: a room id nobody occupies (raced with teardown)
        let (_store, pusher, usecase, id) = setup();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        pusher.register(conn, tx).await;
        pusher.join_room(id.clone(), conn).await;

        // when:
        let result = usecase.use_flash(&id, Role::Mid, &user("ghost")).await;

        // then: scoped error, nothing broadcast
        assert!(matches!(result, Err(GameError::RoomNotFound(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_on_available_role_still_converges() {
        // given:
        let (store, pusher, usecase, id) = setup();
        store.add_user(&id, user("alice")).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        pusher.register(conn, tx).await;
        pusher.join_room(id.clone(), conn).await;

        // when: cancelling a role that was never used
        usecase
            .cancel_flash(&id, Role::Adc, &user("alice"))
            .await
            .unwrap();

        // then: fact + snapshot, role still available
        let fact: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert!(matches!(fact, ServerEvent::FlashCancelled { .. }));
        let snapshot: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        match snapshot {
            ServerEvent::RoomSnapshot { room } => assert_eq!(room.roles.adc.ready_at, None),
            other => panic!("expected room_snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_adjustment_out_of_range_is_rejected() {
        // given:
        let (store, _pusher, usecase, id) = setup();
        store.add_user(&id, user("alice")).await;

        // when:
        let result = usecase
            .adjust_timer(&id, Role::Top, 11, &user("alice"))
            .await;

        // then: rejected before reaching the store
        assert_eq!(result.unwrap_err(), GameError::InvalidAdjustment);
    }

    #[tokio::test]
    async fn test_adjustment_within_range_is_applied() {
        // given: a running cooldown
        let (store, pusher, usecase, id) = setup();
        store.add_user(&id, user("alice")).await;
        store.use_flash(&id, Role::Top).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        pusher.register(conn, tx).await;
        pusher.join_room(id.clone(), conn).await;

        // when:
        usecase
            .adjust_timer(&id, Role::Top, -10, &user("alice"))
            .await
            .unwrap();

        // then: the snapshot shows the shifted timer
        let _fact = rx.recv().await.unwrap();
        let snapshot: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        match snapshot {
            ServerEvent::RoomSnapshot { room } => {
                assert_eq!(room.roles.top.ready_at, Some(1_300_000 - 10_000));
            }
            other => panic!("expected room_snapshot, got {other:?}"),
        }
    }
}
