//! Gateway error taxonomy.
//!
//! Every failure is local-recoverable: the offending connection gets an
//! `error` fact with a machine-readable code and may retry; nothing is
//! broadcast and no other session is affected.

use thiserror::Error;

use crate::domain::ValidationError;
use crate::infrastructure::StoreError;

/// Failures surfaced to a single connection as `{code, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("room id must be exactly 10 alphanumeric characters")]
    InvalidRoomId,

    #[error("username must be 3-20 characters")]
    InvalidUsername,

    #[error("you must join a room first")]
    NotInRoom,

    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("timer adjustment must be within ±{} seconds", super::flash_timer::ADJUSTMENT_LIMIT_SECONDS)]
    InvalidAdjustment,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl GameError {
    /// Machine-readable code for the wire.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidRoomId => "invalid_room_id",
            GameError::InvalidUsername => "invalid_username",
            GameError::NotInRoom => "not_in_room",
            GameError::RoomNotFound(_) => "room_not_found",
            GameError::InvalidAdjustment => "invalid_adjustment",
            GameError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

impl From<ValidationError> for GameError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidRoomId => GameError::InvalidRoomId,
            ValidationError::InvalidUsername => GameError::InvalidUsername,
        }
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RoomNotFound(id) => GameError::RoomNotFound(id),
        }
    }
}
