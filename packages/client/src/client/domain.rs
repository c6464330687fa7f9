//! Pure client-side policy helpers.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// Server-side rejections mean the input was wrong, not the connection;
/// retrying the same connection would just fail again.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Rejected { .. })
}

/// Check if the client should attempt to reconnect.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}
