//! Error types for the flashtrack client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server rejected an intent with a protocol-level error
    #[error("Rejected by server ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Preference file could not be read or written
    #[error("Preference file error: {0}")]
    Prefs(String),
}
