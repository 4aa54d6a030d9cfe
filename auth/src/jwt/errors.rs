use thiserror::Error;

/// Error type for token operations.
///
/// Verification collapses every cause into `InvalidToken` so callers cannot
/// tell a bad signature from an expired or malformed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token subject cannot be empty")]
    EmptySubject,

    #[error("Signing secret cannot be empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
