use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored value is not an Argon2id PHC string.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
