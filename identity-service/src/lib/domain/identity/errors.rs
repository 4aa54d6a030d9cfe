use std::fmt;

use thiserror::Error;

/// Input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("invalid username")]
    InvalidUsername,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid email")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("invalid password")]
    InvalidPassword,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Client-fixable input error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Attribute that must be unique among live identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

/// Error for credential store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Duplicate {0}")]
    DuplicateKey(UniqueField),

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Top-level error for signup, login and token checks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} already exists")]
    Conflict(UniqueField),

    // Same wording for unknown account and wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(field) => AuthError::Conflict(field),
            StoreError::NotFound(_) | StoreError::Storage(_) => AuthError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::new(Field::ConfirmPassword, ValidationErrorKind::PasswordMismatch);
        assert_eq!(err.to_string(), "passwords do not match");
        assert_eq!(err.field.as_str(), "confirm_password");
    }

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let err = AuthError::from(StoreError::DuplicateKey(UniqueField::Email));
        assert_eq!(err, AuthError::Conflict(UniqueField::Email));
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_storage_failure_stays_internal() {
        let err = AuthError::from(StoreError::Storage("connection refused".to_string()));
        assert!(matches!(err, AuthError::Storage(_)));
    }
}
