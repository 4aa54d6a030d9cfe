use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::ValidationError;
use super::validation;

/// Identity aggregate entity.
///
/// The persisted representation of a registered user. A non-null
/// `deleted_at` marks the record logically deleted but retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Attach the store-assigned identifier to a new record.
    pub fn from_new(id: IdentityId, new: NewIdentity) -> Self {
        Self {
            id,
            username: new.username,
            display_name: new.display_name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: new.created_at,
            updated_at: new.created_at,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Identity record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: Username,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-32 characters from the ASCII alphanumerics and `!@#$%^&*()_+={}[]:;,.<>?/-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new valid username.
    ///
    /// # Errors
    /// * `InvalidUsername` - Wrong length or disallowed character
    pub fn new(username: String) -> Result<Self, ValidationError> {
        validation::validate_username(&username)?;
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type, same rule as [`Username`] but mutable on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// # Errors
    /// * `InvalidName` - Wrong length or disallowed character
    pub fn new(name: String) -> Result<Self, ValidationError> {
        validation::validate_display_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Accepts the `local@domain.tld` shape only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidEmail` - Not shaped like `local@domain.tld`
    pub fn new(email: String) -> Result<Self, ValidationError> {
        validation::validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that passed the password rule.
///
/// Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `InvalidPassword` - Length, character class or alphabet rule failed
    pub fn new(password: String) -> Result<Self, ValidationError> {
        validation::validate_password(&password)?;
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Stored password digest (PHC string). Never printed or serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Raw signup input. Nothing here has been checked yet.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SignupRequest {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Raw login input.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Signup input that passed every validation rule.
#[derive(Debug)]
pub struct SignupCommand {
    pub username: Username,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Login input that passed the format rules.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token asserting the identity's email
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_sets_timestamps() {
        let now = Utc::now();
        let new = NewIdentity {
            username: Username::new("testuser".to_string()).unwrap(),
            display_name: DisplayName::new("TestUser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: PasswordHash::new("$argon2id$test_hash".to_string()),
            created_at: now,
        };

        let id = IdentityId::new();
        let identity = Identity::from_new(id, new);

        assert_eq!(identity.id, id);
        assert_eq!(identity.created_at, now);
        assert_eq!(identity.updated_at, now);
        assert!(!identity.is_deleted());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let password = Password::new("Password123".to_string()).unwrap();
        let hash = PasswordHash::new("$argon2id$secret".to_string());
        let request = SignupRequest {
            username: "testuser".to_string(),
            password: "Password123".to_string(),
            password_confirmation: "Password123".to_string(),
            ..Default::default()
        };
        let login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
        };

        assert!(!format!("{:?}", password).contains("Password123"));
        assert!(!format!("{:?}", hash).contains("secret"));
        assert!(!format!("{:?}", request).contains("Password123"));
        assert!(format!("{:?}", request).contains("testuser"));
        assert!(!format!("{:?}", login).contains("Password123"));
    }
}
