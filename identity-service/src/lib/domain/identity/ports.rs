use async_trait::async_trait;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::AuthenticationResult;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginRequest;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::SignupRequest;
use crate::domain::identity::models::Username;

/// Port for the signup and login workflows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `request` - Raw signup fields
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `Validation` - A field failed its format rule
    /// * `Conflict` - Username or email is already taken
    /// * `Hashing` - Password hashing failed
    /// * `Storage` - Store operation failed
    async fn signup(&self, request: SignupRequest) -> Result<Identity, AuthError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `request` - Raw login fields
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `Validation` - Email or password failed its format rule
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Hashing` - Stored hash could not be checked
    /// * `Storage` - Store operation failed
    /// * `Token` - Token signing failed
    async fn login(&self, request: LoginRequest) -> Result<AuthenticationResult, AuthError>;

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged or expired
    fn verify_token(&self, token: &str) -> Result<auth::Claims, AuthError>;
}

/// Persistence operations for identity records.
///
/// Implementations must enforce uniqueness of username and email among
/// live records atomically with the insert. The workflow's own lookups
/// before `create` are only a fast path.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity, all or nothing.
    ///
    /// # Arguments
    /// * `identity` - Record to insert
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `DuplicateKey` - A live record already uses the username or email
    /// * `Storage` - Store operation failed
    async fn create(&self, identity: &NewIdentity) -> Result<IdentityId, StoreError>;

    /// Retrieve a live identity by username.
    ///
    /// # Returns
    /// Optional identity (None if absent or soft-deleted)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError>;

    /// Retrieve a live identity by email address.
    ///
    /// # Returns
    /// Optional identity (None if absent or soft-deleted)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError>;

    /// Mark an identity deleted. The row is kept.
    ///
    /// # Errors
    /// * `NotFound` - No live identity with this id
    /// * `Storage` - Store operation failed
    async fn soft_delete(&self, id: &IdentityId) -> Result<(), StoreError>;
}
