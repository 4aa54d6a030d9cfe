use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::UniqueField;
use crate::domain::identity::models::AuthenticationResult;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::LoginRequest;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::PasswordHash;
use crate::domain::identity::models::SignupRequest;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::identity::validation::validate_login;
use crate::domain::identity::validation::validate_signup;

/// Domain service implementation of the signup and login workflows.
///
/// Holds no per-request state. Each call validates first, then talks to the
/// store, then hashes or issues a token, and stops at the first failure.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `tokens` - Token service bound to the process signing key
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(store: Arc<CS>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            tokens,
        }
    }

    // Argon2 is CPU-bound, keep it off the async workers
    async fn hash_password(&self, password: Password) -> Result<PasswordHash, AuthError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map(PasswordHash::new)
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: Password,
        hash: PasswordHash,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.verify(password.expose(), hash.as_str()))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn signup(&self, request: SignupRequest) -> Result<Identity, AuthError> {
        let command = validate_signup(request).inspect_err(|e| {
            tracing::debug!(field = %e.field, reason = %e.kind, "Signup rejected");
        })?;

        if self
            .store
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %command.username, "Signup rejected, username taken");
            return Err(AuthError::Conflict(UniqueField::Username));
        }

        if self.store.find_by_email(&command.email).await?.is_some() {
            tracing::debug!(email = %command.email, "Signup rejected, email taken");
            return Err(AuthError::Conflict(UniqueField::Email));
        }

        let password_hash = self.hash_password(command.password).await?;

        let new_identity = NewIdentity {
            username: command.username,
            display_name: command.display_name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent signup can still win the race here; the store's
        // unique constraint turns that into a Conflict.
        let id = self.store.create(&new_identity).await?;
        let identity = Identity::from_new(id, new_identity);

        tracing::info!(
            identity_id = %identity.id,
            username = %identity.username,
            "Identity created"
        );

        Ok(identity)
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthenticationResult, AuthError> {
        let command = validate_login(request).inspect_err(|e| {
            tracing::debug!(field = %e.field, reason = %e.kind, "Login rejected");
        })?;

        let identity = match self.store.find_by_email(&command.email).await? {
            Some(identity) => identity,
            None => {
                tracing::info!(email = %command.email, "Login failed, unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let is_valid = self
            .verify_password(command.password, identity.password_hash.clone())
            .await?;

        if !is_valid {
            tracing::info!(identity_id = %identity.id, "Login failed, wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(identity.email.as_str())
            .map_err(|e| AuthError::Token(e.to_string()))?;

        tracing::info!(identity_id = %identity.id, "Token issued");

        Ok(AuthenticationResult { access_token })
    }

    fn verify_token(&self, token: &str) -> Result<auth::Claims, AuthError> {
        self.tokens
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)
    }
}
