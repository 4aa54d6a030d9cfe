use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::errors::StoreError;
use crate::domain::identity::errors::UniqueField;
use crate::domain::identity::errors::ValidationError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::PasswordHash;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::CredentialStore;

// Partial unique indexes, see migrations
const USERNAME_INDEX: &str = "identities_username_live_idx";
const EMAIL_INDEX: &str = "identities_email_live_idx";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    username: String,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = StoreError;

    fn try_from(r: IdentityRow) -> Result<Self, Self::Error> {
        let id = r.id;
        let corrupt = move |e: ValidationError| {
            StoreError::Storage(format!("Stored identity {} is invalid: {}", id, e))
        };

        Ok(Identity {
            id: IdentityId(id),
            username: Username::new(r.username).map_err(corrupt)?,
            display_name: DisplayName::new(r.display_name).map_err(corrupt)?,
            email: EmailAddress::new(r.email).map_err(corrupt)?,
            password_hash: PasswordHash::new(r.password_hash),
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(&self, identity: &NewIdentity) -> Result<IdentityId, StoreError> {
        let id = IdentityId::new();

        sqlx::query(
            r#"
            INSERT INTO identities (id, username, display_name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(id.0)
        .bind(identity.username.as_str())
        .bind(identity.display_name.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password_hash.as_str())
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some(USERNAME_INDEX) => {
                            return StoreError::DuplicateKey(UniqueField::Username)
                        }
                        Some(EMAIL_INDEX) => return StoreError::DuplicateKey(UniqueField::Email),
                        _ => {}
                    }
                }
            }
            StoreError::Storage(e.to_string())
        })?;

        tracing::debug!(identity_id = %id, "Identity row inserted");

        Ok(id)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, username, display_name, email, password_hash, created_at, updated_at, deleted_at
            FROM identities
            WHERE username = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, username, display_name, email, password_hash, created_at, updated_at, deleted_at
            FROM identities
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn soft_delete(&self, id: &IdentityId) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET deleted_at = $2, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
