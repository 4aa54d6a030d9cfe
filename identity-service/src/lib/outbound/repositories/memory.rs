use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::errors::StoreError;
use crate::domain::identity::errors::UniqueField;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::CredentialStore;

/// Process-local credential store.
///
/// The uniqueness check and the insert run under one write lock, so two
/// concurrent creates with the same username or email cannot both succeed.
/// Soft-deleted records stay in the map.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, deleted ones included.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, identity: &NewIdentity) -> Result<IdentityId, StoreError> {
        let mut identities = self.identities.write().await;

        let live = identities.values().filter(|existing| !existing.is_deleted());
        for existing in live {
            if existing.username == identity.username {
                return Err(StoreError::DuplicateKey(UniqueField::Username));
            }
            if existing.email == identity.email {
                return Err(StoreError::DuplicateKey(UniqueField::Email));
            }
        }

        let id = IdentityId::new();
        identities.insert(id, Identity::from_new(id, identity.clone()));

        Ok(id)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| !identity.is_deleted() && &identity.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| !identity.is_deleted() && &identity.email == email)
            .cloned())
    }

    async fn soft_delete(&self, id: &IdentityId) -> Result<(), StoreError> {
        let mut identities = self.identities.write().await;

        match identities.get_mut(id) {
            Some(identity) if !identity.is_deleted() => {
                let now = Utc::now();
                identity.deleted_at = Some(now);
                identity.updated_at = now;
                Ok(())
            }
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
