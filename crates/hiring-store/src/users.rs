//! User repository.

use std::sync::Arc;

use hiring_models::UserRecord;

use crate::document::Collection;
use crate::error::StoreResult;
use crate::fixtures::{USERS_KEY, USERS_SEED};
use crate::kv::KeyValueStore;

/// Stored user accounts.
pub struct UserRepository {
    users: Collection<UserRecord>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            users: Collection::new(store, USERS_KEY, USERS_SEED),
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<UserRecord>> {
        self.users.load().await
    }

    /// First user whose email and password both match exactly.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> StoreResult<Option<UserRecord>> {
        let users = self.users.load().await?;
        Ok(users
            .into_iter()
            .find(|u| u.matches_credentials(email, password)))
    }

    /// Restore the seeded user list.
    pub async fn reset(&self) -> StoreResult<()> {
        self.users.reset().await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.users.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use hiring_models::Role;

    #[tokio::test]
    async fn test_find_by_credentials() {
        let repo = UserRepository::new(Arc::new(MemoryStore::new()));

        let admin = repo
            .find_by_credentials("admin@rakamin.com", "admin123")
            .await
            .unwrap()
            .expect("seeded admin");
        assert_eq!(admin.role, Role::Admin);

        assert!(repo
            .find_by_credentials("admin@rakamin.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_credentials("nobody@rakamin.com", "admin123")
            .await
            .unwrap()
            .is_none());
    }
}
