//! Single-slot session storage.

use std::sync::Arc;

use hiring_models::Session;

use crate::document::{read_document, write_document};
use crate::error::StoreResult;
use crate::fixtures::SESSION_KEY;
use crate::kv::KeyValueStore;

/// Holds at most one session. Saving replaces whatever was there.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored session, expired or not.
    pub async fn get(&self) -> StoreResult<Option<Session>> {
        read_document(self.store.as_ref(), SESSION_KEY).await
    }

    pub async fn save(&self, session: &Session) -> StoreResult<()> {
        write_document(self.store.as_ref(), SESSION_KEY, session).await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.store.remove(SESSION_KEY).await
    }
}
