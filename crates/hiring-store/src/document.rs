//! JSON documents in wire form.
//!
//! Every document is persisted with `snake_case` object keys and decoded into
//! the `camelCase` model shape on read. A [`Collection`] is a JSON array under
//! one key, seeded from a fixture the first time it is read.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use hiring_models::{camelize_keys, snake_case_keys};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Decode wire-form JSON text into a model.
pub fn decode<T: DeserializeOwned>(raw: &str) -> StoreResult<T> {
    let wire: serde_json::Value = serde_json::from_str(raw)?;
    Ok(serde_json::from_value(camelize_keys(wire))?)
}

/// Encode a model into wire-form JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<String> {
    let camel = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&snake_case_keys(camel))?)
}

/// Read and decode the document under `key`.
pub async fn read_document<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(decode(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write `value` under `key`.
pub async fn write_document<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    store.set(key, encode(value)?).await
}

/// A JSON array of records stored under a fixed key.
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    seed: &'static str,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// `seed` is the wire-form fixture written on first access and on reset.
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str, seed: &'static str) -> Self {
        Self {
            store,
            key,
            seed,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// All records, seeding the store if the document does not exist yet.
    pub async fn load(&self) -> StoreResult<Vec<T>> {
        if let Some(items) = read_document(self.store.as_ref(), self.key).await? {
            return Ok(items);
        }

        // a concurrent mutation may have written the document in the meantime
        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    /// Like [`load`](Self::load), for callers already holding the write lock.
    async fn load_locked(&self) -> StoreResult<Vec<T>> {
        match read_document(self.store.as_ref(), self.key).await? {
            Some(items) => Ok(items),
            None => {
                info!(key = self.key, "Seeding collection from fixture");
                self.store.set(self.key, self.seed.to_string()).await?;
                decode(self.seed)
            }
        }
    }

    /// Overwrite the whole document.
    pub async fn save(&self, items: &[T]) -> StoreResult<()> {
        debug!(key = self.key, count = items.len(), "Saving collection");
        write_document(self.store.as_ref(), self.key, items).await
    }

    /// Read-modify-write under the collection lock.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn mutate<R, F>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> StoreResult<R>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_locked().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }

    /// Restore the fixture.
    pub async fn reset(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        info!(key = self.key, "Resetting collection to fixture");
        self.store.set(self.key, self.seed.to_string()).await
    }

    /// Remove the document. The next read seeds it again.
    pub async fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        info!(key = self.key, "Clearing collection");
        self.store.remove(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::MemoryStore;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Note {
        note_id: u32,
        body_text: String,
    }

    const SEED: &str = r#"[{"note_id":1,"body_text":"first"}]"#;

    fn collection() -> (Arc<MemoryStore>, Collection<Note>) {
        let store = Arc::new(MemoryStore::new());
        let notes = Collection::new(store.clone(), "notes", SEED);
        (store, notes)
    }

    #[test]
    fn test_encode_uses_snake_case_keys() {
        let raw = encode(&Note { note_id: 7, body_text: "x".into() }).unwrap();
        let wire: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(wire, serde_json::json!({ "note_id": 7, "body_text": "x" }));

        let back: Note = decode(&raw).unwrap();
        assert_eq!(back, Note { note_id: 7, body_text: "x".into() });
    }

    #[tokio::test]
    async fn test_first_load_seeds_store() {
        let (store, notes) = collection();
        assert!(store.get("notes").await.unwrap().is_none());

        let items = notes.load().await.unwrap();
        assert_eq!(items, vec![Note { note_id: 1, body_text: "first".into() }]);
        assert_eq!(store.get("notes").await.unwrap().as_deref(), Some(SEED));
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let (store, notes) = collection();
        notes.load().await.unwrap();

        let result: StoreResult<()> = notes
            .mutate(|items| {
                items.clear();
                Err(StoreError::not_found("nope"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.get("notes").await.unwrap().as_deref(), Some(SEED));
    }

    /// Memory store whose first write stalls, to widen the seeding window.
    struct SlowFirstWrite {
        inner: MemoryStore,
        stalled: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for SlowFirstWrite {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> StoreResult<()> {
            if !self.stalled.swap(true, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_seeding_does_not_overwrite_concurrent_mutation() {
        let store = Arc::new(SlowFirstWrite {
            inner: MemoryStore::new(),
            stalled: AtomicBool::new(false),
        });
        let notes = Arc::new(Collection::<Note>::new(store.clone(), "notes", SEED));

        let first_read = tokio::spawn({
            let notes = notes.clone();
            async move { notes.load().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        notes
            .mutate(|items| {
                items.push(Note { note_id: 2, body_text: "second".into() });
                Ok(())
            })
            .await
            .unwrap();
        first_read.await.unwrap().unwrap();

        let ids: Vec<u32> = notes.load().await.unwrap().iter().map(|n| n.note_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_reset_and_clear() {
        let (store, notes) = collection();
        notes
            .mutate(|items| {
                items.push(Note { note_id: 2, body_text: "second".into() });
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(notes.load().await.unwrap().len(), 2);

        notes.reset().await.unwrap();
        assert_eq!(notes.load().await.unwrap().len(), 1);

        notes.clear().await.unwrap();
        assert!(store.get("notes").await.unwrap().is_none());
    }
}
