//! Read-modify-write access to one user's sequence in one category.
//!
//! Every mutation reads the whole sequence, changes it in memory and writes it
//! back with a single `set`. Nothing serializes two writers for the same key:
//! concurrent mutations race and the last `set` wins.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::db::{KvStore, StoreError, StoreResult};
use crate::models::{Identified, Placement, Record};

pub struct Collection<R> {
    store: Arc<dyn KvStore>,
    key: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Collection<R> {
    pub fn new(store: Arc<dyn KvStore>, user_id: &str) -> Self {
        Self {
            store,
            key: R::CATEGORY.storage_key(user_id),
            _record: PhantomData,
        }
    }

    /// The full sequence, or empty if the user has never written one.
    pub async fn list(&self) -> StoreResult<Vec<R>> {
        match self.store.get(&self.key).await? {
            Some(value) => serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
                key: self.key.clone(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    pub async fn create(&self, record: R) -> StoreResult<R> {
        let mut records = self.list().await?;
        match R::CATEGORY.placement() {
            Placement::Prepend => records.insert(0, record.clone()),
            Placement::Append => records.push(record.clone()),
        }
        self.save(&records).await?;

        tracing::debug!(key = %self.key, len = records.len(), "Record created");
        Ok(record)
    }

    async fn save(&self, records: &[R]) -> StoreResult<()> {
        let value: Value = serde_json::to_value(records).map_err(StoreError::Encode)?;
        self.store.set(&self.key, value).await
    }
}

impl<R: Identified> Collection<R> {
    /// Replace the first record whose id equals `id`, keeping its position.
    /// Returns `None` without writing when no record matches.
    pub async fn update(&self, id: &str, replacement: R) -> StoreResult<Option<R>> {
        let mut records = self.list().await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        *slot = replacement.clone();
        self.save(&records).await?;

        tracing::debug!(key = %self.key, id = %id, "Record replaced");
        Ok(Some(replacement))
    }

    /// Remove every record whose id equals `id`. Always writes, even when
    /// nothing matched.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let records = self.list().await?;
        let before = records.len();
        let remaining: Vec<R> = records.into_iter().filter(|r| r.id() != id).collect();
        self.save(&remaining).await?;

        tracing::debug!(
            key = %self.key,
            id = %id,
            removed = before - remaining.len(),
            "Records deleted"
        );
        Ok(())
    }
}
