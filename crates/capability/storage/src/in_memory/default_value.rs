//! 默认字段值内存实现
//!
//! 每个分类等级一个分桶，分桶各自持有互斥锁：
//! 同一分桶的读写互斥，不同分桶之间互不阻塞。

use crate::error::StorageError;
use crate::traits::DefaultPropertyValueStore;
use domain::{PropertyValue, TaxonomicRank};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

type Bucket = Arc<Mutex<Vec<PropertyValue>>>;

/// 默认字段值内存存储
#[derive(Default)]
pub struct InMemoryDefaultPropertyValueStore {
    buckets: RwLock<HashMap<TaxonomicRank, Bucket>>,
}

impl InMemoryDefaultPropertyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, rank: &TaxonomicRank) -> Result<Option<Bucket>, StorageError> {
        let buckets = self.buckets.read().map_err(|_| StorageError::Lock)?;
        Ok(buckets.get(rank).cloned())
    }

    fn bucket_or_insert(&self, rank: &TaxonomicRank) -> Result<Bucket, StorageError> {
        if let Some(bucket) = self.bucket(rank)? {
            return Ok(bucket);
        }
        let mut buckets = self.buckets.write().map_err(|_| StorageError::Lock)?;
        Ok(buckets.entry(rank.clone()).or_default().clone())
    }
}

#[async_trait::async_trait]
impl DefaultPropertyValueStore for InMemoryDefaultPropertyValueStore {
    async fn get(&self, rank: &TaxonomicRank) -> Result<Vec<PropertyValue>, StorageError> {
        let Some(bucket) = self.bucket(rank)? else {
            return Ok(Vec::new());
        };
        let values = bucket.lock().map_err(|_| StorageError::Lock)?;
        Ok(values.clone())
    }

    async fn set(
        &self,
        rank: &TaxonomicRank,
        values: &[PropertyValue],
    ) -> Result<(), StorageError> {
        if values.is_empty() {
            return Ok(());
        }
        // 同一批次中同编码以最后一个为准
        let mut incoming: Vec<PropertyValue> = Vec::with_capacity(values.len());
        for value in values {
            incoming.retain(|existing| existing.code() != value.code());
            incoming.push(value.clone());
        }

        let bucket = self.bucket_or_insert(rank)?;
        let mut stored = bucket.lock().map_err(|_| StorageError::Lock)?;
        stored.retain(|existing| !incoming.iter().any(|value| value.code() == existing.code()));
        stored.extend(incoming);
        tracing::debug!(
            target: "occtax.storage",
            rank = %rank,
            count = stored.len(),
            "default_values_saved"
        );
        Ok(())
    }

    async fn clear(&self, rank: &TaxonomicRank, codes: &[&str]) -> Result<(), StorageError> {
        let Some(bucket) = self.bucket(rank)? else {
            return Ok(());
        };
        let mut stored = bucket.lock().map_err(|_| StorageError::Lock)?;
        stored.retain(|existing| !codes.contains(&existing.code()));
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let buckets = self.buckets.read().map_err(|_| StorageError::Lock)?;
        for bucket in buckets.values() {
            bucket.lock().map_err(|_| StorageError::Lock)?.clear();
        }
        Ok(())
    }
}
