//! 观测记录内存实现

use crate::error::StorageError;
use crate::traits::ObservationRecordStore;
use crate::validation::ensure_valid_record;
use domain::{ObservationRecord, RecordStatus};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// 观测记录内存存储（按本地 ID 有序）
#[derive(Default)]
pub struct InMemoryObservationRecordStore {
    records: RwLock<BTreeMap<i64, ObservationRecord>>,
}

impl InMemoryObservationRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有记录初始化（状态保持不变）
    pub fn with_records(records: impl IntoIterator<Item = ObservationRecord>) -> Self {
        let records = records.into_iter().map(|record| (record.id, record)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// 当前记录数
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ObservationRecordStore for InMemoryObservationRecordStore {
    async fn read_all(&self) -> Result<Vec<ObservationRecord>, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::Lock)?;
        Ok(records.values().cloned().collect())
    }

    async fn read(&self, id: i64) -> Result<ObservationRecord, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::Lock)?;
        records
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("record {id}")))
    }

    async fn save(
        &self,
        record: &ObservationRecord,
        status: RecordStatus,
    ) -> Result<ObservationRecord, StorageError> {
        ensure_valid_record(record)?;
        let mut saved = record.clone();
        saved.status = status;
        let mut records = self.records.write().map_err(|_| StorageError::Lock)?;
        records.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| StorageError::Lock)?;
        records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(format!("record {id}")))
    }
}
