//! 附加字段内存实现

use crate::error::StorageError;
use crate::models::AdditionalFieldRecord;
use crate::traits::AdditionalFieldStore;
use domain::FieldCategory;
use std::sync::RwLock;

/// 附加字段内存存储
#[derive(Default)]
pub struct InMemoryAdditionalFieldStore {
    fields: RwLock<Vec<AdditionalFieldRecord>>,
}

impl InMemoryAdditionalFieldStore {
    pub fn new(fields: Vec<AdditionalFieldRecord>) -> Self {
        Self {
            fields: RwLock::new(fields),
        }
    }
}

#[async_trait::async_trait]
impl AdditionalFieldStore for InMemoryAdditionalFieldStore {
    async fn find_additional_fields(
        &self,
        dataset_id: Option<i64>,
        category: FieldCategory,
    ) -> Result<Vec<AdditionalFieldRecord>, StorageError> {
        let fields = self.fields.read().map_err(|_| StorageError::Lock)?;
        Ok(fields
            .iter()
            .filter(|field| field.category == category && field.applies_to_dataset(dataset_id))
            .cloned()
            .collect())
    }
}
