//! 受控词表内存实现

use crate::error::StorageError;
use crate::models::{DefaultNomenclatureValue, Nomenclature};
use crate::traits::NomenclatureStore;
use domain::TaxonomicRank;
use std::sync::{PoisonError, RwLock};

/// 受控词表内存存储
#[derive(Default)]
pub struct InMemoryNomenclatureStore {
    nomenclatures: RwLock<Vec<Nomenclature>>,
    defaults: RwLock<Vec<DefaultNomenclatureValue>>,
}

impl InMemoryNomenclatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nomenclature(mut self, nomenclature: Nomenclature) -> Self {
        self.nomenclatures
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push(nomenclature);
        self
    }

    /// 登记术语类型的默认条目（标签从已登记的条目中补全）
    pub fn with_default(mut self, mnemonic: impl Into<String>, nomenclature_id: i64) -> Self {
        self.defaults
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DefaultNomenclatureValue {
                mnemonic: mnemonic.into(),
                nomenclature_id,
                label: None,
            });
        self
    }

    fn select(
        &self,
        filter: impl Fn(&Nomenclature) -> bool,
    ) -> Result<Vec<Nomenclature>, StorageError> {
        let nomenclatures = self.nomenclatures.read().map_err(|_| StorageError::Lock)?;
        Ok(nomenclatures.iter().filter(|item| filter(item)).cloned().collect())
    }
}

#[async_trait::async_trait]
impl NomenclatureStore for InMemoryNomenclatureStore {
    async fn find_default_nomenclature_values(
        &self,
    ) -> Result<Vec<DefaultNomenclatureValue>, StorageError> {
        let defaults = self.defaults.read().map_err(|_| StorageError::Lock)?;
        let nomenclatures = self.nomenclatures.read().map_err(|_| StorageError::Lock)?;
        Ok(defaults
            .iter()
            .map(|default| {
                let label = default.label.clone().or_else(|| {
                    nomenclatures
                        .iter()
                        .find(|item| item.id == default.nomenclature_id)
                        .map(|item| item.label.clone())
                });
                DefaultNomenclatureValue {
                    label,
                    ..default.clone()
                }
            })
            .collect())
    }

    async fn find_nomenclature_values(
        &self,
        mnemonic: &str,
        rank: &TaxonomicRank,
    ) -> Result<Vec<Nomenclature>, StorageError> {
        self.select(|item| item.type_mnemonic == mnemonic && item.applies_to(rank))
    }

    async fn find_nomenclature_values_by_type(
        &self,
        mnemonic: &str,
    ) -> Result<Vec<Nomenclature>, StorageError> {
        self.select(|item| item.type_mnemonic == mnemonic)
    }
}
