//! 存储接口 Trait 定义
//!
//! 定义所有数据源的异步接口：
//! - ObservationRecordStore：本地观测记录
//! - NomenclatureStore：受控词表目录
//! - AdditionalFieldStore：部署自定义附加字段
//! - DefaultPropertyValueStore：按分类等级缓存的默认字段值
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{AdditionalFieldRecord, DefaultNomenclatureValue, Nomenclature};
use async_trait::async_trait;
use domain::{
    FieldCategory, ObservationRecord, PropertyValue, RecordDefaults, RecordStatus, TaxonomicRank,
};

/// 观测记录存储接口
///
/// 提供本地 CRUD 与导出（导出即进入待同步队列）。
#[async_trait]
pub trait ObservationRecordStore: Send + Sync {
    /// 列出所有本地记录（按本地 ID 升序）
    async fn read_all(&self) -> Result<Vec<ObservationRecord>, StorageError>;

    /// 读取指定记录，不存在时返回 NotFound
    async fn read(&self, id: i64) -> Result<ObservationRecord, StorageError>;

    /// 以指定状态保存记录
    async fn save(
        &self,
        record: &ObservationRecord,
        status: RecordStatus,
    ) -> Result<ObservationRecord, StorageError>;

    /// 删除指定记录，不存在时返回 NotFound
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// 导出指定记录：补全默认值并标记为待同步
    async fn export(
        &self,
        id: i64,
        defaults: Option<&RecordDefaults>,
    ) -> Result<ObservationRecord, StorageError> {
        let record = self.read(id).await?;
        self.export_record(record, defaults).await
    }

    /// 导出内存中的记录：补全默认值并标记为待同步
    async fn export_record(
        &self,
        mut record: ObservationRecord,
        defaults: Option<&RecordDefaults>,
    ) -> Result<ObservationRecord, StorageError> {
        if let Some(defaults) = defaults {
            defaults.apply_to(&mut record);
        }
        self.save(&record, RecordStatus::ToSync).await
    }
}

/// 受控词表存储接口
#[async_trait]
pub trait NomenclatureStore: Send + Sync {
    /// 列出各术语类型的默认条目
    async fn find_default_nomenclature_values(
        &self,
    ) -> Result<Vec<DefaultNomenclatureValue>, StorageError>;

    /// 按术语类型与分类等级查找候选条目
    async fn find_nomenclature_values(
        &self,
        mnemonic: &str,
        rank: &TaxonomicRank,
    ) -> Result<Vec<Nomenclature>, StorageError>;

    /// 术语类型下的全部条目（不按分类等级过滤）
    async fn find_nomenclature_values_by_type(
        &self,
        mnemonic: &str,
    ) -> Result<Vec<Nomenclature>, StorageError>;
}

/// 附加字段配置接口
#[async_trait]
pub trait AdditionalFieldStore: Send + Sync {
    /// 按数据集与分类查找附加字段
    async fn find_additional_fields(
        &self,
        dataset_id: Option<i64>,
        category: FieldCategory,
    ) -> Result<Vec<AdditionalFieldRecord>, StorageError>;
}

/// 默认字段值缓存接口
///
/// 每个分类等级（含全通配）是独立分桶，单个分桶内的操作是原子的。
#[async_trait]
pub trait DefaultPropertyValueStore: Send + Sync {
    /// 读取分桶内的所有默认值
    async fn get(&self, rank: &TaxonomicRank) -> Result<Vec<PropertyValue>, StorageError>;

    /// 按编码写入（同编码替换，不重复）
    async fn set(&self, rank: &TaxonomicRank, values: &[PropertyValue])
    -> Result<(), StorageError>;

    /// 删除分桶内指定编码
    async fn clear(&self, rank: &TaxonomicRank, codes: &[&str]) -> Result<(), StorageError>;

    /// 清空所有分桶
    async fn clear_all(&self) -> Result<(), StorageError>;
}
