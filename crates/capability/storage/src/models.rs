//! 数据模型
//!
//! 定义受控词表与附加字段的存储模型：
//! - 术语条目：Nomenclature（含适用的分类等级）
//! - 默认术语：DefaultNomenclatureValue
//! - 附加字段：AdditionalFieldRecord, AdditionalFieldValue

use domain::{FieldCategory, PropertyValue, TaxonomicRank, ViewKind};
use serde::{Deserialize, Serialize};

/// 术语条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomenclature {
    pub id: i64,
    pub type_mnemonic: String,
    pub code: String,
    pub label: String,
    /// 适用的分类等级；为空表示适用于所有分类。
    #[serde(default)]
    pub taxonomy: Vec<TaxonomicRank>,
}

impl Nomenclature {
    /// 是否适用于指定分类等级。
    ///
    /// 只看声明一侧的通配：声明为 (Animalia, Oiseaux) 的条目不会出现在 (Animalia, Any) 的查询里。
    pub fn applies_to(&self, rank: &TaxonomicRank) -> bool {
        self.taxonomy.is_empty() || self.taxonomy.iter().any(|declared| declared.covers(rank))
    }

    /// 转换为字段值。
    pub fn to_property_value(&self, code: &str) -> PropertyValue {
        PropertyValue::nomenclature(code, Some(self.label.clone()), Some(self.id))
    }
}

/// 术语类型的默认条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultNomenclatureValue {
    pub mnemonic: String,
    pub nomenclature_id: i64,
    #[serde(default)]
    pub label: Option<String>,
}

/// 附加字段候选值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFieldValue {
    pub label: String,
    pub value: String,
}

/// 部署自定义的附加字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFieldRecord {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
    pub category: FieldCategory,
    pub view_kind: ViewKind,
    /// 适用的数据集；为空表示适用于所有数据集。
    #[serde(default)]
    pub dataset_ids: Vec<i64>,
    #[serde(default)]
    pub nomenclature_type: Option<String>,
    #[serde(default)]
    pub values: Vec<AdditionalFieldValue>,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl AdditionalFieldRecord {
    /// 是否适用于指定数据集。
    pub fn applies_to_dataset(&self, dataset_id: Option<i64>) -> bool {
        if self.dataset_ids.is_empty() {
            return true;
        }
        dataset_id.is_some_and(|id| self.dataset_ids.contains(&id))
    }
}
