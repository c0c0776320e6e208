//! 观测记录聚合：记录 → 物种记录 → 计数记录（树形独占所有权）。

use crate::DomainError;
use crate::property::{PropertyMap, PropertyValue};
use crate::rank::TaxonomicRank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// 计数下限保留字段。
pub const COUNTING_MIN: &str = "count_min";
/// 计数上限保留字段。
pub const COUNTING_MAX: &str = "count_max";
/// 计数媒体列表保留字段。
pub const COUNTING_MEDIAS: &str = "medias";

static LAST_LOCAL_ID: AtomicI64 = AtomicI64::new(0);

/// 生成本地记录 ID（毫秒时间戳，进程内单调递增）。
pub fn new_local_id() -> i64 {
    let now = now_epoch_ms();
    let mut last = LAST_LOCAL_ID.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_LOCAL_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}

/// 记录生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Draft,
    ToSync,
    /// 终态：到达后本地记录立即删除。
    Synced,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Draft => "DRAFT",
            RecordStatus::ToSync => "TO_SYNC",
            RecordStatus::Synced => "SYNCED",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(RecordStatus::Draft),
            "TO_SYNC" => Ok(RecordStatus::ToSync),
            "SYNCED" => Ok(RecordStatus::Synced),
            _ => Err(DomainError::InvalidStatus(value.to_string())),
        }
    }
}

/// 被观测的分类单元。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxon {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl Taxon {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kingdom: None,
            group: None,
        }
    }

    pub fn with_rank(mut self, kingdom: impl Into<String>, group: impl Into<String>) -> Self {
        self.kingdom = Some(kingdom.into());
        self.group = Some(group.into());
        self
    }

    /// 分类等级，缺失分量视为通配。
    pub fn rank(&self) -> TaxonomicRank {
        TaxonomicRank::from_parts(self.kingdom.as_deref(), self.group.as_deref())
    }
}

/// 计数子记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingRecord {
    /// 在所属物种记录中的序号（创建时分配，之后不变）。
    pub index: u32,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl CountingRecord {
    /// 新计数，上下限默认 1/1。
    pub fn new(index: u32) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(
            COUNTING_MIN.to_string(),
            PropertyValue::number(COUNTING_MIN, Some(1)),
        );
        properties.insert(
            COUNTING_MAX.to_string(),
            PropertyValue::number(COUNTING_MAX, Some(1)),
        );
        Self { index, properties }
    }

    pub fn min(&self) -> Option<i64> {
        number_of(&self.properties, COUNTING_MIN)
    }

    pub fn max(&self) -> Option<i64> {
        number_of(&self.properties, COUNTING_MAX)
    }

    /// 设置下限，上限小于新下限时随之上调。
    pub fn set_min(&mut self, min: i64) {
        self.set_property(PropertyValue::number(COUNTING_MIN, Some(min)));
        if self.max().is_none_or(|max| max < min) {
            self.set_property(PropertyValue::number(COUNTING_MAX, Some(min)));
        }
    }

    /// 设置上限，下限大于新上限时随之下调。
    pub fn set_max(&mut self, max: i64) {
        self.set_property(PropertyValue::number(COUNTING_MAX, Some(max)));
        if self.min().is_some_and(|min| min > max) {
            self.set_property(PropertyValue::number(COUNTING_MIN, Some(max)));
        }
    }

    pub fn medias(&self) -> &[String] {
        match self.properties.get(COUNTING_MEDIAS) {
            Some(PropertyValue::Media { files, .. }) => files,
            _ => &[],
        }
    }

    pub fn set_property(&mut self, value: PropertyValue) {
        self.properties.insert(value.code().to_string(), value);
    }

    /// 所有字段值都为空时视为空计数。
    pub fn is_empty(&self) -> bool {
        self.properties.values().all(PropertyValue::is_empty)
    }
}

fn number_of(properties: &PropertyMap, code: &str) -> Option<i64> {
    match properties.get(code) {
        Some(PropertyValue::Number { value, .. }) => *value,
        _ => None,
    }
}

/// 单个物种的观测记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub taxon: Taxon,
    #[serde(default)]
    pub properties: PropertyMap,
    /// 计数列表，顺序即远端解释的计数位置。
    #[serde(default)]
    pub counting: Vec<CountingRecord>,
}

impl TaxonRecord {
    pub fn new(taxon: Taxon) -> Self {
        Self {
            taxon,
            properties: PropertyMap::new(),
            counting: Vec::new(),
        }
    }

    pub fn set_property(&mut self, value: PropertyValue) {
        self.properties.insert(value.code().to_string(), value);
    }

    /// 追加计数，序号为现有最大序号 + 1（从 1 开始）。
    pub fn add_counting(&mut self) -> &mut CountingRecord {
        let index = self
            .counting
            .iter()
            .map(|counting| counting.index)
            .max()
            .unwrap_or(0)
            + 1;
        self.counting.push(CountingRecord::new(index));
        let last = self.counting.len() - 1;
        &mut self.counting[last]
    }

    pub fn counting_mut(&mut self, index: u32) -> Option<&mut CountingRecord> {
        self.counting
            .iter_mut()
            .find(|counting| counting.index == index)
    }

    /// 删除计数，剩余计数的序号不重排。
    pub fn remove_counting(&mut self, index: u32) -> Option<CountingRecord> {
        let position = self
            .counting
            .iter()
            .position(|counting| counting.index == index)?;
        Some(self.counting.remove(position))
    }
}

/// 观测记录（表头 + 物种记录列表）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// 本地 ID，分配后不可变。
    pub id: i64,
    /// 远端分配的 ID，仅在本次同步的表头被接受后设置。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<i64>,
    pub status: RecordStatus,
    #[serde(default)]
    pub dataset_id: Option<i64>,
    #[serde(default)]
    pub digitiser_id: Option<i64>,
    #[serde(default)]
    pub observer_ids: Vec<i64>,
    #[serde(default)]
    pub date_min: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_max: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: Option<String>,
    /// 几何（GeoJSON），核心逻辑只负责透传。
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(default)]
    pub properties: PropertyMap,
    /// 物种记录列表，保存/加载后顺序不变。
    #[serde(default)]
    pub taxa: Vec<TaxonRecord>,
}

impl ObservationRecord {
    /// 新草稿记录。
    pub fn new(id: i64) -> Self {
        Self {
            id,
            remote_id: None,
            status: RecordStatus::Draft,
            dataset_id: None,
            digitiser_id: None,
            observer_ids: Vec::new(),
            date_min: None,
            date_max: None,
            comment: None,
            geometry: None,
            properties: PropertyMap::new(),
            taxa: Vec::new(),
        }
    }

    pub fn set_property(&mut self, value: PropertyValue) {
        self.properties.insert(value.code().to_string(), value);
    }

    /// 添加物种记录；同一分类单元已存在时返回已有记录。
    pub fn add_taxon(&mut self, taxon: Taxon) -> &mut TaxonRecord {
        let position = match self
            .taxa
            .iter()
            .position(|record| record.taxon.id == taxon.id)
        {
            Some(position) => position,
            None => {
                self.taxa.push(TaxonRecord::new(taxon));
                self.taxa.len() - 1
            }
        };
        &mut self.taxa[position]
    }

    pub fn find_taxon(&self, taxon_id: i64) -> Option<&TaxonRecord> {
        self.taxa.iter().find(|record| record.taxon.id == taxon_id)
    }

    pub fn find_taxon_mut(&mut self, taxon_id: i64) -> Option<&mut TaxonRecord> {
        self.taxa
            .iter_mut()
            .find(|record| record.taxon.id == taxon_id)
    }

    /// 删除物种记录，剩余记录保持原顺序。
    pub fn remove_taxon(&mut self, taxon_id: i64) -> Option<TaxonRecord> {
        let position = self
            .taxa
            .iter()
            .position(|record| record.taxon.id == taxon_id)?;
        Some(self.taxa.remove(position))
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 导出记录时补全的部署默认值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDefaults {
    pub dataset_id: Option<i64>,
    pub observer_ids: Vec<i64>,
}

impl RecordDefaults {
    /// 仅补全缺失的数据集与观察者，不覆盖已有值。
    pub fn apply_to(&self, record: &mut ObservationRecord) {
        if record.dataset_id.is_none() {
            record.dataset_id = self.dataset_id;
        }
        if record.observer_ids.is_empty() {
            record.observer_ids = self.observer_ids.clone();
        }
    }
}
