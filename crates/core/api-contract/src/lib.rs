//! 远端观测记录 API 的请求/响应契约。
//!
//! 表头与物种分别提交：表头不含物种，物种载荷内的计数按列表顺序输出。

use chrono::{DateTime, Utc};
use domain::{CountingRecord, ObservationRecord, PropertyMap, PropertyValue, TaxonRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 表头提交体（不含物种）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderPayload {
    pub id_dataset: Option<i64>,
    pub id_digitiser: Option<i64>,
    pub observers: Vec<i64>,
    pub date_min: Option<DateTime<Utc>>,
    pub date_max: Option<DateTime<Utc>>,
    pub comment: Option<String>,
    pub geometry: Option<Value>,
    pub properties: BTreeMap<String, Value>,
}

impl From<&ObservationRecord> for HeaderPayload {
    fn from(record: &ObservationRecord) -> Self {
        Self {
            id_dataset: record.dataset_id,
            id_digitiser: record.digitiser_id,
            observers: record.observer_ids.clone(),
            date_min: record.date_min,
            date_max: record.date_max,
            comment: record.comment.clone(),
            geometry: record.geometry.clone(),
            properties: properties_to_json(&record.properties),
        }
    }
}

/// 单个计数的提交体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingPayload {
    pub index: u32,
    pub properties: BTreeMap<String, Value>,
}

impl From<&CountingRecord> for CountingPayload {
    fn from(counting: &CountingRecord) -> Self {
        Self {
            index: counting.index,
            properties: properties_to_json(&counting.properties),
        }
    }
}

/// 物种提交体，`counting` 顺序与本地列表一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonPayload {
    pub id_taxon: i64,
    pub name_taxon: String,
    pub properties: BTreeMap<String, Value>,
    pub counting: Vec<CountingPayload>,
}

impl From<&TaxonRecord> for TaxonPayload {
    fn from(record: &TaxonRecord) -> Self {
        Self {
            id_taxon: record.taxon.id,
            name_taxon: record.taxon.name.clone(),
            properties: properties_to_json(&record.properties),
            counting: record.counting.iter().map(CountingPayload::from).collect(),
        }
    }
}

/// 表头创建成功的响应。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCreated {
    #[serde(alias = "id_releve")]
    pub id: i64,
}

/// 远端错误响应体（字段均可缺省）。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "msg", alias = "description")]
    pub message: Option<String>,
}

/// 字段值的 JSON 表示；空值返回 None。
pub fn property_to_json(value: &PropertyValue) -> Option<Value> {
    if value.is_empty() {
        return None;
    }
    let json = match value {
        PropertyValue::Nomenclature { id, .. } => Value::from(*id),
        PropertyValue::Number { value, .. } => Value::from(*value),
        PropertyValue::Text { value, .. } => Value::from(value.clone()),
        PropertyValue::Media { files, .. } => Value::from(files.clone()),
    };
    Some(json)
}

fn properties_to_json(properties: &PropertyMap) -> BTreeMap<String, Value> {
    properties
        .iter()
        .filter_map(|(code, value)| property_to_json(value).map(|json| (code.clone(), json)))
        .collect()
}
