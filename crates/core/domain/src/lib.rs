//! 观测记录领域模型：字段值、观测记录聚合、可编辑字段描述。

pub mod field;
pub mod property;
pub mod rank;
pub mod record;

pub use field::{EditableField, FieldCategory, PropertySettings, ViewKind};
pub use property::{PropertyMap, PropertyValue};
pub use rank::TaxonomicRank;
pub use record::{
    COUNTING_MAX, COUNTING_MEDIAS, COUNTING_MIN, CountingRecord, ObservationRecord,
    RecordDefaults, RecordStatus, Taxon, TaxonRecord, new_local_id,
};

/// 领域层错误（解析与 JSON 转换）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    InvalidStatus(String),
    InvalidCategory(String),
    InvalidViewKind(String),
    Json(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidStatus(value) => write!(f, "invalid record status: {}", value),
            DomainError::InvalidCategory(value) => write!(f, "invalid field category: {}", value),
            DomainError::InvalidViewKind(value) => write!(f, "invalid view kind: {}", value),
            DomainError::Json(message) => write!(f, "json error: {}", message),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Json(err.to_string())
    }
}
