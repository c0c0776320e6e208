//! 内存存储实现模块
//!
//! 用于测试与接线演示。
//!
//! 包含以下实现：
//! - ObservationRecordStore: InMemoryObservationRecordStore
//! - NomenclatureStore: InMemoryNomenclatureStore
//! - AdditionalFieldStore: InMemoryAdditionalFieldStore
//! - DefaultPropertyValueStore: InMemoryDefaultPropertyValueStore

pub mod additional_field;
pub mod default_value;
pub mod nomenclature;
pub mod observation_record;

pub use additional_field::*;
pub use default_value::*;
pub use nomenclature::*;
pub use observation_record::*;
