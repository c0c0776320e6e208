//! # Occtax Storage 模块
//!
//! 数据源抽象层：核心逻辑只通过这里的 Trait 访问本地记录、受控词表、
//! 附加字段配置与默认值缓存，不关心具体存储引擎。
//!
//! - [`traits`]：存储接口定义
//! - [`models`]：受控词表与附加字段模型
//! - [`error`]：存储错误类型
//! - [`validation`]：保存前的一致性校验
//! - [`in_memory`]：内存实现（`RwLock` 保护，用于测试与接线）
//! - [`json_file`]：按目录存放的 JSON 记录文件
//!
//! 默认值缓存只存在于进程内，不做持久化。

pub mod error;
pub mod in_memory;
pub mod json_file;
pub mod models;
pub mod traits;
pub mod validation;

pub use error::*;
pub use json_file::FileObservationRecordStore;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{
    InMemoryAdditionalFieldStore, InMemoryDefaultPropertyValueStore, InMemoryNomenclatureStore,
    InMemoryObservationRecordStore,
};
