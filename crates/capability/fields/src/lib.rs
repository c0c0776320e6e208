//! 可编辑字段解析：内置字段目录、部署设置合并、附加字段、缓存默认值锁定。

mod catalog;
mod error;
mod merge;
mod repository;
mod resolver;

pub use catalog::builtin_fields;
pub use error::FieldError;
pub use merge::apply_settings;
pub use repository::{FieldCatalog, NomenclatureRepository};
pub use resolver::{EditableFieldResolver, sort_media_last};
