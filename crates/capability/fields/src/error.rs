/// 字段解析错误。
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("nomenclature catalog error: {0}")]
    Catalog(String),
    #[error("additional fields error: {0}")]
    AdditionalFields(String),
    #[error("default values error: {0}")]
    DefaultValues(String),
}
