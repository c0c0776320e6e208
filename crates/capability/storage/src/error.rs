//! 存储层错误类型
//!
//! 定义统一的存储错误类型，用于封装底层错误：
//! - 记录不存在
//! - 文件读写错误
//! - JSON 编解码错误
//! - 数据一致性错误

/// 存储错误。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid record: {0}")]
    Invalid(String),
    #[error("lock failed")]
    Lock,
    #[error("{0}")]
    Other(String),
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<domain::DomainError> for StorageError {
    fn from(err: domain::DomainError) -> Self {
        Self::Serialization(err.to_string())
    }
}
