use domain::RecordStatus;

/// 同步所处阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    Auth,
    Settings,
    Validation,
    Read,
    HeaderSend,
    TaxonSend,
    /// 仅用于日志：补偿与本地清理失败不会作为结果返回。
    Cleanup,
}

impl SyncPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::Auth => "auth",
            SyncPhase::Settings => "settings",
            SyncPhase::Validation => "validation",
            SyncPhase::Read => "read",
            SyncPhase::HeaderSend => "header_send",
            SyncPhase::TaxonSend => "taxon_send",
            SyncPhase::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 同步错误。
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("auth error: {0}")]
    Auth(String),
    #[error("settings error: {0}")]
    Settings(String),
    #[error("remote configuration error: {0}")]
    RemoteConfig(String),
    #[error("invalid record status: expected TO_SYNC, got {0}")]
    InvalidState(RecordStatus),
    #[error("read error: {0}")]
    Read(String),
    #[error("header send error: {0}")]
    HeaderSend(String),
    #[error("taxon send error (index {taxon_index}, taxon {taxon_id}): {message}")]
    TaxonSend {
        taxon_index: usize,
        taxon_id: i64,
        message: String,
    },
}

impl SyncError {
    pub fn phase(&self) -> SyncPhase {
        match self {
            SyncError::Auth(_) => SyncPhase::Auth,
            SyncError::Settings(_) | SyncError::RemoteConfig(_) => SyncPhase::Settings,
            SyncError::InvalidState(_) => SyncPhase::Validation,
            SyncError::Read(_) => SyncPhase::Read,
            SyncError::HeaderSend(_) => SyncPhase::HeaderSend,
            SyncError::TaxonSend { .. } => SyncPhase::TaxonSend,
        }
    }
}
