use crate::error::{SyncError, SyncPhase};
use crate::guard::{CompensationGuard, compensate};
use api_contract::{HeaderPayload, TaxonPayload};
use domain::{ObservationRecord, RecordStatus};
use occtax_auth::AuthProvider;
use occtax_config::SettingsProvider;
use occtax_remote::{RemoteClientConfig, RemoteRecordApi};
use occtax_storage::ObservationRecordStore;
use occtax_telemetry::{
    new_sync_ids, record_cleanup_failure, record_header_sent, record_sync_attempt,
    record_sync_failure, record_sync_success, record_taxon_sent,
};
use std::sync::Arc;
use tracing::Instrument;

/// 单条记录同步成功的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub record_id: i64,
    pub remote_id: i64,
    pub taxa_sent: usize,
    /// 本地记录是否已删除（删除失败不影响同步成功）。
    pub local_deleted: bool,
}

/// 单条记录同步失败。
#[derive(Debug)]
pub struct SyncFailure {
    pub record_id: i64,
    pub error: SyncError,
}

/// 队列同步汇总。
#[derive(Debug, Default)]
pub struct SyncSummary {
    pub synced: Vec<SyncReport>,
    pub failed: Vec<SyncFailure>,
}

/// 观测记录同步服务。
///
/// 不做幂等去重：物种阶段失败后表头已被补偿删除，调用方重试会在远端创建新的表头。
#[derive(Clone)]
pub struct SynchronizeObservationRecord {
    auth: Arc<dyn AuthProvider>,
    settings: Arc<dyn SettingsProvider>,
    records: Arc<dyn ObservationRecordStore>,
    remote: Arc<dyn RemoteRecordApi>,
}

impl SynchronizeObservationRecord {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        settings: Arc<dyn SettingsProvider>,
        records: Arc<dyn ObservationRecordStore>,
        remote: Arc<dyn RemoteRecordApi>,
    ) -> Self {
        Self {
            auth,
            settings,
            records,
            remote,
        }
    }

    /// 同步一条记录。
    ///
    /// 前置条件（会话、设置与同步地址、`TO_SYNC` 状态）不满足时不发起任何远端调用。
    pub async fn synchronize(&self, record: &ObservationRecord) -> Result<SyncReport, SyncError> {
        let ids = new_sync_ids();
        let span = tracing::info_span!(
            target: "occtax.sync",
            "sync_record",
            record_id = record.id,
            attempt_id = %ids.attempt_id
        );
        record_sync_attempt();
        let result = self.run(record).instrument(span).await;
        match &result {
            Ok(report) => {
                record_sync_success();
                tracing::info!(
                    target: "occtax.sync",
                    record_id = report.record_id,
                    remote_id = report.remote_id,
                    taxa_sent = report.taxa_sent,
                    local_deleted = report.local_deleted,
                    attempt_id = %ids.attempt_id,
                    "sync_completed"
                );
            }
            Err(err) => {
                record_sync_failure();
                tracing::warn!(
                    target: "occtax.sync",
                    record_id = record.id,
                    phase = %err.phase(),
                    error = %err,
                    attempt_id = %ids.attempt_id,
                    "sync_failed"
                );
            }
        }
        result
    }

    async fn run(&self, record: &ObservationRecord) -> Result<SyncReport, SyncError> {
        let session = self
            .auth
            .current_session()
            .await
            .map_err(|err| SyncError::Auth(err.to_string()))?;
        let settings = self
            .settings
            .load_settings()
            .await
            .map_err(|err| SyncError::Settings(err.to_string()))?;
        let endpoint = settings
            .sync_endpoint()
            .map_err(|err| SyncError::Settings(err.to_string()))?;
        if record.status != RecordStatus::ToSync {
            return Err(SyncError::InvalidState(record.status));
        }

        self.remote
            .configure(RemoteClientConfig::new(endpoint).with_access_token(session.token))
            .map_err(|err| SyncError::RemoteConfig(err.to_string()))?;

        let mut loaded = self
            .records
            .read(record.id)
            .await
            .map_err(|err| SyncError::Read(err.to_string()))?;

        let remote_id = self
            .remote
            .send_header(&HeaderPayload::from(&loaded))
            .await
            .map_err(|err| SyncError::HeaderSend(err.to_string()))?;
        record_header_sent();
        loaded.remote_id = Some(remote_id);
        tracing::info!(
            target: "occtax.sync",
            record_id = loaded.id,
            remote_id,
            taxa = loaded.taxa.len(),
            "sync_header_sent"
        );

        let mut guard = CompensationGuard::arm(Arc::clone(&self.remote), remote_id, loaded.id);
        for (taxon_index, taxon) in loaded.taxa.iter().enumerate() {
            let payload = TaxonPayload::from(taxon);
            if let Err(err) = self
                .remote
                .send_taxon(remote_id, taxon_index, &payload)
                .await
            {
                guard.disarm();
                compensate(self.remote.as_ref(), remote_id, loaded.id).await;
                return Err(SyncError::TaxonSend {
                    taxon_index,
                    taxon_id: taxon.taxon.id,
                    message: err.to_string(),
                });
            }
            record_taxon_sent();
            tracing::debug!(
                target: "occtax.sync",
                record_id = loaded.id,
                remote_id,
                taxon_index,
                taxon_id = taxon.taxon.id,
                countings = taxon.counting.len(),
                "sync_taxon_sent"
            );
        }
        guard.disarm();

        let local_deleted = match self.records.delete(loaded.id).await {
            Ok(()) => true,
            Err(err) => {
                record_cleanup_failure();
                tracing::warn!(
                    target: "occtax.sync",
                    record_id = loaded.id,
                    remote_id,
                    phase = %SyncPhase::Cleanup,
                    error = %err,
                    "sync_cleanup_failed"
                );
                false
            }
        };

        Ok(SyncReport {
            record_id: loaded.id,
            remote_id,
            taxa_sent: loaded.taxa.len(),
            local_deleted,
        })
    }

    /// 逐条同步本地所有 `TO_SYNC` 记录（按存储顺序）。
    ///
    /// 会话或设置错误对每条记录都会失败，遇到时立即停止。
    pub async fn drain_queue(&self) -> Result<SyncSummary, SyncError> {
        let records = self
            .records
            .read_all()
            .await
            .map_err(|err| SyncError::Read(err.to_string()))?;
        let mut summary = SyncSummary::default();
        for record in records
            .iter()
            .filter(|record| record.status == RecordStatus::ToSync)
        {
            match self.synchronize(record).await {
                Ok(report) => summary.synced.push(report),
                Err(error) => {
                    let stop = matches!(error.phase(), SyncPhase::Auth | SyncPhase::Settings);
                    summary.failed.push(SyncFailure {
                        record_id: record.id,
                        error,
                    });
                    if stop {
                        break;
                    }
                }
            }
        }
        Ok(summary)
    }
}
