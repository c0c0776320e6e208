//! 表头补偿守卫。
//!
//! 表头被服务器接受后持有 `remote_id`；同步 future 在完成前被丢弃时，
//! 在当前运行时上派生补偿删除任务。

use occtax_remote::RemoteRecordApi;
use occtax_telemetry::{record_compensation_attempt, record_compensation_failure};
use std::sync::Arc;

/// 删除远端表头；失败只记录日志。
pub(crate) async fn compensate(remote: &dyn RemoteRecordApi, remote_id: i64, record_id: i64) {
    record_compensation_attempt();
    tracing::info!(
        target: "occtax.sync",
        record_id,
        remote_id,
        "sync_compensation_attempted"
    );
    if let Err(err) = remote.delete_header(remote_id).await {
        record_compensation_failure();
        tracing::warn!(
            target: "occtax.sync",
            record_id,
            remote_id,
            error = %err,
            "sync_compensation_failed"
        );
    }
}

pub(crate) struct CompensationGuard {
    remote: Option<Arc<dyn RemoteRecordApi>>,
    remote_id: i64,
    record_id: i64,
}

impl CompensationGuard {
    pub(crate) fn arm(remote: Arc<dyn RemoteRecordApi>, remote_id: i64, record_id: i64) -> Self {
        Self {
            remote: Some(remote),
            remote_id,
            record_id,
        }
    }

    /// 正常完成或已同步补偿后解除。
    pub(crate) fn disarm(&mut self) {
        self.remote = None;
    }
}

impl Drop for CompensationGuard {
    fn drop(&mut self) {
        let Some(remote) = self.remote.take() else {
            return;
        };
        let (remote_id, record_id) = (self.remote_id, self.record_id);
        tracing::warn!(
            target: "occtax.sync",
            record_id,
            remote_id,
            "sync_cancelled_after_header"
        );
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    compensate(remote.as_ref(), remote_id, record_id).await;
                });
            }
            Err(_) => {
                record_compensation_failure();
                tracing::warn!(
                    target: "occtax.sync",
                    record_id,
                    remote_id,
                    "sync_compensation_skipped_no_runtime"
                );
            }
        }
    }
}
