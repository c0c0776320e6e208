//! 同步队列命令行：把本地所有待同步记录推送到服务器一次。

use occtax_auth::{AuthError, AuthSession, InMemoryAuthProvider};
use occtax_config::{AppConfig, JsonFileSettingsProvider};
use occtax_remote::HttpRemoteRecordApi;
use occtax_storage::FileObservationRecordStore;
use occtax_sync::SynchronizeObservationRecord;
use occtax_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let auth = Arc::new(auth_provider(&config)?);
    let settings = Arc::new(JsonFileSettingsProvider::new(config.settings_path.clone()));
    let records = Arc::new(FileObservationRecordStore::new(config.records_dir.clone()));
    let remote = Arc::new(HttpRemoteRecordApi::new(Duration::from_secs(
        config.http_timeout_seconds,
    ))?);
    info!(
        target: "occtax.app",
        records_dir = %config.records_dir.display(),
        settings_path = %config.settings_path.display(),
        "sync_queue_started"
    );

    let engine = SynchronizeObservationRecord::new(auth, settings, records, remote);
    let summary = engine.drain_queue().await?;

    let snapshot = metrics().snapshot();
    info!(
        target: "occtax.app",
        synced = summary.synced.len(),
        failed = summary.failed.len(),
        compensations = snapshot.compensations_attempted,
        compensations_failed = snapshot.compensations_failed,
        cleanup_failures = snapshot.cleanup_failures,
        "sync_queue_drained"
    );

    if !summary.failed.is_empty() {
        return Err(format!("{} record(s) failed to sync", summary.failed.len()).into());
    }
    Ok(())
}

/// 由环境中的 token 构造会话；没有 token 时为未登录。
fn auth_provider(config: &AppConfig) -> Result<InMemoryAuthProvider, AuthError> {
    match config.access_token.as_deref() {
        Some(token) => {
            let session = AuthSession::from_token(config.login.clone(), token)?;
            Ok(InMemoryAuthProvider::with_session(session))
        }
        None => Ok(InMemoryAuthProvider::new()),
    }
}
