//! 追踪与同步尝试 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 同步尝试级追踪标识。
#[derive(Debug, Clone)]
pub struct SyncIds {
    pub attempt_id: String,
}

/// 同步指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub sync_attempts: u64,
    pub sync_success: u64,
    pub sync_failure: u64,
    pub headers_sent: u64,
    pub taxa_sent: u64,
    pub compensations_attempted: u64,
    pub compensations_failed: u64,
    pub cleanup_failures: u64,
}

/// 同步指标。
pub struct TelemetryMetrics {
    sync_attempts: AtomicU64,
    sync_success: AtomicU64,
    sync_failure: AtomicU64,
    headers_sent: AtomicU64,
    taxa_sent: AtomicU64,
    compensations_attempted: AtomicU64,
    compensations_failed: AtomicU64,
    cleanup_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            sync_attempts: AtomicU64::new(0),
            sync_success: AtomicU64::new(0),
            sync_failure: AtomicU64::new(0),
            headers_sent: AtomicU64::new(0),
            taxa_sent: AtomicU64::new(0),
            compensations_attempted: AtomicU64::new(0),
            compensations_failed: AtomicU64::new(0),
            cleanup_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sync_attempts: self.sync_attempts.load(Ordering::Relaxed),
            sync_success: self.sync_success.load(Ordering::Relaxed),
            sync_failure: self.sync_failure.load(Ordering::Relaxed),
            headers_sent: self.headers_sent.load(Ordering::Relaxed),
            taxa_sent: self.taxa_sent.load(Ordering::Relaxed),
            compensations_attempted: self.compensations_attempted.load(Ordering::Relaxed),
            compensations_failed: self.compensations_failed.load(Ordering::Relaxed),
            cleanup_failures: self.cleanup_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的同步尝试 ID。
pub fn new_sync_ids() -> SyncIds {
    SyncIds {
        attempt_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录同步尝试次数。
pub fn record_sync_attempt() {
    metrics().sync_attempts.fetch_add(1, Ordering::Relaxed);
}

/// 记录同步成功次数。
pub fn record_sync_success() {
    metrics().sync_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录同步失败次数。
pub fn record_sync_failure() {
    metrics().sync_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录表头提交成功次数。
pub fn record_header_sent() {
    metrics().headers_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录物种提交成功次数。
pub fn record_taxon_sent() {
    metrics().taxa_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录补偿删除尝试次数。
pub fn record_compensation_attempt() {
    metrics()
        .compensations_attempted
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录补偿删除失败次数。
pub fn record_compensation_failure() {
    metrics()
        .compensations_failed
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录同步成功后本地删除失败次数。
pub fn record_cleanup_failure() {
    metrics().cleanup_failures.fetch_add(1, Ordering::Relaxed);
}
