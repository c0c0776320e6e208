//! 观测记录同步：把一条待同步记录以 saga 方式推送到远端。
//!
//! 表头 → 按顺序逐个物种 → 删除本地记录；物种提交失败时删除已创建的表头。
//! 引擎假定同一记录同一时间只有一次同步（由调用方保证），不同记录之间互不影响。

mod engine;
mod error;
mod guard;

pub use engine::{SyncFailure, SyncReport, SyncSummary, SynchronizeObservationRecord};
pub use error::{SyncError, SyncPhase};
