//! 验证辅助函数
//!
//! 保存前校验记录的一致性：
//! - ensure_valid_record：本地 ID 为正、物种不重复、计数序号不重复

use crate::error::StorageError;
use domain::ObservationRecord;
use std::collections::HashSet;

/// 验证记录可以保存
pub fn ensure_valid_record(record: &ObservationRecord) -> Result<(), StorageError> {
    if record.id <= 0 {
        return Err(StorageError::Invalid(format!("invalid local id {}", record.id)));
    }
    let mut taxa = HashSet::new();
    for taxon in &record.taxa {
        if !taxa.insert(taxon.taxon.id) {
            return Err(StorageError::Invalid(format!(
                "duplicate taxon {} in record {}",
                taxon.taxon.id, record.id
            )));
        }
        let mut indexes = HashSet::new();
        for counting in &taxon.counting {
            if !indexes.insert(counting.index) {
                return Err(StorageError::Invalid(format!(
                    "duplicate counting index {} for taxon {}",
                    counting.index, taxon.taxon.id
                )));
            }
        }
    }
    Ok(())
}
