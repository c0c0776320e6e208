//! JSON 文件观测记录存储
//!
//! 每条记录一个 `{id}.json` 文件，写入先落临时文件再重命名。

use crate::error::StorageError;
use crate::traits::ObservationRecordStore;
use crate::validation::ensure_valid_record;
use domain::{ObservationRecord, RecordStatus};
use std::path::{Path, PathBuf};

/// 基于目录的观测记录存储
#[derive(Debug, Clone)]
pub struct FileObservationRecordStore {
    dir: PathBuf,
}

impl FileObservationRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: i64) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait::async_trait]
impl ObservationRecordStore for FileObservationRecordStore {
    async fn read_all(&self) -> Result<Vec<ObservationRecord>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let content = tokio::fs::read_to_string(&path).await?;
            match ObservationRecord::from_json(&content) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(
                        target: "occtax.storage",
                        path = %path.display(),
                        error = %err,
                        "record_file_skipped"
                    );
                }
            }
        }
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn read(&self, id: i64) -> Result<ObservationRecord, StorageError> {
        let content = match tokio::fs::read_to_string(self.record_path(id)).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(format!("record {id}")));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(ObservationRecord::from_json(&content)?)
    }

    async fn save(
        &self,
        record: &ObservationRecord,
        status: RecordStatus,
    ) -> Result<ObservationRecord, StorageError> {
        ensure_valid_record(record)?;
        let mut saved = record.clone();
        saved.status = status;
        let json = saved.to_json()?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.record_path(saved.id);
        let tmp_path = self.dir.join(format!(".{}.json.tmp", saved.id));
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        tracing::debug!(
            target: "occtax.storage",
            record_id = saved.id,
            status = %saved.status,
            "record_saved"
        );
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.record_path(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("record {id}")))
            }
            Err(err) => Err(err.into()),
        }
    }
}
