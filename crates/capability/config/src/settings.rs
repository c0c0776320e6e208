//! 部署设置（服务器地址、默认数据集、字段可见性覆盖）。
//!
//! 设置文件由外部生成，这里只负责加载与校验同步端点。

use async_trait::async_trait;
use domain::{FieldCategory, PropertySettings, RecordDefaults};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 设置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings not found: {0}")]
    NotFound(String),
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("sync endpoint not configured")]
    MissingSyncEndpoint,
}

/// 同步端点设置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(alias = "geonature_server_url")]
    pub geonature_url: String,
}

/// 字段相关设置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomenclatureSettings {
    /// 是否记住用户上次选择的值。
    #[serde(default)]
    pub save_default_values: bool,
    #[serde(default)]
    pub information: Vec<PropertySettings>,
    #[serde(default)]
    pub counting: Vec<PropertySettings>,
    /// 是否加载部署自定义的附加字段。
    #[serde(default = "default_true")]
    pub additional_fields: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NomenclatureSettings {
    fn default() -> Self {
        Self {
            save_default_values: false,
            information: Vec::new(),
            counting: Vec::new(),
            additional_fields: default_true(),
        }
    }
}

/// 部署设置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub sync: Option<SyncSettings>,
    #[serde(default)]
    pub default_dataset_id: Option<i64>,
    #[serde(default)]
    pub default_observer_ids: Vec<i64>,
    #[serde(default)]
    pub nomenclature: NomenclatureSettings,
}

impl AppSettings {
    /// 同步服务器地址；未配置或为空时报错。
    pub fn sync_endpoint(&self) -> Result<&str, SettingsError> {
        match self.sync.as_ref().map(|sync| sync.geonature_url.trim()) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(SettingsError::MissingSyncEndpoint),
        }
    }

    /// 指定分类的字段覆盖设置（DEFAULT 分类没有覆盖）。
    pub fn property_settings(&self, category: FieldCategory) -> &[PropertySettings] {
        match category {
            FieldCategory::Default => &[],
            FieldCategory::Information => &self.nomenclature.information,
            FieldCategory::Counting => &self.nomenclature.counting,
        }
    }

    /// 导出记录时补全的默认值。
    pub fn record_defaults(&self) -> RecordDefaults {
        RecordDefaults {
            dataset_id: self.default_dataset_id,
            observer_ids: self.default_observer_ids.clone(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|err| SettingsError::Invalid(err.to_string()))
    }
}

/// 设置提供者抽象。
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn load_settings(&self) -> Result<AppSettings, SettingsError>;
}

/// 内存设置（用于接线与测试）。
#[derive(Debug, Clone, Default)]
pub struct StaticSettingsProvider {
    settings: Option<AppSettings>,
}

impl StaticSettingsProvider {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    /// 没有任何设置的提供者。
    pub fn empty() -> Self {
        Self { settings: None }
    }
}

#[async_trait]
impl SettingsProvider for StaticSettingsProvider {
    async fn load_settings(&self) -> Result<AppSettings, SettingsError> {
        self.settings
            .clone()
            .ok_or_else(|| SettingsError::NotFound("static settings".to_string()))
    }
}

/// 从 JSON 文件加载设置。
#[derive(Debug, Clone)]
pub struct JsonFileSettingsProvider {
    path: PathBuf,
}

impl JsonFileSettingsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsProvider for JsonFileSettingsProvider {
    async fn load_settings(&self) -> Result<AppSettings, SettingsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SettingsError::NotFound(self.path.display().to_string()));
            }
            Err(err) => return Err(SettingsError::Invalid(err.to_string())),
        };
        AppSettings::from_json(&content)
    }
}
