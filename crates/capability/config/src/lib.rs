//! 应用运行配置加载。

mod settings;

use std::env;
use std::path::PathBuf;

pub use settings::{
    AppSettings, JsonFileSettingsProvider, NomenclatureSettings, SettingsError, SettingsProvider,
    StaticSettingsProvider, SyncSettings,
};

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub records_dir: PathBuf,
    pub settings_path: PathBuf,
    pub login: String,
    pub access_token: Option<String>,
    pub http_timeout_seconds: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("OCCTAX_DATA_DIR")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::Missing("OCCTAX_DATA_DIR".to_string()))?;
        let records_dir = read_optional("OCCTAX_RECORDS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("inputs"));
        let settings_path = read_optional("OCCTAX_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("settings.json"));
        let login = read_optional("OCCTAX_LOGIN").unwrap_or_else(|| "anonymous".to_string());
        let access_token = read_optional("OCCTAX_ACCESS_TOKEN");
        let http_timeout_seconds = read_u64_with_default("OCCTAX_HTTP_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            data_dir,
            records_dir,
            settings_path,
            login,
            access_token,
            http_timeout_seconds,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
