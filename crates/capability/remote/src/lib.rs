//! 远端记录接口：表头提交、物种提交、表头删除（补偿）。
//!
//! 服务器地址在运行时配置，未配置时所有调用以 `NotConfigured` 失败。

mod client;
mod error;

use api_contract::{HeaderPayload, TaxonPayload};
use async_trait::async_trait;

pub use client::{HttpRemoteRecordApi, RemoteEndpoints};
pub use error::RemoteError;

/// 远端客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteClientConfig {
    pub base_url: String,
    pub access_token: Option<String>,
}

impl RemoteClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// 远端记录接口抽象，便于替换实现与测试。
#[async_trait]
pub trait RemoteRecordApi: Send + Sync {
    /// 配置服务器地址与凭据。
    fn configure(&self, config: RemoteClientConfig) -> Result<(), RemoteError>;

    /// 提交表头，返回服务器分配的 ID。
    async fn send_header(&self, header: &HeaderPayload) -> Result<i64, RemoteError>;

    /// 在已创建的表头下提交一个物种（含有序计数）。
    async fn send_taxon(
        &self,
        remote_id: i64,
        taxon_index: usize,
        taxon: &TaxonPayload,
    ) -> Result<(), RemoteError>;

    /// 删除表头。
    async fn delete_header(&self, remote_id: i64) -> Result<(), RemoteError>;
}
