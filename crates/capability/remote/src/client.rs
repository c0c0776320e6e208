//! 基于 reqwest 的远端记录接口实现

use crate::error::RemoteError;
use crate::{RemoteClientConfig, RemoteRecordApi};
use api_contract::{HeaderCreated, HeaderPayload, RemoteErrorBody, TaxonPayload};
use async_trait::async_trait;
use std::sync::RwLock;
use std::time::Duration;
use url::Url;

/// 远端接口地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoints {
    base: Url,
}

impl RemoteEndpoints {
    /// 解析服务器地址，只接受 http/https。
    pub fn parse(base_url: &str) -> Result<Self, RemoteError> {
        let trimmed = base_url.trim();
        let mut normalized = trimmed.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base =
            Url::parse(&normalized).map_err(|err| RemoteError::InvalidUrl(format!("{trimmed}: {err}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme {}",
                base.scheme()
            )));
        }
        Ok(Self { base })
    }

    fn join(&self, path: &str) -> Result<Url, RemoteError> {
        self.base
            .join(path)
            .map_err(|err| RemoteError::InvalidUrl(err.to_string()))
    }

    pub fn header(&self) -> Result<Url, RemoteError> {
        self.join("occtax/only/releve")
    }

    pub fn taxon(&self, remote_id: i64) -> Result<Url, RemoteError> {
        self.join(&format!("occtax/releve/{remote_id}/occurrence"))
    }

    pub fn delete_header(&self, remote_id: i64) -> Result<Url, RemoteError> {
        self.join(&format!("occtax/releve/{remote_id}"))
    }
}

#[derive(Debug, Clone)]
struct Configured {
    endpoints: RemoteEndpoints,
    access_token: Option<String>,
}

/// HTTP 远端记录接口
pub struct HttpRemoteRecordApi {
    http: reqwest::Client,
    configured: RwLock<Option<Configured>>,
}

impl HttpRemoteRecordApi {
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            configured: RwLock::new(None),
        })
    }

    /// 当前是否已配置
    pub fn is_configured(&self) -> bool {
        self.configured
            .read()
            .map(|configured| configured.is_some())
            .unwrap_or(false)
    }

    fn current(&self) -> Result<Configured, RemoteError> {
        self.configured
            .read()
            .map_err(|_| RemoteError::NotConfigured)?
            .clone()
            .ok_or(RemoteError::NotConfigured)
    }

    fn request(
        &self,
        configured: &Configured,
        method: reqwest::Method,
        url: Url,
    ) -> reqwest::RequestBuilder {
        let request = self.http.request(method, url);
        match configured.access_token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// 非 2xx 响应转为 `Http` 错误，优先使用服务器返回的错误信息。
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<RemoteErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);
    Err(RemoteError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteRecordApi for HttpRemoteRecordApi {
    fn configure(&self, config: RemoteClientConfig) -> Result<(), RemoteError> {
        let endpoints = RemoteEndpoints::parse(&config.base_url)?;
        let mut configured = self
            .configured
            .write()
            .map_err(|_| RemoteError::NotConfigured)?;
        *configured = Some(Configured {
            endpoints,
            access_token: config.access_token,
        });
        Ok(())
    }

    async fn send_header(&self, header: &HeaderPayload) -> Result<i64, RemoteError> {
        let configured = self.current()?;
        let url = configured.endpoints.header()?;
        let response = self
            .request(&configured, reqwest::Method::POST, url)
            .json(header)
            .send()
            .await?;
        let text = ensure_success(response).await?.text().await?;
        let created: HeaderCreated =
            serde_json::from_str(&text).map_err(|err| RemoteError::Decode(err.to_string()))?;
        tracing::debug!(target: "occtax.remote", remote_id = created.id, "header_created");
        Ok(created.id)
    }

    async fn send_taxon(
        &self,
        remote_id: i64,
        taxon_index: usize,
        taxon: &TaxonPayload,
    ) -> Result<(), RemoteError> {
        let configured = self.current()?;
        let url = configured.endpoints.taxon(remote_id)?;
        let response = self
            .request(&configured, reqwest::Method::POST, url)
            .json(taxon)
            .send()
            .await?;
        ensure_success(response).await?;
        tracing::debug!(
            target: "occtax.remote",
            remote_id,
            taxon_index,
            taxon_id = taxon.id_taxon,
            "taxon_created"
        );
        Ok(())
    }

    async fn delete_header(&self, remote_id: i64) -> Result<(), RemoteError> {
        let configured = self.current()?;
        let url = configured.endpoints.delete_header(remote_id)?;
        let response = self
            .request(&configured, reqwest::Method::DELETE, url)
            .send()
            .await?;
        ensure_success(response).await?;
        tracing::debug!(target: "occtax.remote", remote_id, "header_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path() {
        let endpoints = RemoteEndpoints::parse("https://demo.geonature.fr/geonature/api").expect("parse");
        assert_eq!(
            endpoints.header().expect("header").as_str(),
            "https://demo.geonature.fr/geonature/api/occtax/only/releve"
        );
        assert_eq!(
            endpoints.taxon(500).expect("taxon").as_str(),
            "https://demo.geonature.fr/geonature/api/occtax/releve/500/occurrence"
        );
        assert_eq!(
            endpoints.delete_header(500).expect("delete").as_str(),
            "https://demo.geonature.fr/geonature/api/occtax/releve/500"
        );
    }

    #[test]
    fn trailing_slash_is_accepted() {
        let with_slash = RemoteEndpoints::parse("http://localhost:8000/api/").expect("parse");
        let without = RemoteEndpoints::parse("http://localhost:8000/api").expect("parse");
        assert_eq!(with_slash, without);
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            RemoteEndpoints::parse("not a url"),
            Err(RemoteError::InvalidUrl(_))
        ));
        assert!(matches!(
            RemoteEndpoints::parse("ftp://example.org"),
            Err(RemoteError::InvalidUrl(_))
        ));
    }
}
