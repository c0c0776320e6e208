//! 远端接口错误类型定义

/// 远端记录接口错误
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// 尚未配置服务器地址
    #[error("remote client not configured")]
    NotConfigured,

    /// 服务器地址无效
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// 网络错误
    #[error("transport error: {0}")]
    Transport(String),

    /// 非 2xx 响应
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },

    /// 响应体解析错误
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
