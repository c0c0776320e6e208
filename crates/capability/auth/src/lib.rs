//! 会话能力：当前会话访问、token 过期判断。
//!
//! token 的获取（登录）不在此处实现，只消费已登录的会话。

mod jwt;

use async_trait::async_trait;
use std::sync::RwLock;

pub use jwt::{TokenClaims, inspect_token};

/// 会话相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 已登录的会话。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub login: String,
    pub user_id: Option<i64>,
    pub token: String,
    /// 过期时间戳（秒）。
    pub expires_at: Option<u64>,
}

impl AuthSession {
    /// 由服务器签发的 token 构造会话。
    pub fn from_token(login: impl Into<String>, token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        let claims = inspect_token(&token)?;
        let user_id = claims
            .id_role
            .or_else(|| claims.sub.as_deref().and_then(|sub| sub.parse().ok()));
        Ok(Self {
            login: login.into(),
            user_id,
            token,
            expires_at: claims.exp,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(jwt::now_epoch_seconds())
    }

    pub fn is_expired_at(&self, now_epoch_seconds: u64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now_epoch_seconds)
    }
}

/// 会话提供者抽象，便于替换实现与测试。
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// 当前会话；未登录或已过期时报错。
    async fn current_session(&self) -> Result<AuthSession, AuthError>;
}

/// 内存会话提供者。
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    session: RwLock<Option<AuthSession>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    pub fn sign_in(&self, session: AuthSession) -> Result<(), AuthError> {
        let mut current = self
            .session
            .write()
            .map_err(|_| AuthError::Internal("lock failed".to_string()))?;
        *current = Some(session);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        let mut current = self
            .session
            .write()
            .map_err(|_| AuthError::Internal("lock failed".to_string()))?;
        *current = None;
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn current_session(&self) -> Result<AuthSession, AuthError> {
        let session = self
            .session
            .read()
            .map_err(|_| AuthError::Internal("lock failed".to_string()))?
            .clone()
            .ok_or(AuthError::NotAuthenticated)?;
        if session.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(session)
    }
}
