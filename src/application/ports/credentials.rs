//! Credential Store Port - 凭据存储抽象
//!
//! 浏览器中对应 localStorage；CLI 中由文件实现

use thiserror::Error;

use crate::domain::Credentials;

/// 凭据存储错误
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Credential Store Port
pub trait CredentialStorePort: Send + Sync {
    /// 读取当前凭据
    fn load(&self) -> Option<Credentials>;

    /// 保存凭据
    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError>;

    /// 清除凭据
    fn clear(&self) -> Result<(), CredentialError>;

    /// 当前 token
    fn token(&self) -> Option<String> {
        self.load().map(|c| c.token)
    }
}
