//! Session Expiry - 认证过期处理
//!
//! 任意请求收到 401 时调用 `handle`：若当前不在登录视图，
//! 清除凭据并跳转到登录视图。并发的多个 401 只会触发一次跳转。

use std::sync::Arc;

use crate::application::ports::{CredentialStorePort, NavigatorPort};

#[derive(Clone)]
pub struct SessionExpiry {
    credentials: Arc<dyn CredentialStorePort>,
    navigator: Arc<dyn NavigatorPort>,
}

impl SessionExpiry {
    pub fn new(credentials: Arc<dyn CredentialStorePort>, navigator: Arc<dyn NavigatorPort>) -> Self {
        Self {
            credentials,
            navigator,
        }
    }

    /// 处理一次 401，返回本次是否执行了登出跳转
    pub fn handle(&self) -> bool {
        if !self.navigator.redirect_to_login() {
            tracing::debug!("Unauthorized response while already on login view");
            return false;
        }

        if let Err(e) = self.credentials.clear() {
            tracing::error!(error = %e, "Failed to clear credentials after session expiry");
        }
        tracing::warn!("Session expired, redirected to login");
        true
    }
}
