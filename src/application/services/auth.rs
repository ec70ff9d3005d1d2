//! Auth Service - 登录 / 当前管理员 / 登出

use std::sync::Arc;

use super::decode;
use crate::application::error::ApiError;
use crate::application::ports::{ApiRequest, CredentialStorePort, NavigatorPort, TransportPort, View};
use crate::domain::{Admin, Credentials, LoginRequest, LoginResponse};

/// 认证服务
pub struct AuthService {
    transport: Arc<dyn TransportPort>,
    credentials: Arc<dyn CredentialStorePort>,
    navigator: Arc<dyn NavigatorPort>,
}

impl AuthService {
    pub fn new(
        transport: Arc<dyn TransportPort>,
        credentials: Arc<dyn CredentialStorePort>,
        navigator: Arc<dyn NavigatorPort>,
    ) -> Self {
        Self {
            transport,
            credentials,
            navigator,
        }
    }

    /// 登录并持久化 token
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let request = ApiRequest::post("/admin/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let response: LoginResponse = decode(self.transport.send(request).await?)?;
        if response.token.is_empty() {
            return Err(ApiError::invalid_response("login response carried no token"));
        }

        let mut credentials = Credentials::new(response.token);
        credentials.admin = response.admin;
        self.credentials
            .save(&credentials)
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;

        tracing::info!(email = %email, "Admin logged in");
        self.navigator.navigate(View::Dashboard);
        Ok(credentials)
    }

    /// 获取当前管理员，并刷新本地缓存的身份
    pub async fn me(&self) -> Result<Admin, ApiError> {
        let admin: Admin = decode(self.transport.send(ApiRequest::get("/admin/me")).await?)?;

        if let Some(current) = self.credentials.load() {
            let refreshed = current.with_admin(admin.clone());
            if let Err(e) = self.credentials.save(&refreshed) {
                tracing::warn!(error = %e, "Failed to refresh stored admin identity");
            }
        }

        Ok(admin)
    }

    /// 登出：清除本地凭据并回到登录视图
    pub fn logout(&self) -> Result<(), ApiError> {
        self.credentials
            .clear()
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;
        self.navigator.navigate(View::Login);
        tracing::info!("Admin logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.token().is_some()
    }
}
