//! HTTP Transport - 调用管理后台 REST API
//!
//! 实现 TransportPort trait：
//! - 附加 Bearer token 和 X-Request-Id
//! - 发送 JSON 或 multipart 请求体
//! - 解析响应包装并分类错误
//! - 401 响应交给 SessionExpiry 处理（清除凭据并跳转登录）

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::envelope;
use crate::application::error::ApiError;
use crate::application::ports::{
    ApiRequest, CredentialStorePort, Method, MultipartPayload, Part, RequestBody, TransportPort,
};
use crate::application::session::SessionExpiry;

/// 请求追踪头
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP Transport 配置
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpTransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Transport
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    credentials: Arc<dyn CredentialStorePort>,
    session: SessionExpiry,
}

impl HttpTransport {
    pub fn new(
        config: HttpTransportConfig,
        credentials: Arc<dyn CredentialStorePort>,
        session: SessionExpiry,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config,
            credentials,
            session,
        })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// 构建 multipart 表单，分段顺序与 payload 保持一致
    fn form(payload: MultipartPayload) -> Result<multipart::Form, ApiError> {
        payload
            .into_parts()
            .into_iter()
            .try_fold(multipart::Form::new(), |form, part| match part {
                Part::File { name, file } => {
                    let part = multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| ApiError::invalid_request(format!("Invalid content type: {}", e)))?;
                    Ok(form.part(name, part))
                }
                Part::Text { name, value } => Ok(form.text(name, value)),
            })
    }

    fn map_send_error(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::Network(format!("Cannot connect to API: {}", error))
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.url(&request.path);
        let started = Instant::now();

        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            "Sending API request"
        );

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.credentials.token() {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(payload) => builder.multipart(Self::form(payload)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, path = %request.path, error = %e, "API request failed");
            Self::map_send_error(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(Self::map_send_error)?;

        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API response received"
        );

        if !status.is_success() {
            let message = envelope::error_message(&body, status.canonical_reason());
            let error = ApiError::from_status(status.as_u16(), message);
            if error.is_unauthorized() {
                self.session.handle();
            }
            tracing::warn!(
                request_id = %request_id,
                path = %request.path,
                status = status.as_u16(),
                error = %error,
                "API returned error status"
            );
            return Err(error);
        }

        envelope::unwrap_body(status.as_u16(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{FileUpload, NavigatorPort, View};
    use crate::application::services::{PastPaperFields, PastPaperSubmission};
    use crate::domain::Credentials;
    use crate::infrastructure::credentials::InMemoryCredentialStore;
    use crate::infrastructure::navigation::InMemoryNavigator;
    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let has_request_id = headers.contains_key("x-request-id");
        (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"auth": auth, "requestId": has_request_id}})),
        )
    }

    async fn upload(mut multipart: Multipart) -> Json<Value> {
        let mut parts = Vec::new();
        let mut pyq = Value::Null;
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            if name == "pyq" {
                pyq = serde_json::from_slice(&bytes).unwrap();
            }
            parts.push(name);
        }
        Json(json!({"data": {"parts": parts, "pyq": pyq}}))
    }

    async fn expired() -> (StatusCode, Json<Value>) {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "jwt expired"})))
    }

    async fn invalid() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"success": false, "message": "Name is required"})),
        )
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/admin/me", get(me))
            .route("/admin/previous-question-papers", post(upload))
            .route("/admin/exams", get(expired).post(invalid));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn transport(
        base_url: String,
        view: View,
    ) -> (HttpTransport, Arc<InMemoryCredentialStore>, Arc<InMemoryNavigator>) {
        let credentials = Arc::new(InMemoryCredentialStore::new());
        credentials.save(&Credentials::new("token-1")).unwrap();
        let navigator = Arc::new(InMemoryNavigator::new(view));
        let session = SessionExpiry::new(credentials.clone(), navigator.clone());
        let transport = HttpTransport::new(
            HttpTransportConfig::new(base_url).with_timeout(5),
            credentials.clone(),
            session,
        )
        .unwrap();
        (transport, credentials, navigator)
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTransportConfig::new("http://api.example.com/").with_timeout(10);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(HttpTransportConfig::default().base_url, "http://localhost:4000");
    }

    #[tokio::test]
    async fn test_attaches_token_and_request_id() {
        let base_url = spawn_server().await;
        let (transport, _, _) = transport(base_url, View::Dashboard);

        let value = transport.send(ApiRequest::get("/admin/me")).await.unwrap();
        assert_eq!(value, json!({"auth": "Bearer token-1", "requestId": true}));
    }

    #[tokio::test]
    async fn test_past_paper_multipart_part_names() {
        let base_url = spawn_server().await;
        let (transport, _, _) = transport(base_url, View::PastPapers);

        let submission = PastPaperSubmission {
            fields: PastPaperFields {
                category: Some("c1".to_string()),
                year: Some(2021),
                ..Default::default()
            },
            thumbnail: Some(FileUpload::new("thumb.png", "image/png", vec![1, 2, 3])),
            paper: Some(FileUpload::new("paper.pdf", "application/pdf", vec![4, 5])),
        };
        let request = ApiRequest::post("/admin/previous-question-papers")
            .multipart(submission.into_multipart().unwrap());

        let value = transport.send(request).await.unwrap();
        assert_eq!(value["parts"], json!(["thumbnail", "paper", "pyq"]));
        assert_eq!(value["pyq"], json!({"category": "c1", "year": 2021}));
    }

    #[tokio::test]
    async fn test_validation_error_message() {
        let base_url = spawn_server().await;
        let (transport, credentials, _) = transport(base_url, View::Exams);

        let request = ApiRequest::post("/admin/exams").json(&json!({})).unwrap();
        let err = transport.send(request).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation {
                status: 422,
                message: "Name is required".to_string()
            }
        );
        assert!(credentials.load().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_redirects_once() {
        let base_url = spawn_server().await;
        let (transport, credentials, navigator) = transport(base_url, View::Exams);
        let transport = Arc::new(transport);

        let requests = (0..5).map(|_| {
            let transport = transport.clone();
            async move { transport.send(ApiRequest::get("/admin/exams")).await }
        });
        let results = futures_util::future::join_all(requests).await;

        assert!(results.iter().all(|r| matches!(r, Err(ApiError::Unauthorized(_)))));
        assert!(credentials.load().is_none());
        assert_eq!(navigator.current(), View::Login);
        assert_eq!(navigator.history(), vec![View::Exams, View::Login]);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let (transport, _, _) = transport("http://127.0.0.1:9".to_string(), View::Exams);
        let err = transport.send(ApiRequest::get("/admin/exams")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
    }
}
