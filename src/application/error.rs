//! 应用层错误定义
//!
//! - ApiError: 传输层/服务层错误分类
//! - StoreError: 状态容器动作错误
//! - FormError: 表单提交错误

use thiserror::Error;

/// API 调用错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// 网络/连接失败
    #[error("Network error: {0}")]
    Network(String),

    /// 请求超时
    #[error("Request timeout")]
    Timeout,

    /// 认证失败或过期 (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 校验失败 (4xx)
    #[error("Validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    /// 服务端错误 (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 响应无法解析
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 请求无法构建（如文件读取失败）
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// 根据 HTTP 状态码分类
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            400..=499 => Self::Validation { status, message },
            _ => Self::Server { status, message },
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// 面向用户的提示文本
    pub fn display_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            Self::Timeout => "The server took too long to respond.".to_string(),
            Self::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            Self::Validation { message, .. } => message.clone(),
            Self::Server { message, .. } if !message.is_empty() => {
                format!("Server error: {}", message)
            }
            Self::Server { status, .. } => format!("Server error ({})", status),
            Self::InvalidResponse(_) => "Unexpected response from the server.".to_string(),
            Self::InvalidRequest(message) => message.clone(),
        }
    }
}

/// 状态容器错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// 同一操作已有请求在进行中
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// 变更已生效，但随后的重新拉取失败
    #[error("{action}, but reload failed: {source}")]
    ReloadFailed { action: String, source: ApiError },
}

impl StoreError {
    /// 服务端是否已应用该变更
    pub fn mutation_applied(&self) -> bool {
        matches!(self, Self::ReloadFailed { .. })
    }

    pub fn display_message(&self) -> String {
        match self {
            Self::Api(err) => err.display_message(),
            Self::Busy(_) => "Please wait for the current request to finish.".to_string(),
            Self::ReloadFailed { action, source } => {
                format!("{}, but reload failed: {}", action, source.display_message())
            }
        }
    }
}

/// 表单错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Form is already submitting")]
    AlreadySubmitting,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    pub fn display_message(&self) -> String {
        match self {
            Self::Store(err) => err.display_message(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        Self::Store(StoreError::Api(err))
    }
}
