//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Transport、CredentialStore、Navigator、Notifier）
//! - services: 资源服务，一个操作对应一次 HTTP 调用
//! - store: 客户端状态容器
//! - forms: 表单草稿与提交
//! - session: 认证过期处理
//! - error: 应用层错误定义

pub mod error;
pub mod forms;
pub mod ports;
pub mod services;
pub mod session;
pub mod store;

pub use error::{ApiError, FormError, StoreError};
pub use session::SessionExpiry;
