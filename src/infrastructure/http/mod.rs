//! HTTP Layer - 管理后台 REST API 客户端
//!
//! - transport: TransportPort 的 reqwest 实现
//! - envelope: 响应包装解析与错误信息提取

mod envelope;
mod transport;

pub use transport::{HttpTransport, HttpTransportConfig, REQUEST_ID_HEADER};
