//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现，以及依赖装配

pub mod context;
pub mod credentials;
pub mod http;
pub mod navigation;
pub mod notifications;

pub use context::AdminContext;
pub use credentials::{FileCredentialStore, InMemoryCredentialStore};
pub use http::{HttpTransport, HttpTransportConfig};
pub use navigation::InMemoryNavigator;
pub use notifications::NotificationCenter;
