//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod credentials;
mod navigator;
mod notifier;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{CredentialError, CredentialStorePort};
pub use navigator::{NavigatorPort, View};
pub use notifier::{Notification, NotificationLevel, NotifierPort};
pub use transport::{
    content_type_for, ApiRequest, FileUpload, Method, MultipartPayload, Part, RequestBody,
    TransportPort,
};
