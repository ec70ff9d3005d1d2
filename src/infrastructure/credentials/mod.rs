//! Credential Stores - 凭据存储实现
//!
//! CLI 使用 JSON 文件持久化 token；测试和嵌入场景使用内存实现

mod file_store;
mod memory_store;

pub use file_store::FileCredentialStore;
pub use memory_store::InMemoryCredentialStore;
