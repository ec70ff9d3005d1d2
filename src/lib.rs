//! cms-admin - 内容管理平台的管理后台客户端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 横幅、考试、科目、分类、子分类、出版物、历年真题等服务端资源
//!
//! 应用层 (application/):
//! - Ports: Transport、CredentialStore、Navigator、Notifier
//! - Services: 资源服务（一个操作一次 HTTP 调用）
//! - Store: 归一化状态容器 + reducer + in-flight 保护
//! - Forms: 表单草稿与提交
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: reqwest 传输层 + 认证过期拦截
//! - Credentials: 凭据文件
//! - Context: 依赖装配
//!
//! 前端 (views/, cli/): 文本视图与命令行

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod views;

pub use config::{load_config, AppConfig};
