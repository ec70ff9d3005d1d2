//! Domain Layer - 领域层
//!
//! 服务端资源的客户端表示：
//! - Admin: 管理员身份与凭据
//! - Banner: 页面横幅
//! - Taxonomy: 考试、科目、分类、子分类
//! - Publication: 出版物
//! - Past Paper: 历年真题

mod admin;
mod banner;
mod entity;
mod errors;
mod past_paper;
mod publication;
mod taxonomy;

pub use admin::{Admin, Credentials, LoginRequest, LoginResponse};
pub use banner::{Banner, BannerImage, PageType};
pub use entity::{Entity, EntityRef, MediaAsset, MediaRef, Named};
pub use errors::DomainError;
pub use past_paper::{search_past_papers, PastPaper};
pub use publication::{Author, Publication};
pub use taxonomy::{Category, Exam, SubCategory, Subject};
