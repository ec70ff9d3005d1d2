//! Forms - 表单状态与草稿
//!
//! - form: 通用表单状态机（编辑 / 提交中 / 复位）
//! - drafts: 各资源的草稿及校验
//! - submit: 草稿提交到对应状态容器

mod drafts;
mod form;
mod submit;

pub use drafts::{
    AuthorDraft, BannerDraft, BannerImageDraft, NamedDraft, PastPaperDraft, PublicationDraft,
    SubCategoryDraft,
};
pub use form::{Form, FormPhase};
