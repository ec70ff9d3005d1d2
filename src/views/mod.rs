//! Views - 文本视图
//!
//! 从状态容器快照渲染：资源表格、分类树、出版物详情分页、文件预览、通知行

mod notification;
mod preview;
mod publication;
mod table;
mod tree;

pub use notification::render_notification;
pub use preview::{format_bytes, FilePreview};
pub use publication::{render_publication, PublicationTab};
pub use table::{render_banners, render_table, Table, TableRow};
pub use tree::render_category_tree;
