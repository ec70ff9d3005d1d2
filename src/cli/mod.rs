//! CLI - 命令行前端
//!
//! - args: clap 命令定义
//! - dispatch: 命令执行与输出渲染

mod args;
mod dispatch;

pub use args::{
    BannerAction, CatalogAction, Cli, Command, NewPublicationArgs, PaperAction, PaperFieldArgs,
    PublicationAction, SubCategoryAction,
};
pub use dispatch::{execute, CliError};
