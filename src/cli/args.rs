//! Command Line Arguments - 命令行参数定义

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::views::PublicationTab;

#[derive(Parser, Debug)]
#[command(name = "cms-admin")]
#[command(about = "Admin client for the content management API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "CMS_ADMIN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "CMS_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in admin
    Me,

    /// Print the effective configuration as TOML
    Config,

    /// Manage banners of a page
    Banners {
        /// Page type, e.g. home or publications
        #[arg(value_name = "PAGE_TYPE")]
        page: String,

        #[command(subcommand)]
        action: Option<BannerAction>,
    },

    /// Manage exams
    Exams {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// Manage subjects
    Subjects {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// Manage categories
    Categories {
        /// Show categories with their sub-categories as a tree
        #[arg(long)]
        tree: bool,

        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// Manage sub-categories
    SubCategories {
        #[command(subcommand)]
        action: Option<SubCategoryAction>,
    },

    /// Manage publications
    Publications {
        #[command(subcommand)]
        action: Option<PublicationAction>,
    },

    /// Manage previous question papers
    Papers {
        #[command(subcommand)]
        action: Option<PaperAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BannerAction {
    /// List banners (default)
    List,

    /// Create a banner from one or more images
    Create {
        #[arg(long = "image", required = true, value_name = "PATH")]
        images: Vec<PathBuf>,

        /// Link for each image, in the same order; use "" for none
        #[arg(long = "link", value_name = "URL")]
        links: Vec<String>,
    },

    /// Delete every banner of the page
    Delete,

    /// Add an image to the page banner
    AddImage {
        #[arg(value_name = "PATH")]
        image: PathBuf,

        #[arg(long)]
        link: Option<String>,
    },

    /// Replace a banner image
    ReplaceImage {
        image_id: String,

        #[arg(value_name = "PATH")]
        image: PathBuf,

        #[arg(long)]
        link: Option<String>,
    },

    /// Delete a banner image
    DeleteImage { image_id: String },
}

#[derive(Subcommand, Debug)]
pub enum CatalogAction {
    /// List all (default)
    List,

    Show { id: String },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubCategoryAction {
    /// List sub-categories (default)
    List {
        #[arg(long)]
        category: Option<String>,
    },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PublicationAction {
    /// List publications (default)
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        search: Option<String>,
    },

    /// Show one publication
    Show {
        id: String,

        /// overview, authors or images
        #[arg(long, default_value = "overview")]
        tab: PublicationTab,
    },

    Create(NewPublicationArgs),

    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        category: Option<String>,
    },

    Delete { id: String },

    AddAuthor {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        bio: Option<String>,
    },

    UpdateAuthor {
        id: String,

        author_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        bio: Option<String>,
    },

    DeleteAuthor { id: String, author_id: String },

    AddImage {
        id: String,

        #[arg(value_name = "PATH")]
        image: PathBuf,
    },

    ReplaceImage {
        id: String,

        image_id: String,

        #[arg(value_name = "PATH")]
        image: PathBuf,
    },

    DeleteImage { id: String, image_id: String },

    ReplaceBook {
        id: String,

        #[arg(value_name = "PATH")]
        book: PathBuf,
    },

    ReplaceThumbnail {
        id: String,

        #[arg(value_name = "PATH")]
        thumbnail: PathBuf,
    },

    /// List publication categories
    Categories,
}

#[derive(Args, Debug)]
pub struct NewPublicationArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub category: Option<String>,

    /// Author name, repeatable
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,

    #[arg(long, value_name = "PATH")]
    pub thumbnail: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub book: Option<PathBuf>,

    /// Gallery image, repeatable
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct PaperFieldArgs {
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub sub_category: Option<String>,

    #[arg(long)]
    pub exam: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub year: Option<u16>,

    #[arg(long, value_name = "PATH")]
    pub thumbnail: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub paper: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum PaperAction {
    /// List papers (default)
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        sub_category: Option<String>,

        #[arg(long)]
        exam: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        /// Client-side search over names and description
        #[arg(long)]
        search: Option<String>,
    },

    Show { id: String },

    Create(PaperFieldArgs),

    Update {
        id: String,

        #[command(flatten)]
        fields: PaperFieldArgs,
    },

    Delete { id: String },

    /// Show filter options (categories and sub-categories)
    Filters {
        #[arg(long)]
        category: Option<String>,
    },
}
