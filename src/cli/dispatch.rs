//! Command Dispatch - 命令到状态容器动作的映射
//!
//! 每条命令先进入对应视图，再调用状态容器，最后从快照渲染输出文本。

use std::path::PathBuf;
use thiserror::Error;

use super::args::{
    BannerAction, CatalogAction, Command, NewPublicationArgs, PaperAction, PaperFieldArgs,
    PublicationAction, SubCategoryAction,
};
use crate::application::error::{ApiError, FormError, StoreError};
use crate::application::forms::{
    AuthorDraft, BannerDraft, BannerImageDraft, Form, NamedDraft, PastPaperDraft,
    PublicationDraft, SubCategoryDraft,
};
use crate::application::ports::{FileUpload, View};
use crate::application::services::{
    CatalogFilters, CatalogResource, CatalogService, NamedPayload, PastPaperFilters,
    PublicationFilters,
};
use crate::application::store::CrudStore;
use crate::domain::{DomainError, Entity, PageType, Publication};
use crate::infrastructure::AdminContext;
use crate::views::{
    render_banners, render_category_tree, render_publication, render_table, FilePreview,
    TableRow,
};

/// 命令执行错误
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Not logged in. Run `cms-admin login` first.")]
    NotLoggedIn,

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{}", .0.display_message())]
    Store(#[from] StoreError),

    #[error("{}", .0.display_message())]
    Form(#[from] FormError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// 执行一条命令，返回要打印的文本
///
/// `config` 不需要 API，由入口直接处理；其余命令（登录/登出除外）要求已登录。
pub async fn execute(ctx: &AdminContext, command: Command) -> Result<String, CliError> {
    match command {
        Command::Login { email, password } => {
            let credentials = ctx.auth.login(&email, &password).await?;
            let who = credentials
                .admin
                .map(|admin| admin.email)
                .unwrap_or(email);
            Ok(format!("Logged in as {}\n", who))
        }
        Command::Logout => {
            ctx.auth.logout()?;
            Ok("Logged out\n".to_string())
        }
        command => {
            if !ctx.is_authenticated() {
                return Err(CliError::NotLoggedIn);
            }
            execute_authenticated(ctx, command).await
        }
    }
}

async fn execute_authenticated(ctx: &AdminContext, command: Command) -> Result<String, CliError> {
    match command {
        Command::Me => {
            ctx.enter(View::Dashboard);
            let admin = ctx.auth.me().await?;
            Ok(format!(
                "{} <{}>{}\n",
                admin.name,
                admin.email,
                admin.role.map(|r| format!(" ({})", r)).unwrap_or_default()
            ))
        }
        Command::Banners { page, action } => {
            ctx.enter(View::Banners);
            banners(ctx, PageType::new(page)?, action.unwrap_or(BannerAction::List)).await
        }
        Command::Exams { action } => {
            ctx.enter(View::Exams);
            catalog(&ctx.exams, action.unwrap_or(CatalogAction::List)).await
        }
        Command::Subjects { action } => {
            ctx.enter(View::Subjects);
            catalog(&ctx.subjects, action.unwrap_or(CatalogAction::List)).await
        }
        Command::Categories { tree, action } => {
            ctx.enter(View::Categories);
            match action {
                None if tree => {
                    let filters = CatalogFilters::default();
                    let categories = ctx.categories.fetch(&filters).await?;
                    let sub_categories = ctx.sub_categories.fetch(&filters).await?;
                    Ok(render_category_tree(&categories, &sub_categories))
                }
                action => catalog(&ctx.categories, action.unwrap_or(CatalogAction::List)).await,
            }
        }
        Command::SubCategories { action } => {
            ctx.enter(View::Categories);
            sub_categories(ctx, action.unwrap_or(SubCategoryAction::List { category: None })).await
        }
        Command::Publications { action } => {
            ctx.enter(View::Publications);
            let action = action.unwrap_or(PublicationAction::List {
                category: None,
                search: None,
            });
            publications(ctx, action).await
        }
        Command::Papers { action } => {
            ctx.enter(View::PastPapers);
            let action = action.unwrap_or(PaperAction::List {
                category: None,
                sub_category: None,
                exam: None,
                subject: None,
                search: None,
            });
            papers(ctx, action).await
        }
        Command::Login { .. } | Command::Logout | Command::Config => Ok(String::new()),
    }
}

async fn read_file(path: Option<PathBuf>) -> Result<Option<FileUpload>, ApiError> {
    match path {
        Some(path) => Ok(Some(FileUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

async fn read_files(paths: Vec<PathBuf>) -> Result<Vec<FileUpload>, ApiError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(FileUpload::from_path(path).await?);
    }
    Ok(files)
}

fn detail<T: TableRow>(item: &T) -> String {
    render_table(std::slice::from_ref(item))
}

fn done(message: &str, id: &str) -> String {
    format!("{} ({})\n", message, id)
}

async fn catalog<T>(store: &CrudStore<CatalogService<T>>, action: CatalogAction) -> Result<String, CliError>
where
    T: CatalogResource<Payload = NamedPayload> + TableRow,
    for<'a> NamedDraft: From<&'a T>,
{
    match action {
        CatalogAction::List => {
            let items = store.fetch(&CatalogFilters::default()).await?;
            Ok(render_table(&items))
        }
        CatalogAction::Show { id } => Ok(detail(&store.fetch_one(&id).await?)),
        CatalogAction::Create { name, description } => {
            let mut form = Form::seeded(NamedDraft {
                name,
                description: description.unwrap_or_default(),
            });
            let created = form.submit_create(store).await?;
            Ok(done("Created", created.id()))
        }
        CatalogAction::Update {
            id,
            name,
            description,
        } => {
            let current = store.fetch_one(&id).await?;
            let mut form = Form::seeded(NamedDraft::from(&current));
            form.edit(|draft| {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
            })?;
            let updated = form.submit_update(store, &id).await?;
            Ok(done("Updated", updated.id()))
        }
        CatalogAction::Delete { id } => {
            store.remove(&id).await?;
            Ok(done("Deleted", &id))
        }
    }
}

async fn sub_categories(ctx: &AdminContext, action: SubCategoryAction) -> Result<String, CliError> {
    let store = &ctx.sub_categories;
    match action {
        SubCategoryAction::List { category } => {
            let filters = CatalogFilters { category };
            Ok(render_table(&store.fetch(&filters).await?))
        }
        SubCategoryAction::Create { name, category } => {
            let mut form = Form::seeded(SubCategoryDraft {
                name,
                category_id: category,
            });
            let created = form.submit_create(store).await?;
            Ok(done("Created", &created.id))
        }
        SubCategoryAction::Update { id, name, category } => {
            let current = store.fetch_one(&id).await?;
            let mut form = Form::seeded(SubCategoryDraft::from(&current));
            form.edit(|draft| {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(category) = category {
                    draft.category_id = category;
                }
            })?;
            let updated = form.submit_update(store, &id).await?;
            Ok(done("Updated", &updated.id))
        }
        SubCategoryAction::Delete { id } => {
            store.remove(&id).await?;
            Ok(done("Deleted", &id))
        }
    }
}

async fn banners(ctx: &AdminContext, page: PageType, action: BannerAction) -> Result<String, CliError> {
    let store = &ctx.banners;
    match action {
        BannerAction::List => Ok(render_banners(&store.fetch(&page).await?)),
        BannerAction::Create { images, links } => {
            let files = read_files(images).await?;
            let mut links = links.into_iter();
            let draft = BannerDraft {
                images: files
                    .into_iter()
                    .map(|image| BannerImageDraft {
                        image: Some(image),
                        link: links.next().unwrap_or_default(),
                    })
                    .collect(),
            };
            let created = Form::seeded(draft).submit_create(store, &page).await?;
            Ok(done("Created banner", &created.id))
        }
        BannerAction::Delete => {
            store.remove(&page).await?;
            Ok(format!("Deleted banners of {}\n", page))
        }
        BannerAction::AddImage { image, link } => {
            let mut form = Form::seeded(BannerImageDraft {
                image: read_file(Some(image)).await?,
                link: link.unwrap_or_default(),
            });
            Ok(render_banners(&form.submit_add(store, &page).await?))
        }
        BannerAction::ReplaceImage {
            image_id,
            image,
            link,
        } => {
            let mut form = Form::seeded(BannerImageDraft {
                image: read_file(Some(image)).await?,
                link: link.unwrap_or_default(),
            });
            Ok(render_banners(
                &form.submit_replace(store, &page, &image_id).await?,
            ))
        }
        BannerAction::DeleteImage { image_id } => {
            Ok(render_banners(&store.delete_image(&page, &image_id).await?))
        }
    }
}

async fn new_publication_draft(args: NewPublicationArgs) -> Result<PublicationDraft, ApiError> {
    Ok(PublicationDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        price: args.price,
        category_id: args.category.unwrap_or_default(),
        authors: args
            .authors
            .into_iter()
            .map(|name| AuthorDraft {
                name,
                bio: String::new(),
            })
            .collect(),
        thumbnail: read_file(args.thumbnail).await?,
        book: read_file(args.book).await?,
        images: read_files(args.images).await?,
    })
}

async fn publications(ctx: &AdminContext, action: PublicationAction) -> Result<String, CliError> {
    let store = &ctx.publications;
    let show = |publication: &Publication| {
        render_publication(publication, Default::default())
    };

    match action {
        PublicationAction::List { category, search } => {
            let filters = PublicationFilters { category, search };
            Ok(render_table(&store.fetch(&filters).await?))
        }
        PublicationAction::Show { id, tab } => {
            Ok(render_publication(&store.fetch_one(&id).await?, tab))
        }
        PublicationAction::Create(args) => {
            let draft = new_publication_draft(args).await?;
            let created = Form::seeded(draft).submit_create(store).await?;
            Ok(show(&created))
        }
        PublicationAction::Update {
            id,
            title,
            description,
            price,
            category,
        } => {
            let current = store.fetch_one(&id).await?;
            let mut form = Form::seeded(PublicationDraft::from(&current));
            form.edit(|draft| {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if price.is_some() {
                    draft.price = price;
                }
                if let Some(category) = category {
                    draft.category_id = category;
                }
            })?;
            Ok(show(&form.submit_update(store, &id).await?))
        }
        PublicationAction::Delete { id } => {
            store.remove(&id).await?;
            Ok(done("Deleted", &id))
        }
        PublicationAction::AddAuthor { id, name, bio } => {
            let mut form = Form::seeded(AuthorDraft {
                name,
                bio: bio.unwrap_or_default(),
            });
            Ok(show(&form.submit_add(store, &id).await?))
        }
        PublicationAction::UpdateAuthor {
            id,
            author_id,
            name,
            bio,
        } => {
            let current = store.fetch_one(&id).await?;
            let author = current
                .author(&author_id)
                .ok_or_else(|| CliError::NotFound(format!("author {}", author_id)))?;
            let mut form = Form::seeded(AuthorDraft::from(author));
            form.edit(|draft| {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(bio) = bio {
                    draft.bio = bio;
                }
            })?;
            Ok(show(&form.submit_update(store, &id, &author_id).await?))
        }
        PublicationAction::DeleteAuthor { id, author_id } => {
            Ok(show(&store.delete_author(&id, &author_id).await?))
        }
        PublicationAction::AddImage { id, image } => {
            let image = FileUpload::from_path(image).await?;
            Ok(show(&store.add_image(&id, image).await?))
        }
        PublicationAction::ReplaceImage {
            id,
            image_id,
            image,
        } => {
            let image = FileUpload::from_path(image).await?;
            Ok(show(&store.replace_image(&id, &image_id, image).await?))
        }
        PublicationAction::DeleteImage { id, image_id } => {
            Ok(show(&store.delete_image(&id, &image_id).await?))
        }
        PublicationAction::ReplaceBook { id, book } => {
            let book = FileUpload::from_path(book).await?;
            let preview = FilePreview::from(&book).render();
            store.replace_book(&id, book).await?;
            Ok(format!("Uploaded {}\n", preview))
        }
        PublicationAction::ReplaceThumbnail { id, thumbnail } => {
            let thumbnail = FileUpload::from_path(thumbnail).await?;
            let preview = FilePreview::from(&thumbnail).render();
            store.replace_thumbnail(&id, thumbnail).await?;
            Ok(format!("Uploaded {}\n", preview))
        }
        PublicationAction::Categories => Ok(render_table(&store.fetch_categories().await?)),
    }
}

async fn paper_draft(base: PastPaperDraft, fields: PaperFieldArgs) -> Result<PastPaperDraft, ApiError> {
    let mut draft = base;
    if let Some(category) = fields.category {
        draft.category_id = category;
    }
    if let Some(sub_category) = fields.sub_category {
        draft.sub_category_id = sub_category;
    }
    if let Some(exam) = fields.exam {
        draft.exam_id = exam;
    }
    if let Some(subject) = fields.subject {
        draft.subject_id = subject;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if fields.year.is_some() {
        draft.year = fields.year;
    }
    draft.thumbnail = read_file(fields.thumbnail).await?;
    draft.paper = read_file(fields.paper).await?;
    Ok(draft)
}

async fn papers(ctx: &AdminContext, action: PaperAction) -> Result<String, CliError> {
    let store = &ctx.past_papers;
    match action {
        PaperAction::List {
            category,
            sub_category,
            exam,
            subject,
            search,
        } => {
            let filters = PastPaperFilters {
                category,
                sub_category,
                exam,
                subject,
            };
            let papers = store.fetch(&filters).await?;
            match search {
                Some(term) => Ok(render_table(&store.search(&term))),
                None => Ok(render_table(&papers)),
            }
        }
        PaperAction::Show { id } => {
            let paper = store.fetch_one(&id).await?;
            let mut out = detail(&paper);
            for (label, media) in [("Thumbnail", &paper.thumbnail), ("Paper", &paper.paper)] {
                if let Some(media) = media {
                    out.push_str(&format!("{}: {}\n", label, FilePreview::from_media(media).render()));
                }
            }
            Ok(out)
        }
        PaperAction::Create(fields) => {
            let draft = paper_draft(PastPaperDraft::default(), fields).await?;
            let created = Form::seeded(draft).submit_create(store).await?;
            Ok(done("Created", &created.id))
        }
        PaperAction::Update { id, fields } => {
            let current = store.fetch_one(&id).await?;
            let draft = paper_draft(PastPaperDraft::from(&current), fields).await?;
            let updated = Form::seeded(draft).submit_update(store, &id).await?;
            Ok(done("Updated", &updated.id))
        }
        PaperAction::Delete { id } => {
            store.remove(&id).await?;
            Ok(done("Deleted", &id))
        }
        PaperAction::Filters { category } => {
            let (categories, sub_categories) = store.load_filters(category.as_deref()).await?;
            Ok(render_category_tree(&categories, &sub_categories))
        }
    }
}
