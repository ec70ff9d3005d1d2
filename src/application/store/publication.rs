//! Publication Store - 出版物状态容器
//!
//! 作者、图片、书籍文件、封面等嵌套资源变更后，
//! 不信任变更响应，而是重新拉取该出版物的权威状态再合并。

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::container::{ActionPlan, ResourceStore};
use super::crud::CrudStore;
use super::reducer::StoreAction;
use super::state::ResourceState;
use crate::application::error::{ApiError, StoreError};
use crate::application::ports::{FileUpload, NotifierPort};
use crate::application::services::{
    AuthorPayload, CrudService, NewPublication, PublicationFields, PublicationFilters,
    PublicationService,
};
use crate::domain::{Category, Publication};

pub struct PublicationStore {
    crud: CrudStore<PublicationService>,
    categories: ResourceStore<Category>,
}

impl PublicationStore {
    pub fn new(service: Arc<PublicationService>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            crud: CrudStore::new(service, notifier.clone()),
            categories: ResourceStore::new(notifier),
        }
    }

    pub fn crud(&self) -> &CrudStore<PublicationService> {
        &self.crud
    }

    pub fn categories(&self) -> &ResourceStore<Category> {
        &self.categories
    }

    pub fn snapshot(&self) -> ResourceState<Publication> {
        self.crud.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Publication>> {
        self.crud.subscribe()
    }

    pub async fn fetch(&self, filters: &PublicationFilters) -> Result<Vec<Publication>, StoreError> {
        self.crud.fetch(filters).await
    }

    pub async fn fetch_one(&self, id: &str) -> Result<Publication, StoreError> {
        self.crud.fetch_one(id).await
    }

    pub async fn create(&self, publication: NewPublication) -> Result<Publication, StoreError> {
        self.crud.create(publication).await
    }

    pub async fn update(&self, id: &str, fields: PublicationFields) -> Result<Publication, StoreError> {
        self.crud.update(id, fields).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.crud.remove(id).await
    }

    fn service(&self) -> &PublicationService {
        self.crud.service()
    }

    /// 拉取出版物可用分类
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.categories
            .execute(
                ActionPlan::fetch("publication"),
                self.service().categories(),
                |items: &Vec<Category>| StoreAction::Fetched(items.clone()),
            )
            .await
    }

    /// 执行嵌套资源变更，随后重新拉取父出版物
    async fn mutate_nested<F>(
        &self,
        id: &str,
        operation: &'static str,
        success_message: &str,
        mutation: F,
    ) -> Result<Publication, StoreError>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        self.crud
            .store()
            .execute_then_reload(
                ActionPlan::mutation(operation, id, success_message),
                mutation,
                self.service().get(id),
                |publication: &Publication| StoreAction::Upserted(publication.clone()),
            )
            .await
    }

    pub async fn add_author(&self, id: &str, author: AuthorPayload) -> Result<Publication, StoreError> {
        self.mutate_nested(id, "author", "Author added", self.service().add_author(id, author))
            .await
    }

    pub async fn update_author(
        &self,
        id: &str,
        author_id: &str,
        author: AuthorPayload,
    ) -> Result<Publication, StoreError> {
        self.mutate_nested(
            id,
            "author",
            "Author updated",
            self.service().update_author(id, author_id, author),
        )
        .await
    }

    pub async fn delete_author(&self, id: &str, author_id: &str) -> Result<Publication, StoreError> {
        self.mutate_nested(
            id,
            "author",
            "Author deleted",
            self.service().delete_author(id, author_id),
        )
        .await
    }

    pub async fn add_image(&self, id: &str, image: FileUpload) -> Result<Publication, StoreError> {
        self.mutate_nested(id, "image", "Image added", self.service().add_image(id, image))
            .await
    }

    pub async fn replace_image(
        &self,
        id: &str,
        image_id: &str,
        image: FileUpload,
    ) -> Result<Publication, StoreError> {
        self.mutate_nested(
            id,
            "image",
            "Image replaced",
            self.service().replace_image(id, image_id, image),
        )
        .await
    }

    pub async fn delete_image(&self, id: &str, image_id: &str) -> Result<Publication, StoreError> {
        self.mutate_nested(
            id,
            "image",
            "Image deleted",
            self.service().delete_image(id, image_id),
        )
        .await
    }

    pub async fn replace_book(&self, id: &str, book: FileUpload) -> Result<Publication, StoreError> {
        self.mutate_nested(id, "book", "Book replaced", self.service().replace_book(id, book))
            .await
    }

    pub async fn replace_thumbnail(
        &self,
        id: &str,
        thumbnail: FileUpload,
    ) -> Result<Publication, StoreError> {
        self.mutate_nested(
            id,
            "thumbnail",
            "Thumbnail replaced",
            self.service().replace_thumbnail(id, thumbnail),
        )
        .await
    }
}
