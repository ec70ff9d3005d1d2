//! Banner Store - 横幅状态容器
//!
//! 横幅按页面类型组织；图片的增删改完成后重新拉取该页面的横幅

use std::future::Future;
use std::sync::Arc;

use super::container::{ActionPlan, ResourceStore};
use super::reducer::StoreAction;
use super::state::ResourceState;
use crate::application::error::{ApiError, StoreError};
use crate::application::ports::{FileUpload, NotifierPort};
use crate::application::services::{BannerService, NewBanner};
use crate::domain::{Banner, PageType};

pub struct BannerStore {
    service: Arc<BannerService>,
    store: ResourceStore<Banner>,
}

impl BannerStore {
    pub fn new(service: Arc<BannerService>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            service,
            store: ResourceStore::new(notifier),
        }
    }

    pub fn store(&self) -> &ResourceStore<Banner> {
        &self.store
    }

    pub fn snapshot(&self) -> ResourceState<Banner> {
        self.store.snapshot()
    }

    /// 缓存中某页面的横幅
    pub fn for_page(&self, page_type: &PageType) -> Vec<Banner> {
        self.store
            .snapshot()
            .items
            .into_iter()
            .filter(|banner| &banner.page_type == page_type)
            .collect()
    }

    pub async fn fetch(&self, page_type: &PageType) -> Result<Vec<Banner>, StoreError> {
        self.store
            .execute(
                ActionPlan::fetch(page_type.as_str()),
                self.service.list(page_type),
                |banners: &Vec<Banner>| StoreAction::Fetched(banners.clone()),
            )
            .await
    }

    pub async fn create(&self, page_type: &PageType, banner: NewBanner) -> Result<Banner, StoreError> {
        self.store
            .execute(
                ActionPlan::mutation("create", page_type.as_str(), "Banner created"),
                self.service.create(page_type, banner),
                |created: &Banner| StoreAction::Created(created.clone()),
            )
            .await
    }

    pub async fn remove(&self, page_type: &PageType) -> Result<(), StoreError> {
        let ids: Vec<String> = self
            .for_page(page_type)
            .into_iter()
            .map(|banner| banner.id)
            .collect();
        self.store
            .execute(
                ActionPlan::mutation("delete", page_type.as_str(), "Banner deleted"),
                self.service.remove(page_type),
                move |_| StoreAction::DeletedMany(ids),
            )
            .await
    }

    /// 图片变更后重新拉取该页面的横幅
    async fn mutate_image<F>(
        &self,
        page_type: &PageType,
        success_message: &str,
        mutation: F,
    ) -> Result<Vec<Banner>, StoreError>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        self.store
            .execute_then_reload(
                ActionPlan::mutation("image", page_type.as_str(), success_message),
                mutation,
                self.service.list(page_type),
                |banners: &Vec<Banner>| StoreAction::Fetched(banners.clone()),
            )
            .await
    }

    pub async fn add_image(
        &self,
        page_type: &PageType,
        image: FileUpload,
        link: Option<String>,
    ) -> Result<Vec<Banner>, StoreError> {
        self.mutate_image(
            page_type,
            "Banner image added",
            self.service.add_image(page_type, image, link),
        )
        .await
    }

    pub async fn replace_image(
        &self,
        page_type: &PageType,
        image_id: &str,
        image: FileUpload,
        link: Option<String>,
    ) -> Result<Vec<Banner>, StoreError> {
        self.mutate_image(
            page_type,
            "Banner image replaced",
            self.service.replace_image(page_type, image_id, image, link),
        )
        .await
    }

    pub async fn delete_image(
        &self,
        page_type: &PageType,
        image_id: &str,
    ) -> Result<Vec<Banner>, StoreError> {
        self.mutate_image(
            page_type,
            "Banner image deleted",
            self.service.delete_image(page_type, image_id),
        )
        .await
    }
}
