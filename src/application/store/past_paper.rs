//! Past Paper Store - 真题状态容器
//!
//! 除 CRUD 外还维护筛选用的分类/子分类集合，并提供客户端搜索

use futures_util::future::join;
use std::sync::Arc;
use tokio::sync::watch;

use super::container::{ActionPlan, ResourceStore};
use super::crud::CrudStore;
use super::reducer::StoreAction;
use super::state::ResourceState;
use crate::application::error::StoreError;
use crate::application::ports::NotifierPort;
use crate::application::services::{PastPaperFilters, PastPaperService, PastPaperSubmission};
use crate::domain::{search_past_papers, Category, PastPaper, SubCategory};

pub struct PastPaperStore {
    crud: CrudStore<PastPaperService>,
    filter_categories: ResourceStore<Category>,
    filter_sub_categories: ResourceStore<SubCategory>,
}

impl PastPaperStore {
    pub fn new(service: Arc<PastPaperService>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            crud: CrudStore::new(service, notifier.clone()),
            filter_categories: ResourceStore::new(notifier.clone()),
            filter_sub_categories: ResourceStore::new(notifier),
        }
    }

    pub fn crud(&self) -> &CrudStore<PastPaperService> {
        &self.crud
    }

    pub fn snapshot(&self) -> ResourceState<PastPaper> {
        self.crud.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<PastPaper>> {
        self.crud.subscribe()
    }

    pub async fn fetch(&self, filters: &PastPaperFilters) -> Result<Vec<PastPaper>, StoreError> {
        self.crud.fetch(filters).await
    }

    pub async fn fetch_one(&self, id: &str) -> Result<PastPaper, StoreError> {
        self.crud.fetch_one(id).await
    }

    pub async fn create(&self, submission: PastPaperSubmission) -> Result<PastPaper, StoreError> {
        self.crud.create(submission).await
    }

    pub async fn update(
        &self,
        id: &str,
        submission: PastPaperSubmission,
    ) -> Result<PastPaper, StoreError> {
        self.crud.update(id, submission).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.crud.remove(id).await
    }

    pub fn filter_categories(&self) -> &ResourceStore<Category> {
        &self.filter_categories
    }

    pub fn filter_sub_categories(&self) -> &ResourceStore<SubCategory> {
        &self.filter_sub_categories
    }

    /// 在已缓存的列表上做客户端搜索
    pub fn search(&self, term: &str) -> Vec<PastPaper> {
        let state = self.snapshot();
        search_past_papers(&state.items, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// 并发拉取分类和子分类筛选项
    pub async fn load_filters(
        &self,
        category: Option<&str>,
    ) -> Result<(Vec<Category>, Vec<SubCategory>), StoreError> {
        let categories = self.filter_categories.execute(
            ActionPlan::fetch("filters"),
            self.crud.service().filter_categories(),
            |items: &Vec<Category>| StoreAction::Fetched(items.clone()),
        );
        let sub_categories = self.filter_sub_categories.execute(
            ActionPlan::fetch(category.unwrap_or("all")),
            self.crud.service().filter_sub_categories(category),
            |items: &Vec<SubCategory>| StoreAction::Fetched(items.clone()),
        );

        let (categories, sub_categories) = join(categories, sub_categories).await;
        Ok((categories?, sub_categories?))
    }
}
