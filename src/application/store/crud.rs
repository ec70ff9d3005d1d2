//! CRUD Store - 通用 CRUD 资源的状态容器
//!
//! 顶层的 create/update 直接信任服务端返回的实体

use std::sync::Arc;
use tokio::sync::watch;

use super::container::{kind_label, ActionPlan, ResourceStore};
use super::reducer::StoreAction;
use super::state::ResourceState;
use crate::application::error::StoreError;
use crate::application::ports::NotifierPort;
use crate::application::services::{
    CategoryService, CrudService, ExamService, SubCategoryService, SubjectService,
};
use crate::domain::Entity;

pub struct CrudStore<S: CrudService> {
    service: Arc<S>,
    store: ResourceStore<S::Entity>,
}

pub type ExamStore = CrudStore<ExamService>;
pub type SubjectStore = CrudStore<SubjectService>;
pub type CategoryStore = CrudStore<CategoryService>;
pub type SubCategoryStore = CrudStore<SubCategoryService>;

impl<S: CrudService> CrudStore<S> {
    pub fn new(service: Arc<S>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            service,
            store: ResourceStore::new(notifier),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn store(&self) -> &ResourceStore<S::Entity> {
        &self.store
    }

    pub fn snapshot(&self) -> ResourceState<S::Entity> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<S::Entity>> {
        self.store.subscribe()
    }

    /// 拉取列表并整体替换
    pub async fn fetch(&self, filters: &S::Filters) -> Result<Vec<S::Entity>, StoreError> {
        self.store
            .execute(
                ActionPlan::fetch("all"),
                self.service.list(filters),
                |items: &Vec<S::Entity>| StoreAction::Fetched(items.clone()),
            )
            .await
    }

    /// 拉取单个实体的权威状态
    pub async fn fetch_one(&self, id: &str) -> Result<S::Entity, StoreError> {
        self.store
            .execute(
                ActionPlan::fetch(id),
                self.service.get(id),
                |item: &S::Entity| StoreAction::Upserted(item.clone()),
            )
            .await
    }

    pub async fn create(&self, payload: S::CreatePayload) -> Result<S::Entity, StoreError> {
        let label = kind_label::<S::Entity>();
        self.store
            .execute(
                ActionPlan::mutation("create", "new", format!("{} created", label)),
                self.service.create(payload),
                |item: &S::Entity| StoreAction::Created(item.clone()),
            )
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: S::UpdatePayload,
    ) -> Result<S::Entity, StoreError> {
        let label = kind_label::<S::Entity>();
        self.store
            .execute(
                ActionPlan::mutation("update", id, format!("{} updated", label)),
                self.service.update(id, payload),
                |item: &S::Entity| StoreAction::Updated(item.clone()),
            )
            .await
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let label = kind_label::<S::Entity>();
        let removed_id = id.to_string();
        self.store
            .execute(
                ActionPlan::mutation("delete", id, format!("{} deleted", label)),
                self.service.remove(id),
                move |_| StoreAction::Deleted(removed_id),
            )
            .await
    }

    /// 按 ID 在缓存中查找
    pub fn find(&self, id: &str) -> Option<S::Entity> {
        self.store.snapshot().find(id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.store
            .snapshot()
            .items
            .iter()
            .map(|item| item.id().to_string())
            .collect()
    }
}
