//! Catalog Services - 考试 / 科目 / 分类 / 子分类
//!
//! 四种资源共享同一套 JSON CRUD 端点形状：
//! GET/POST {path}，GET/PUT/DELETE {path}/:id

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{decode, decode_list, path_id, CrudService};
use crate::application::error::ApiError;
use crate::application::ports::{ApiRequest, TransportPort};
use crate::domain::{Category, Entity, Exam, SubCategory, Subject};

/// 目录类资源：端点路径和请求体类型
pub trait CatalogResource: Entity + DeserializeOwned {
    const PATH: &'static str;
    type Payload: Serialize + Send + Sync;
}

/// 名称 + 描述请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NamedPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// 子分类请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryPayload {
    pub name: String,
    pub category: String,
}

impl CatalogResource for Exam {
    const PATH: &'static str = "/admin/exams";
    type Payload = NamedPayload;
}

impl CatalogResource for Subject {
    const PATH: &'static str = "/admin/subjects";
    type Payload = NamedPayload;
}

impl CatalogResource for Category {
    const PATH: &'static str = "/admin/categories";
    type Payload = NamedPayload;
}

impl CatalogResource for SubCategory {
    const PATH: &'static str = "/admin/sub-categories";
    type Payload = SubCategoryPayload;
}

/// 列表过滤条件（仅子分类使用 category）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilters {
    pub category: Option<String>,
}

impl CatalogFilters {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }
}

/// 目录类资源服务
pub struct CatalogService<T: CatalogResource> {
    transport: Arc<dyn TransportPort>,
    _resource: PhantomData<fn() -> T>,
}

pub type ExamService = CatalogService<Exam>;
pub type SubjectService = CatalogService<Subject>;
pub type CategoryService = CatalogService<Category>;
pub type SubCategoryService = CatalogService<SubCategory>;

impl<T: CatalogResource> CatalogService<T> {
    pub fn new(transport: Arc<dyn TransportPort>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", T::PATH, path_id(id)?))
    }
}

#[async_trait]
impl<T: CatalogResource> CrudService for CatalogService<T> {
    type Entity = T;
    type Filters = CatalogFilters;
    type CreatePayload = T::Payload;
    type UpdatePayload = T::Payload;

    async fn list(&self, filters: &CatalogFilters) -> Result<Vec<T>, ApiError> {
        let request =
            ApiRequest::get(T::PATH).optional_query("category", filters.category.as_deref());
        let items = decode_list(self.transport.send(request).await?)?;
        tracing::debug!(resource = T::KIND, count = items.len(), "Catalog listed");
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<T, ApiError> {
        let request = ApiRequest::get(Self::item_path(id)?);
        decode(self.transport.send(request).await?)
    }

    async fn create(&self, payload: T::Payload) -> Result<T, ApiError> {
        let request = ApiRequest::post(T::PATH).json(&payload)?;
        let created: T = decode(self.transport.send(request).await?)?;
        tracing::info!(resource = T::KIND, id = %created.id(), "Catalog entry created");
        Ok(created)
    }

    async fn update(&self, id: &str, payload: T::Payload) -> Result<T, ApiError> {
        let request = ApiRequest::put(Self::item_path(id)?).json(&payload)?;
        let updated: T = decode(self.transport.send(request).await?)?;
        tracing::info!(resource = T::KIND, id = %id, "Catalog entry updated");
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(Self::item_path(id)?);
        self.transport.send(request).await?;
        tracing::info!(resource = T::KIND, id = %id, "Catalog entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::MockTransport;
    use crate::application::ports::{Method, RequestBody};
    use serde_json::json;

    #[tokio::test]
    async fn test_exam_crud_requests() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(json!([{"_id": "e1", "name": "GATE"}]))
                .respond(json!({"_id": "e2", "name": "NEET"}))
                .respond(json!({"_id": "e2", "name": "NEET UG"}))
                .respond(json!({"message": "deleted"})),
        );
        let service = ExamService::new(transport.clone());

        let exams = service.list(&CatalogFilters::default()).await.unwrap();
        assert_eq!(exams.len(), 1);

        let created = service.create(NamedPayload::new("NEET")).await.unwrap();
        assert_eq!(created.id, "e2");

        let updated = service.update("e2", NamedPayload::new("NEET UG")).await.unwrap();
        assert_eq!(updated.name, "NEET UG");

        service.remove("e2").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/admin/exams");
        assert_eq!(requests[1].body, RequestBody::Json(json!({"name": "NEET"})));
        assert_eq!(requests[2].method, Method::Put);
        assert_eq!(requests[2].path, "/admin/exams/e2");
        assert_eq!(requests[3].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_sub_category_list_filters_by_category() {
        let transport = Arc::new(MockTransport::new().respond(json!([])));
        let service = SubCategoryService::new(transport.clone());

        service.list(&CatalogFilters::by_category("c1")).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.path, "/admin/sub-categories");
        assert_eq!(request.query, vec![("category".to_string(), "c1".to_string())]);
    }

    #[tokio::test]
    async fn test_errors_propagate_unchanged() {
        let transport = Arc::new(MockTransport::new().fail(ApiError::Timeout));
        let service = SubjectService::new(transport);

        let err = service.get("s1").await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
    }
}
