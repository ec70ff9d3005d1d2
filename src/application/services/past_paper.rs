//! Past Paper Service - 历年真题
//!
//! 端点:
//! - GET/POST        /admin/previous-question-papers
//! - GET/PUT/DELETE  /admin/previous-question-papers/:id
//! - GET             /admin/previous-question-papers/filters/categories
//! - GET             /admin/previous-question-papers/filters/subcategories
//!
//! 创建和更新使用 multipart：`thumbnail`、`paper` 两个可选文件分段，
//! 其余字段编码为 JSON 字符串放在 `pyq` 分段。

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::{decode, decode_list, path_id, CrudService};
use crate::application::error::ApiError;
use crate::application::ports::{ApiRequest, FileUpload, MultipartPayload, TransportPort};
use crate::domain::{Category, PastPaper, SubCategory};

const BASE_PATH: &str = "/admin/previous-question-papers";

/// 列表过滤条件（服务端过滤）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PastPaperFilters {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub exam: Option<String>,
    pub subject: Option<String>,
}

impl PastPaperFilters {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .optional_query("category", self.category.as_deref())
            .optional_query("subCategory", self.sub_category.as_deref())
            .optional_query("exam", self.exam.as_deref())
            .optional_query("subject", self.subject.as_deref())
    }
}

/// `pyq` 分段中的结构化字段
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPaperFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

/// 创建/更新提交内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PastPaperSubmission {
    pub fields: PastPaperFields,
    pub thumbnail: Option<FileUpload>,
    pub paper: Option<FileUpload>,
}

impl PastPaperSubmission {
    pub fn into_multipart(self) -> Result<MultipartPayload, ApiError> {
        MultipartPayload::new()
            .optional_file("thumbnail", self.thumbnail)
            .optional_file("paper", self.paper)
            .json("pyq", &self.fields)
    }
}

/// 真题服务
pub struct PastPaperService {
    transport: Arc<dyn TransportPort>,
}

impl PastPaperService {
    pub fn new(transport: Arc<dyn TransportPort>) -> Self {
        Self { transport }
    }

    fn item_path(id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", BASE_PATH, path_id(id)?))
    }

    /// 可用于筛选的分类
    pub async fn filter_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = ApiRequest::get(format!("{}/filters/categories", BASE_PATH));
        decode_list(self.transport.send(request).await?)
    }

    /// 可用于筛选的子分类（可按分类收窄）
    pub async fn filter_sub_categories(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<SubCategory>, ApiError> {
        let request = ApiRequest::get(format!("{}/filters/subcategories", BASE_PATH))
            .optional_query("category", category);
        decode_list(self.transport.send(request).await?)
    }
}

#[async_trait]
impl CrudService for PastPaperService {
    type Entity = PastPaper;
    type Filters = PastPaperFilters;
    type CreatePayload = PastPaperSubmission;
    type UpdatePayload = PastPaperSubmission;

    async fn list(&self, filters: &PastPaperFilters) -> Result<Vec<PastPaper>, ApiError> {
        let request = filters.apply(ApiRequest::get(BASE_PATH));
        let papers = decode_list(self.transport.send(request).await?)?;
        tracing::debug!(count = papers.len(), "Past papers listed");
        Ok(papers)
    }

    async fn get(&self, id: &str) -> Result<PastPaper, ApiError> {
        decode(self.transport.send(ApiRequest::get(Self::item_path(id)?)).await?)
    }

    async fn create(&self, submission: PastPaperSubmission) -> Result<PastPaper, ApiError> {
        let request = ApiRequest::post(BASE_PATH).multipart(submission.into_multipart()?);
        let created: PastPaper = decode(self.transport.send(request).await?)?;
        tracing::info!(id = %created.id, "Past paper created");
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        submission: PastPaperSubmission,
    ) -> Result<PastPaper, ApiError> {
        let request =
            ApiRequest::put(Self::item_path(id)?).multipart(submission.into_multipart()?);
        let updated: PastPaper = decode(self.transport.send(request).await?)?;
        tracing::info!(id = %id, "Past paper updated");
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .send(ApiRequest::delete(Self::item_path(id)?))
            .await?;
        tracing::info!(id = %id, "Past paper deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::MockTransport;
    use crate::application::ports::{Method, Part, RequestBody};
    use serde_json::json;

    fn submission() -> PastPaperSubmission {
        PastPaperSubmission {
            fields: PastPaperFields {
                category: Some("c1".to_string()),
                sub_category: Some("s1".to_string()),
                exam: Some("e1".to_string()),
                subject: Some("sub1".to_string()),
                description: Some("2021 mains".to_string()),
                year: Some(2021),
            },
            thumbnail: Some(FileUpload::new("thumb.png", "image/png", vec![1, 2])),
            paper: Some(FileUpload::new("paper.pdf", "application/pdf", vec![3, 4])),
        }
    }

    #[tokio::test]
    async fn test_create_builds_thumbnail_paper_and_pyq_parts() {
        let transport = Arc::new(MockTransport::new().respond(json!({"_id": "p1"})));
        let service = PastPaperService::new(transport.clone());

        let created = service.create(submission()).await.unwrap();
        assert_eq!(created.id, "p1");

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, BASE_PATH);
        let RequestBody::Multipart(payload) = request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.part_names(), vec!["thumbnail", "paper", "pyq"]);
        assert!(matches!(
            &payload.parts()[1],
            Part::File { file, .. } if file.file_name == "paper.pdf"
        ));

        let pyq: serde_json::Value = serde_json::from_str(payload.text_part("pyq").unwrap()).unwrap();
        assert_eq!(
            pyq,
            json!({
                "category": "c1",
                "subCategory": "s1",
                "exam": "e1",
                "subject": "sub1",
                "description": "2021 mains",
                "year": 2021
            })
        );
    }

    #[tokio::test]
    async fn test_update_without_files_sends_only_pyq() {
        let transport = Arc::new(MockTransport::new().respond(json!({"_id": "p1"})));
        let service = PastPaperService::new(transport.clone());

        let mut update = submission();
        update.thumbnail = None;
        update.paper = None;
        service.update("p1", update).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/admin/previous-question-papers/p1");
        let RequestBody::Multipart(payload) = request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.part_names(), vec!["pyq"]);
    }

    #[tokio::test]
    async fn test_list_and_filter_endpoints() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(json!({"papers": [{"_id": "p1"}, {"_id": "p2"}]}))
                .respond(json!([{"_id": "c1", "name": "Banking"}]))
                .respond(json!([{"_id": "s1", "name": "PO", "category": "c1"}])),
        );
        let service = PastPaperService::new(transport.clone());

        let filters = PastPaperFilters {
            exam: Some("e1".to_string()),
            ..Default::default()
        };
        assert_eq!(service.list(&filters).await.unwrap().len(), 2);
        assert_eq!(service.filter_categories().await.unwrap()[0].name, "Banking");
        assert_eq!(
            service.filter_sub_categories(Some("c1")).await.unwrap()[0].category_id(),
            Some("c1")
        );

        let requests = transport.requests();
        assert_eq!(requests[0].query, vec![("exam".to_string(), "e1".to_string())]);
        assert_eq!(requests[1].path, "/admin/previous-question-papers/filters/categories");
        assert_eq!(requests[2].path, "/admin/previous-question-papers/filters/subcategories");
        assert_eq!(requests[2].query, vec![("category".to_string(), "c1".to_string())]);
    }
}
