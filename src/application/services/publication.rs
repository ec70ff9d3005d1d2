//! Publication Service - 出版物
//!
//! 端点:
//! - GET/POST          /admin/publications
//! - GET/PATCH/DELETE  /admin/publications/:id
//! - POST              /admin/publications/:id/authors
//! - PATCH/DELETE      /admin/publications/:id/authors/:authorId
//! - POST              /admin/publications/:id/images
//! - PUT/DELETE        /admin/publications/:id/images/:imageId
//! - PUT               /admin/publications/:id/book
//! - PUT               /admin/publications/:id/thumbnail
//! - GET               /admin/publications/categories

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::{decode, decode_list, path_id, CrudService};
use crate::application::error::ApiError;
use crate::application::ports::{ApiRequest, FileUpload, MultipartPayload, TransportPort};
use crate::domain::{Category, Publication};

const BASE_PATH: &str = "/admin/publications";

/// 列表过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationFilters {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// 出版物结构化字段（PATCH 时只发送有值的字段）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorPayload>,
}

/// 作者请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// 新建出版物
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPublication {
    pub fields: PublicationFields,
    pub thumbnail: Option<FileUpload>,
    pub book: Option<FileUpload>,
    pub images: Vec<FileUpload>,
}

impl NewPublication {
    pub fn into_multipart(self) -> Result<MultipartPayload, ApiError> {
        let mut payload = MultipartPayload::new()
            .optional_file("thumbnail", self.thumbnail)
            .optional_file("book", self.book);
        for image in self.images {
            payload = payload.file("images", image);
        }
        payload.json("publication", &self.fields)
    }
}

/// 出版物服务
pub struct PublicationService {
    transport: Arc<dyn TransportPort>,
}

impl PublicationService {
    pub fn new(transport: Arc<dyn TransportPort>) -> Self {
        Self { transport }
    }

    fn item_path(id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", BASE_PATH, path_id(id)?))
    }

    fn sub_path(id: &str, segment: &str) -> Result<String, ApiError> {
        Ok(format!("{}/{}", Self::item_path(id)?, segment))
    }

    fn nested_path(id: &str, segment: &str, nested_id: &str) -> Result<String, ApiError> {
        Ok(format!(
            "{}/{}",
            Self::sub_path(id, segment)?,
            path_id(nested_id)?
        ))
    }

    pub async fn add_author(&self, id: &str, author: AuthorPayload) -> Result<(), ApiError> {
        let request = ApiRequest::post(Self::sub_path(id, "authors")?).json(&author)?;
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, author = %author.name, "Author added");
        Ok(())
    }

    pub async fn update_author(
        &self,
        id: &str,
        author_id: &str,
        author: AuthorPayload,
    ) -> Result<(), ApiError> {
        let request =
            ApiRequest::patch(Self::nested_path(id, "authors", author_id)?).json(&author)?;
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, author_id = %author_id, "Author updated");
        Ok(())
    }

    pub async fn delete_author(&self, id: &str, author_id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(Self::nested_path(id, "authors", author_id)?);
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, author_id = %author_id, "Author deleted");
        Ok(())
    }

    pub async fn add_image(&self, id: &str, image: FileUpload) -> Result<(), ApiError> {
        let request = ApiRequest::post(Self::sub_path(id, "images")?)
            .multipart(MultipartPayload::new().file("image", image));
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, "Publication image added");
        Ok(())
    }

    pub async fn replace_image(
        &self,
        id: &str,
        image_id: &str,
        image: FileUpload,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put(Self::nested_path(id, "images", image_id)?)
            .multipart(MultipartPayload::new().file("image", image));
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, image_id = %image_id, "Publication image replaced");
        Ok(())
    }

    pub async fn delete_image(&self, id: &str, image_id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(Self::nested_path(id, "images", image_id)?);
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, image_id = %image_id, "Publication image deleted");
        Ok(())
    }

    pub async fn replace_book(&self, id: &str, book: FileUpload) -> Result<(), ApiError> {
        let request = ApiRequest::put(Self::sub_path(id, "book")?)
            .multipart(MultipartPayload::new().file("book", book));
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, "Publication book replaced");
        Ok(())
    }

    pub async fn replace_thumbnail(&self, id: &str, thumbnail: FileUpload) -> Result<(), ApiError> {
        let request = ApiRequest::put(Self::sub_path(id, "thumbnail")?)
            .multipart(MultipartPayload::new().file("thumbnail", thumbnail));
        self.transport.send(request).await?;
        tracing::info!(publication_id = %id, "Publication thumbnail replaced");
        Ok(())
    }

    /// 出版物可用分类
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = ApiRequest::get(format!("{}/categories", BASE_PATH));
        decode_list(self.transport.send(request).await?)
    }
}

#[async_trait]
impl CrudService for PublicationService {
    type Entity = Publication;
    type Filters = PublicationFilters;
    type CreatePayload = NewPublication;
    type UpdatePayload = PublicationFields;

    async fn list(&self, filters: &PublicationFilters) -> Result<Vec<Publication>, ApiError> {
        let request = ApiRequest::get(BASE_PATH)
            .optional_query("category", filters.category.as_deref())
            .optional_query("search", filters.search.as_deref());
        let publications = decode_list(self.transport.send(request).await?)?;
        tracing::debug!(count = publications.len(), "Publications listed");
        Ok(publications)
    }

    async fn get(&self, id: &str) -> Result<Publication, ApiError> {
        decode(self.transport.send(ApiRequest::get(Self::item_path(id)?)).await?)
    }

    async fn create(&self, publication: NewPublication) -> Result<Publication, ApiError> {
        let request = ApiRequest::post(BASE_PATH).multipart(publication.into_multipart()?);
        let created: Publication = decode(self.transport.send(request).await?)?;
        tracing::info!(id = %created.id, title = %created.title, "Publication created");
        Ok(created)
    }

    async fn update(&self, id: &str, fields: PublicationFields) -> Result<Publication, ApiError> {
        let request = ApiRequest::patch(Self::item_path(id)?).json(&fields)?;
        let updated: Publication = decode(self.transport.send(request).await?)?;
        tracing::info!(id = %id, "Publication updated");
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .send(ApiRequest::delete(Self::item_path(id)?))
            .await?;
        tracing::info!(id = %id, "Publication deleted");
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
    async fn test_create_multipart_shape() {
        let transport = Arc::new(
            MockTransport::new().respond(json!({"_id": "pub1", "title": "Atlas"})),
        );
        let service = PublicationService::new(transport.clone());

        let publication = NewPublication {
            fields: PublicationFields {
                title: Some("Atlas".to_string()),
                authors: vec![AuthorPayload {
                    name: "Ada".to_string(),
                    bio: None,
                }],
                ..Default::default()
            },
            thumbnail: Some(FileUpload::new("t.png", "image/png", vec![1])),
            book: Some(FileUpload::new("b.pdf", "application/pdf", vec![2])),
            images: vec![FileUpload::new("i.png", "image/png", vec![3])],
        };
        service.create(publication).await.unwrap();

        let RequestBody::Multipart(payload) = transport.last_request().body else {
            panic!("expected multipart body");
        };
        assert_eq!(
            payload.part_names(),
            vec!["thumbnail", "book", "images", "publication"]
        );
        let fields: serde_json::Value =
            serde_json::from_str(payload.text_part("publication").unwrap()).unwrap();
        assert_eq!(fields, json!({"title": "Atlas", "authors": [{"name": "Ada"}]}));
    }

    #[tokio::test]
    async fn test_update_patches_only_present_fields() {
        let transport = Arc::new(
            MockTransport::new().respond(json!({"_id": "pub1", "title": "Atlas 2"})),
        );
        let service = PublicationService::new(transport.clone());

        let fields = PublicationFields {
            title: Some("Atlas 2".to_string()),
            ..Default::default()
        };
        service.update("pub1", fields).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.body, RequestBody::Json(json!({"title": "Atlas 2"})));
    }

    #[tokio::test]
    async fn test_nested_resource_paths() {
        let transport = Arc::new(MockTransport::new());
        let service = PublicationService::new(transport.clone());
        let file = FileUpload::new("x.png", "image/png", vec![0]);

        service.add_author("p1", AuthorPayload::default()).await.unwrap();
        service
            .update_author("p1", "a1", AuthorPayload::default())
            .await
            .unwrap();
        service.delete_author("p1", "a1").await.unwrap();
        service.add_image("p1", file.clone()).await.unwrap();
        service.replace_image("p1", "i1", file.clone()).await.unwrap();
        service.delete_image("p1", "i1").await.unwrap();
        service.replace_book("p1", file.clone()).await.unwrap();
        service.replace_thumbnail("p1", file).await.unwrap();

        let calls: Vec<(Method, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::Post, "/admin/publications/p1/authors".to_string()),
                (Method::Patch, "/admin/publications/p1/authors/a1".to_string()),
                (Method::Delete, "/admin/publications/p1/authors/a1".to_string()),
                (Method::Post, "/admin/publications/p1/images".to_string()),
                (Method::Put, "/admin/publications/p1/images/i1".to_string()),
                (Method::Delete, "/admin/publications/p1/images/i1".to_string()),
                (Method::Put, "/admin/publications/p1/book".to_string()),
                (Method::Put, "/admin/publications/p1/thumbnail".to_string()),
            ]
        );
    }
}
