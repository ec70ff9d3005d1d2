//! Banner Service - 页面横幅
//!
//! 端点:
//! - GET/POST/DELETE /admin/banners/:pageType
//! - POST            /admin/banners/:pageType/images
//! - PUT/DELETE      /admin/banners/:pageType/images/:imageId

use serde::Serialize;
use std::sync::Arc;

use super::{decode, decode_list, path_id};
use crate::application::error::ApiError;
use crate::application::ports::{ApiRequest, FileUpload, MultipartPayload, TransportPort};
use crate::domain::{Banner, PageType};

/// 新建横幅
#[derive(Debug, Clone, Default)]
pub struct NewBanner {
    pub images: Vec<FileUpload>,
    /// 与 images 一一对应的跳转链接
    pub links: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BannerFields<'a> {
    page_type: &'a str,
    links: &'a [Option<String>],
}

/// 横幅服务
pub struct BannerService {
    transport: Arc<dyn TransportPort>,
}

impl BannerService {
    pub fn new(transport: Arc<dyn TransportPort>) -> Self {
        Self { transport }
    }

    fn banner_path(page_type: &PageType) -> String {
        format!("/admin/banners/{}", page_type.as_str())
    }

    fn image_path(page_type: &PageType, image_id: &str) -> Result<String, ApiError> {
        Ok(format!(
            "{}/images/{}",
            Self::banner_path(page_type),
            path_id(image_id)?
        ))
    }

    /// 获取页面的横幅（服务端可能返回单个对象或数组）
    pub async fn list(&self, page_type: &PageType) -> Result<Vec<Banner>, ApiError> {
        let value = self
            .transport
            .send(ApiRequest::get(Self::banner_path(page_type)))
            .await?;

        if value.is_object() {
            if let Ok(banner) = decode::<Banner>(value.clone()) {
                return Ok(vec![banner]);
            }
        }
        decode_list(value)
    }

    /// 创建横幅：多个 `images` 文件分段 + `banner` JSON 分段
    pub async fn create(&self, page_type: &PageType, banner: NewBanner) -> Result<Banner, ApiError> {
        let fields = BannerFields {
            page_type: page_type.as_str(),
            links: &banner.links,
        };
        let mut payload = MultipartPayload::new();
        for image in banner.images {
            payload = payload.file("images", image);
        }
        let payload = payload.json("banner", &fields)?;

        let request = ApiRequest::post(Self::banner_path(page_type)).multipart(payload);
        let created: Banner = decode(self.transport.send(request).await?)?;
        tracing::info!(page_type = %page_type, id = %created.id, "Banner created");
        Ok(created)
    }

    pub async fn remove(&self, page_type: &PageType) -> Result<(), ApiError> {
        self.transport
            .send(ApiRequest::delete(Self::banner_path(page_type)))
            .await?;
        tracing::info!(page_type = %page_type, "Banner deleted");
        Ok(())
    }

    pub async fn add_image(
        &self,
        page_type: &PageType,
        image: FileUpload,
        link: Option<String>,
    ) -> Result<(), ApiError> {
        let payload = image_payload(image, link);
        let request =
            ApiRequest::post(format!("{}/images", Self::banner_path(page_type))).multipart(payload);
        self.transport.send(request).await?;
        tracing::info!(page_type = %page_type, "Banner image added");
        Ok(())
    }

    pub async fn replace_image(
        &self,
        page_type: &PageType,
        image_id: &str,
        image: FileUpload,
        link: Option<String>,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put(Self::image_path(page_type, image_id)?)
            .multipart(image_payload(image, link));
        self.transport.send(request).await?;
        tracing::info!(page_type = %page_type, image_id = %image_id, "Banner image replaced");
        Ok(())
    }

    pub async fn delete_image(&self, page_type: &PageType, image_id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(Self::image_path(page_type, image_id)?);
        self.transport.send(request).await?;
        tracing::info!(page_type = %page_type, image_id = %image_id, "Banner image deleted");
        Ok(())
    }
}

fn image_payload(image: FileUpload, link: Option<String>) -> MultipartPayload {
    let payload = MultipartPayload::new().file("image", image);
    match link {
        Some(link) => payload.text("link", link),
        None => payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::MockTransport;
    use crate::application::ports::{Method, RequestBody};
    use serde_json::json;

    fn home() -> PageType {
        PageType::new("home").unwrap()
    }

    #[tokio::test]
    async fn test_list_accepts_single_object() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(json!({"_id": "b1", "pageType": "home", "images": []}))
                .respond(json!([{"_id": "b1", "pageType": "home"}, {"_id": "b2", "pageType": "home"}])),
        );
        let service = BannerService::new(transport.clone());

        assert_eq!(service.list(&home()).await.unwrap().len(), 1);
        assert_eq!(service.list(&home()).await.unwrap().len(), 2);
        assert_eq!(transport.last_request().path, "/admin/banners/home");
    }

    #[tokio::test]
    async fn test_create_sends_images_and_banner_json() {
        let transport = Arc::new(
            MockTransport::new().respond(json!({"_id": "b1", "pageType": "home", "images": []})),
        );
        let service = BannerService::new(transport.clone());

        let banner = NewBanner {
            images: vec![
                FileUpload::new("a.png", "image/png", vec![1]),
                FileUpload::new("b.png", "image/png", vec![2]),
            ],
            links: vec![Some("/sale".to_string()), None],
        };
        service.create(&home(), banner).await.unwrap();

        let request = transport.last_request();
        let RequestBody::Multipart(payload) = request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.part_names(), vec!["images", "images", "banner"]);
        let fields: serde_json::Value =
            serde_json::from_str(payload.text_part("banner").unwrap()).unwrap();
        assert_eq!(fields, json!({"pageType": "home", "links": ["/sale", null]}));
    }

    #[tokio::test]
    async fn test_image_sub_paths() {
        let transport = Arc::new(MockTransport::new());
        let service = BannerService::new(transport.clone());
        let image = FileUpload::new("c.png", "image/png", vec![3]);

        service
            .add_image(&home(), image.clone(), Some("/x".to_string()))
            .await
            .unwrap();
        service.replace_image(&home(), "i1", image, None).await.unwrap();
        service.delete_image(&home(), "i1").await.unwrap();

        let requests = transport.requests();
        assert_eq!(
            (requests[0].method, requests[0].path.as_str()),
            (Method::Post, "/admin/banners/home/images")
        );
        assert_eq!(
            (requests[1].method, requests[1].path.as_str()),
            (Method::Put, "/admin/banners/home/images/i1")
        );
        assert_eq!(
            (requests[2].method, requests[2].path.as_str()),
            (Method::Delete, "/admin/banners/home/images/i1")
        );
    }
}
