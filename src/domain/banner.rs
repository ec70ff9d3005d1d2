//! Banner Context - 页面横幅

use serde::{Deserialize, Serialize};

use super::{DomainError, Entity};

/// 横幅所属页面类型（URL 路径段）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageType(String);

impl PageType {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPageType(value));
        }
        if trimmed.contains('/') || trimmed.contains('?') {
            return Err(DomainError::InvalidPageType(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PageType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageType> for String {
    fn from(page_type: PageType) -> Self {
        page_type.0
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 横幅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(alias = "_id")]
    pub id: String,
    pub page_type: PageType,
    #[serde(default)]
    pub images: Vec<BannerImage>,
}

impl Banner {
    pub fn image(&self, image_id: &str) -> Option<&BannerImage> {
        self.images.iter().find(|image| image.id == image_id)
    }
}

impl Entity for Banner {
    const KIND: &'static str = "banner";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 横幅图片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerImage {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "imageUrl")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_validation() {
        assert_eq!(PageType::new(" home ").unwrap().as_str(), "home");
        assert!(PageType::new("").is_err());
        assert!(PageType::new("a/b").is_err());
    }

    #[test]
    fn test_banner_decodes_server_shape() {
        let banner: Banner = serde_json::from_str(
            r#"{"_id":"b1","pageType":"home","images":[{"_id":"i1","url":"https://cdn/1.png","link":"/offers"}]}"#,
        )
        .unwrap();
        assert_eq!(banner.page_type.as_str(), "home");
        assert_eq!(banner.image("i1").unwrap().link.as_deref(), Some("/offers"));
    }
}
