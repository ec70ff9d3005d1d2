//! Publication Context - 出版物、作者、图片

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Entity, EntityRef, MediaAsset, MediaRef, Named};

/// 出版物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef<Category>>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub images: Vec<MediaAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Publication {
    pub fn author(&self, author_id: &str) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == author_id)
    }

    pub fn image(&self, image_id: &str) -> Option<&MediaAsset> {
        self.images.iter().find(|image| image.id == image_id)
    }

    /// 作者名列表（逗号分隔）
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Entity for Publication {
    const KIND: &'static str = "publication";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 出版物作者（嵌套资源）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Entity for Author {
    const KIND: &'static str = "author";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Author {
    fn name(&self) -> &str {
        &self.name
    }
}
