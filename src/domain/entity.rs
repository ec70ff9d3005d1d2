//! Entity - 资源实体公共抽象
//!
//! 所有服务端资源都由服务端分配 ID，客户端只按 ID 做归一化。
//! 嵌套引用字段既可能是展开的对象，也可能只是 ID，这里用和类型表达。

use serde::{Deserialize, Serialize};

/// 服务端资源实体
pub trait Entity: Clone + Send + Sync + 'static {
    /// 资源类型名（用于日志和 in-flight key）
    const KIND: &'static str;

    /// 服务端分配的唯一标识
    fn id(&self) -> &str;
}

/// 带显示名称的实体（用于引用字段的展示和搜索）
pub trait Named {
    fn name(&self) -> &str;
}

/// 对象或 ID 引用
///
/// 服务端有时返回展开的对象（populate），有时只返回 ID 字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef<T> {
    Object(T),
    Id(String),
}

impl<T: Entity> EntityRef<T> {
    /// 引用的 ID（无论是否展开）
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Object(entity) => entity.id(),
            EntityRef::Id(id) => id,
        }
    }

    /// 展开的对象
    pub fn object(&self) -> Option<&T> {
        match self {
            EntityRef::Object(entity) => Some(entity),
            EntityRef::Id(_) => None,
        }
    }
}

impl<T: Entity + Named> EntityRef<T> {
    /// 展示用标签：展开时为名称，否则为 ID
    pub fn label(&self) -> &str {
        match self {
            EntityRef::Object(entity) => entity.name(),
            EntityRef::Id(id) => id,
        }
    }

    /// 仅在展开时返回名称
    pub fn name(&self) -> Option<&str> {
        self.object().map(Named::name)
    }
}

impl<T> From<String> for EntityRef<T> {
    fn from(id: String) -> Self {
        EntityRef::Id(id)
    }
}

/// 媒体文件引用：纯 URL 或带 URL 的对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Url(String),
    Asset(MediaAsset),
}

impl MediaRef {
    pub fn url(&self) -> &str {
        match self {
            MediaRef::Url(url) => url,
            MediaRef::Asset(asset) => &asset.url,
        }
    }
}

/// 服务端托管的媒体文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(alias = "location", alias = "src")]
    pub url: String,
}

impl Entity for MediaAsset {
    const KIND: &'static str = "media";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_entity_ref_decodes_id_and_object() {
        let by_id: EntityRef<Category> = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(by_id.id(), "c1");
        assert!(by_id.object().is_none());

        let by_object: EntityRef<Category> =
            serde_json::from_str(r#"{"_id":"c2","name":"Engineering"}"#).unwrap();
        assert_eq!(by_object.id(), "c2");
        assert_eq!(by_object.label(), "Engineering");
    }

    #[test]
    fn test_media_ref_decodes_both_shapes() {
        let plain: MediaRef = serde_json::from_str("\"https://cdn/x.png\"").unwrap();
        assert_eq!(plain.url(), "https://cdn/x.png");

        let asset: MediaRef =
            serde_json::from_str(r#"{"_id":"m1","url":"https://cdn/y.png"}"#).unwrap();
        assert_eq!(asset.url(), "https://cdn/y.png");
    }
}
