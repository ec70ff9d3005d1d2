//! Taxonomy Context - 考试、科目、分类、子分类
//!
//! 四种资源结构都很扁平，只有子分类通过 ID 引用父分类。

use serde::{Deserialize, Serialize};

use super::{Entity, EntityRef, Named};

/// 考试
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 科目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 子分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef<Category>>,
}

impl SubCategory {
    /// 父分类 ID
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(EntityRef::id)
    }
}

macro_rules! named_entity {
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

named_entity!(Exam, "exam");
named_entity!(Subject, "subject");
named_entity!(Category, "category");
named_entity!(SubCategory, "sub_category");
