//! Resource Services - 资源服务
//!
//! 每个操作一对一映射到一次 HTTP 调用，错误原样向上传播。
//! 响应在这里做防御式解码：列表可能是裸数组，也可能包在单字段对象里。

mod auth;
mod banner;
mod catalog;
mod past_paper;
mod publication;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::error::ApiError;
use crate::domain::Entity;

pub use auth::AuthService;
pub use banner::{BannerService, NewBanner};
pub use catalog::{
    CatalogFilters, CatalogResource, CatalogService, CategoryService, ExamService, NamedPayload,
    SubCategoryPayload, SubCategoryService, SubjectService,
};
pub use past_paper::{PastPaperFields, PastPaperFilters, PastPaperService, PastPaperSubmission};
pub use publication::{
    AuthorPayload, NewPublication, PublicationFields, PublicationFilters, PublicationService,
};

/// 通用 CRUD 服务
#[async_trait]
pub trait CrudService: Send + Sync {
    type Entity: Entity;
    type Filters: Send + Sync;
    type CreatePayload: Send;
    type UpdatePayload: Send;

    async fn list(&self, filters: &Self::Filters) -> Result<Vec<Self::Entity>, ApiError>;

    async fn get(&self, id: &str) -> Result<Self::Entity, ApiError>;

    async fn create(&self, payload: Self::CreatePayload) -> Result<Self::Entity, ApiError>;

    async fn update(
        &self,
        id: &str,
        payload: Self::UpdatePayload,
    ) -> Result<Self::Entity, ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

/// 解码单个实体
///
/// 先按实体本身解码；失败时若响应是单字段对象（如 `{"paper": {...}}`）则解包再试
pub(crate) fn decode<T: DeserializeOwned>(mut value: Value) -> Result<T, ApiError> {
    normalize_ids(&mut value);
    let first_error = match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };

    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(inner @ Value::Object(_)) = map.values().next() {
                return serde_json::from_value(inner.clone())
                    .map_err(|e| ApiError::invalid_response(e.to_string()));
            }
        }
    }

    Err(ApiError::invalid_response(first_error.to_string()))
}

/// 解码实体列表
///
/// 接受裸数组、`null`（空列表）或只含一个数组字段的对象
pub(crate) fn decode_list<T: DeserializeOwned>(mut value: Value) -> Result<Vec<T>, ApiError> {
    normalize_ids(&mut value);
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::invalid_response(e.to_string()))
        }
        Value::Object(map) => {
            let mut arrays = map.into_iter().filter(|(_, v)| v.is_array());
            match (arrays.next(), arrays.next()) {
                (Some((_, list)), None) => serde_json::from_value(list)
                    .map_err(|e| ApiError::invalid_response(e.to_string())),
                _ => Err(ApiError::invalid_response(
                    "expected a list or an object with one list field",
                )),
            }
        }
        other => Err(ApiError::invalid_response(format!(
            "expected a list, got {}",
            other
        ))),
    }
}

/// 同时带 `_id` 和 `id`（虚拟字段）的记录只保留 `_id`，递归处理嵌套对象
fn normalize_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("_id") {
                map.remove("id");
            }
            map.values_mut().for_each(normalize_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_ids),
        _ => {}
    }
}

/// 校验路径中的 ID 段
pub(crate) fn path_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') || id.contains('?') || id.contains('#') {
        return Err(ApiError::invalid_request(format!("Invalid identifier: {:?}", id)));
    }
    Ok(id)
}
