//! Response Envelope - 响应包装解析
//!
//! 服务端响应形如 `{"success": true, "data": ..., "message": "..."}`，
//! 也可能直接是数据本身。

use serde_json::Value;

use crate::application::error::ApiError;

/// 解析响应体文本
///
/// 空响应体视为 `null`；带 `data` 字段的对象返回 `data`；
/// `success: false` 视为业务校验失败。
pub fn unwrap_body(status: u16, body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::invalid_response(format!("malformed JSON body: {}", e)))?;

    if let Value::Object(map) = &value {
        if map.get("success") == Some(&Value::Bool(false)) {
            let message = extract_message(&value).unwrap_or_else(|| "Request failed".to_string());
            return Err(ApiError::Validation { status, message });
        }
        if let Some(data) = map.get("data") {
            return Ok(data.clone());
        }
    }

    Ok(value)
}

/// 从错误响应体中提取提示信息
pub fn extract_message(value: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(|field| match field {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Object(_) => extract_message(field),
            _ => None,
        })
}

/// 错误响应的提示信息：JSON 字段 > 原始文本 > 状态原因短语
pub fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = extract_message(&value) {
            return message;
        }
    }

    let body = body.trim();
    if !body.is_empty() && body.len() <= 512 {
        return body.to_string();
    }
    reason.unwrap_or("Request failed").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_data_field() {
        let value = unwrap_body(200, r#"{"success":true,"data":[{"_id":"e1"}]}"#).unwrap();
        assert_eq!(value, json!([{"_id": "e1"}]));
    }

    #[test]
    fn test_unwrap_plain_and_empty() {
        assert_eq!(unwrap_body(200, r#"{"_id":"e1"}"#).unwrap(), json!({"_id": "e1"}));
        assert_eq!(unwrap_body(204, "").unwrap(), Value::Null);
    }

    #[test]
    fn test_success_false_is_validation_error() {
        let err = unwrap_body(200, r#"{"success":false,"message":"Duplicate name"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation {
                status: 200,
                message: "Duplicate name".to_string()
            }
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"error":"Bad id"}"#, None), "Bad id");
        assert_eq!(error_message(r#"{"error":{"msg":"Nested"}}"#, None), "Nested");
        assert_eq!(error_message("gateway down", None), "gateway down");
        assert_eq!(error_message("", Some("Bad Gateway")), "Bad Gateway");
    }
}
