use crate::error::GraphError;
use serde::Deserialize;
use serde_json::Value;

/// 一次 Graph 调用的结果：状态码与 JSON 正文（无正文时为 `Null`）。
#[derive(Clone, Debug, PartialEq)]
pub struct GraphResponse {
    pub status: u16,
    pub body: Value,
}

impl GraphResponse {
    /// 读取单个资源的 `id` 字段。
    pub fn id(&self) -> Result<String, GraphError> {
        self.body
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GraphError::MissingData("resource id".to_string()))
    }

    /// 读取集合响应 `value` 中第一项的 `id`，供需要先定位资源的 snippet 使用。
    pub fn first_id(&self) -> Result<String, GraphError> {
        self.body
            .get("value")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| item.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GraphError::MissingData("an item in the collection".to_string()))
    }

    /// 读取字符串字段，例如 `/me` 的 `mail` 或 `userPrincipalName`。
    pub fn string_field(&self, field: &str) -> Option<String> {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
    }
}

/// Graph 错误正文：`{"error": {"code": "...", "message": "..."}}`。
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    pub error: GraphErrorDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorDto {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn first_id_reads_collection_head() {
        let response = GraphResponse {
            status: 200,
            body: json!({"value": [{"id": "g-1"}, {"id": "g-2"}]}),
        };
        assert_eq!(response.first_id().unwrap(), "g-1");
    }

    #[test]
    fn empty_collection_has_no_first_id() {
        let response = GraphResponse {
            status: 200,
            body: json!({"value": []}),
        };
        assert_matches!(response.first_id(), Err(GraphError::MissingData(_)));
    }

    #[test]
    fn string_field_skips_blank_values() {
        let response = GraphResponse {
            status: 200,
            body: json!({"mail": " ", "userPrincipalName": "adele@contoso.com"}),
        };
        assert_eq!(response.string_field("mail"), None);
        assert_eq!(
            response.string_field("userPrincipalName").as_deref(),
            Some("adele@contoso.com")
        );
    }
}
