use crate::error::SnippetError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// 资源包中 beta 标签的字符串 id。
pub const BETA_LABEL_ID: &str = "beta";

const EMBEDDED_RESOURCES: &str = include_str!("../resources/snippets.json");

static EMBEDDED_BUNDLE: Lazy<Result<ResourceBundle, String>> =
    Lazy::new(|| ResourceBundle::from_json(EMBEDDED_RESOURCES).map_err(|e| e.to_string()));

/// snippet 元数据与全局字符串的来源，目录构建与设置模块都只依赖这个接口。
pub trait MetadataSource: Send + Sync {
    /// 按 key 返回有序的元数据数组；不存在时返回 None。
    fn ordered_metadata(&self, key: &str) -> Option<Vec<String>>;

    fn configured_string(&self, id: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResourceBundle {
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    snippets: HashMap<String, Vec<String>>,
}

impl ResourceBundle {
    pub fn from_json(raw: &str) -> Result<Self, SnippetError> {
        serde_json::from_str(raw).map_err(|e| SnippetError::Resource(e.to_string()))
    }

    /// 编译期打包的 `resources/snippets.json`，只解析一次。
    pub fn embedded() -> Result<&'static ResourceBundle, SnippetError> {
        (*EMBEDDED_BUNDLE)
            .as_ref()
            .map_err(|e| SnippetError::Resource(e.clone()))
    }

    pub fn snippet_keys(&self) -> impl Iterator<Item = &str> {
        self.snippets.keys().map(String::as_str)
    }
}

impl MetadataSource for ResourceBundle {
    fn ordered_metadata(&self, key: &str) -> Option<Vec<String>> {
        self.snippets.get(key).cloned()
    }

    fn configured_string(&self, id: &str) -> Option<String> {
        self.strings.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::METADATA_FIELD_COUNT;
    use assert_matches::assert_matches;

    #[test]
    fn embedded_bundle_parses() {
        let bundle = ResourceBundle::embedded().unwrap();
        assert_eq!(bundle.configured_string(BETA_LABEL_ID).as_deref(), Some("beta"));
        assert!(bundle.ordered_metadata("get_me").is_some());
    }

    #[test]
    fn every_embedded_array_has_all_fields() {
        let bundle = ResourceBundle::embedded().unwrap();
        for key in bundle.snippet_keys() {
            let fields = bundle.ordered_metadata(key).unwrap();
            assert_eq!(fields.len(), METADATA_FIELD_COUNT, "snippet {key}");
        }
    }

    #[test]
    fn unknown_keys_are_absent() {
        let bundle = ResourceBundle::from_json(r#"{"snippets": {"a": ["x"]}}"#).unwrap();
        assert_eq!(bundle.ordered_metadata("a"), Some(vec!["x".to_string()]));
        assert_eq!(bundle.ordered_metadata("b"), None);
        assert_eq!(bundle.configured_string(BETA_LABEL_ID), None);
    }

    #[test]
    fn malformed_json_is_a_resource_error() {
        assert_matches!(ResourceBundle::from_json("{"), Err(SnippetError::Resource(_)));
    }
}
