use crate::catalog::{SnippetCatalog, SnippetSection};
use crate::graph::{GraphResponse, GraphService};
use crate::resources::ResourceBundle;
use crate::settings::get_beta_label;
use crate::snippet::{Snippet, SnippetDescriptor};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

/// 目录按当前 token 与主机懒构建；登录状态或主机变化时由 `invalidate_catalog` 清空。
static CATALOG: Lazy<Mutex<Option<Arc<SnippetCatalog>>>> = Lazy::new(|| Mutex::new(None));

/// 与 Flutter 侧共享的 snippet 展示信息。
#[flutter_rust_bridge::frb]
#[derive(Clone, Debug)]
pub struct SnippetView {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub documentation_url: Option<String>,
    pub api_version: Option<String>,
    pub is_admin_required: bool,
    pub is_beta: bool,
    pub code_snippet: Option<String>,
}

#[flutter_rust_bridge::frb]
#[derive(Clone, Debug)]
pub struct SnippetSectionView {
    pub label: String,
    pub snippets: Vec<SnippetView>,
}

/// 执行结果：状态码 + 格式化后的 JSON 正文，便于直接展示。
#[flutter_rust_bridge::frb]
#[derive(Clone, Debug)]
pub struct SnippetRunResult {
    pub key: String,
    pub status: u16,
    pub body: String,
}

#[flutter_rust_bridge::frb]
pub fn list_snippet_sections() -> Result<Vec<SnippetSectionView>, String> {
    let catalog = shared_catalog()?;
    let beta_label = get_beta_label()?;
    Ok(catalog
        .sections()
        .iter()
        .map(|section| section_view(section, &beta_label))
        .collect())
}

/// 同步执行指定 snippet；FRB 会在后台线程调用，不会阻塞 UI。
#[flutter_rust_bridge::frb]
pub fn run_snippet(key: String) -> Result<SnippetRunResult, String> {
    let catalog = shared_catalog()?;
    let response = catalog.run_blocking(&key).map_err(|e| e.to_string())?;
    run_result(key, response)
}

pub(crate) fn invalidate_catalog() {
    match CATALOG.lock() {
        Ok(mut guard) => *guard = None,
        Err(err) => tracing::warn!("snippet catalog lock poisoned: {err}"),
    }
}

fn shared_catalog() -> Result<Arc<SnippetCatalog>, String> {
    let mut guard = CATALOG
        .lock()
        .map_err(|_| "snippet catalog poisoned".to_string())?;
    if let Some(catalog) = guard.as_ref() {
        return Ok(Arc::clone(catalog));
    }

    let service = GraphService::from_stored_token().map_err(|e| e.to_string())?;
    let bundle = ResourceBundle::embedded().map_err(|e| e.to_string())?;
    let catalog = Arc::new(SnippetCatalog::build(Arc::new(service), bundle).map_err(|e| e.to_string())?);
    *guard = Some(Arc::clone(&catalog));
    Ok(catalog)
}

fn section_view(section: &SnippetSection, beta_label: &str) -> SnippetSectionView {
    SnippetSectionView {
        label: section.header.name().to_string(),
        snippets: section
            .snippets
            .iter()
            .map(|snippet| snippet_view(snippet.key(), snippet.descriptor(), beta_label))
            .collect(),
    }
}

fn snippet_view<S>(key: &str, descriptor: &SnippetDescriptor<S>, beta_label: &str) -> SnippetView {
    SnippetView {
        key: key.to_string(),
        name: descriptor.name().to_string(),
        description: descriptor.description().map(str::to_string),
        documentation_url: descriptor.documentation_url().map(str::to_string),
        api_version: descriptor.api_version().map(str::to_string),
        is_admin_required: descriptor.is_admin_required(),
        is_beta: descriptor.is_beta(beta_label),
        code_snippet: descriptor.code_snippet().map(str::to_string),
    }
}

fn run_result(key: String, response: GraphResponse) -> Result<SnippetRunResult, String> {
    let body = if response.body.is_null() {
        String::new()
    } else {
        serde_json::to_string_pretty(&response.body)
            .map_err(|e| format!("failed to format snippet response: {e}"))?
    };
    Ok(SnippetRunResult {
        key,
        status: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn views_carry_descriptor_fields() {
        let service = Arc::new(GraphService::with_base_url("token", "http://127.0.0.1:9").unwrap());
        let catalog = SnippetCatalog::build(service, ResourceBundle::embedded().unwrap()).unwrap();
        let views: Vec<_> = catalog
            .sections()
            .iter()
            .map(|section| section_view(section, "BETA"))
            .collect();

        let users = &views[1];
        assert_eq!(users.label, "Users");
        let filtered = users
            .snippets
            .iter()
            .find(|view| view.key == "get_filtered_users")
            .unwrap();
        assert!(filtered.is_beta);
        assert!(filtered.is_admin_required);
        assert_eq!(filtered.api_version.as_deref(), Some("beta"));
    }

    #[test]
    fn empty_body_renders_as_empty_string() {
        let result = run_result(
            "delete_event".to_string(),
            GraphResponse { status: 204, body: Value::Null },
        )
        .unwrap();
        assert_eq!(result.status, 204);
        assert!(result.body.is_empty());
    }

    #[test]
    fn json_body_is_pretty_printed() {
        let result = run_result(
            "get_me".to_string(),
            GraphResponse { status: 200, body: json!({"displayName": "Adele"}) },
        )
        .unwrap();
        assert!(result.body.contains("\"displayName\": \"Adele\""));
    }
}
