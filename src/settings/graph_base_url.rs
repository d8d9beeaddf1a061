use crate::db;
use crate::graph::GRAPH_HOST;
use url::Url;

const GRAPH_BASE_URL_KEY: &str = "graph_base_url";

/// 当前使用的 Graph 主机地址；未配置时为全球版主机。
pub fn get_graph_base_url() -> Result<String, String> {
    if let Some(value) = db::get_setting(GRAPH_BASE_URL_KEY)? {
        return Ok(value);
    }
    Ok(GRAPH_HOST.to_string())
}

/// 仅接受 http/https 地址，保存前去掉末尾的 `/`。
pub fn set_graph_base_url(raw: String) -> Result<String, String> {
    let normalized = normalize_base_url(&raw)?;
    db::set_setting(GRAPH_BASE_URL_KEY, &normalized)?;
    Ok(normalized)
}

pub fn reset_graph_base_url() -> Result<String, String> {
    db::delete_setting(GRAPH_BASE_URL_KEY)?;
    Ok(GRAPH_HOST.to_string())
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("graph base url cannot be empty".to_string());
    }
    let url = Url::parse(trimmed).map_err(|e| format!("invalid graph base url: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported graph base url scheme: {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("graph base url must include a host".to_string());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
