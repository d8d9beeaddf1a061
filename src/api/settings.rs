use super::snippets::invalidate_catalog;
use crate::settings::{
    get_beta_label as core_get_beta_label, get_graph_base_url as core_get_graph_base_url,
    reset_beta_label as core_reset_beta_label, reset_graph_base_url as core_reset_graph_base_url,
    set_beta_label as core_set_beta_label, set_graph_base_url as core_set_graph_base_url,
};

#[flutter_rust_bridge::frb]
pub fn get_beta_label() -> Result<String, String> {
    core_get_beta_label()
}

#[flutter_rust_bridge::frb]
pub fn set_beta_label(label: String) -> Result<String, String> {
    core_set_beta_label(label)
}

#[flutter_rust_bridge::frb]
pub fn reset_beta_label() -> Result<String, String> {
    core_reset_beta_label()
}

#[flutter_rust_bridge::frb]
pub fn get_graph_base_url() -> Result<String, String> {
    core_get_graph_base_url()
}

/// 更换主机后目录中的服务句柄已过期，需要重建。
#[flutter_rust_bridge::frb]
pub fn set_graph_base_url(url: String) -> Result<String, String> {
    let updated = core_set_graph_base_url(url)?;
    invalidate_catalog();
    Ok(updated)
}

#[flutter_rust_bridge::frb]
pub fn reset_graph_base_url() -> Result<String, String> {
    let updated = core_reset_graph_base_url()?;
    invalidate_catalog();
    Ok(updated)
}
