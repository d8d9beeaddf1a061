use crate::db;
use crate::resources::{MetadataSource, ResourceBundle, BETA_LABEL_ID};

const BETA_LABEL_KEY: &str = "beta_label";
const FALLBACK_BETA_LABEL: &str = "beta";

/// 读取 beta 标签：优先使用设置表中的覆盖值，否则取资源包中的 `beta` 字符串。
pub fn get_beta_label() -> Result<String, String> {
    let stored = db::get_setting(BETA_LABEL_KEY)?;
    let bundle = ResourceBundle::embedded().map_err(|e| e.to_string())?;
    Ok(resolve_beta_label(stored, bundle))
}

pub fn set_beta_label(label: String) -> Result<String, String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err("beta label cannot be empty".to_string());
    }
    db::set_setting(BETA_LABEL_KEY, trimmed)?;
    Ok(trimmed.to_string())
}

/// 删除覆盖值，恢复为资源包默认值。
pub fn reset_beta_label() -> Result<String, String> {
    db::delete_setting(BETA_LABEL_KEY)?;
    let bundle = ResourceBundle::embedded().map_err(|e| e.to_string())?;
    Ok(default_beta_label(bundle))
}

pub fn default_beta_label(source: &dyn MetadataSource) -> String {
    source
        .configured_string(BETA_LABEL_ID)
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_BETA_LABEL.to_string())
}

fn resolve_beta_label(stored: Option<String>, source: &dyn MetadataSource) -> String {
    stored
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| default_beta_label(source))
}
