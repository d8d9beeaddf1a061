use super::snippets::invalidate_catalog;
use crate::db;

/// 外部登录流程完成后写入 token；旧目录随之失效，下次访问时按新 token 重建。
#[flutter_rust_bridge::frb]
pub fn store_access_token(
    access_token: String,
    account: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
) -> Result<(), String> {
    if access_token.trim().is_empty() {
        return Err("access token is required".to_string());
    }
    let record = db::build_record(account, access_token, expires_in, scope);
    db::upsert_auth_record(&record)?;
    invalidate_catalog();
    tracing::info!("access token stored");
    Ok(())
}

/// 当前登录账号；未登录时为 None。
#[flutter_rust_bridge::frb]
pub fn signed_in_account() -> Result<Option<String>, String> {
    Ok(db::load_auth_record()?.and_then(|record| record.account))
}

#[flutter_rust_bridge::frb]
pub fn is_signed_in() -> Result<bool, String> {
    Ok(db::load_auth_record()?.is_some())
}

#[flutter_rust_bridge::frb]
pub fn sign_out() -> Result<(), String> {
    db::clear_auth_record()?;
    invalidate_catalog();
    tracing::info!("access token cleared");
    Ok(())
}
