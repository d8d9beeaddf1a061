use rusqlite::{params, Connection, OptionalExtension};
use std::convert::TryInto;

use super::{current_timestamp_millis, with_connection, StorageResult};

/// 外部登录流程交给我们的 access token 只保存一份（id 固定为 1），
/// 供 Graph 服务句柄在下次启动时复用。
pub(crate) const AUTH_TABLE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS auth_tokens (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    account TEXT,
    access_token TEXT NOT NULL,
    expires_in_seconds INTEGER,
    scope TEXT,
    updated_at_millis INTEGER NOT NULL
);";

#[derive(Debug, Clone)]
pub struct AuthTokenRecord {
    pub account: Option<String>,
    pub access_token: String,
    pub expires_in_seconds: Option<i64>,
    pub scope: Option<String>,
    pub updated_at_millis: i64,
}

pub fn upsert_auth_record(record: &AuthTokenRecord) -> StorageResult<()> {
    with_connection(|conn| write_record(conn, record))
}

pub fn load_auth_record() -> StorageResult<Option<AuthTokenRecord>> {
    with_connection(read_record)
}

pub fn clear_auth_record() -> StorageResult<()> {
    with_connection(|conn| {
        conn.execute("DELETE FROM auth_tokens WHERE id = 1", [])
            .map_err(|e| format!("failed to clear auth tokens: {e}"))?;
        Ok(())
    })
}

pub fn build_record(
    account: Option<String>,
    access_token: String,
    expires_in_seconds: Option<u64>,
    scope: Option<String>,
) -> AuthTokenRecord {
    AuthTokenRecord {
        account,
        access_token,
        expires_in_seconds: expires_in_seconds.and_then(|value| value.try_into().ok()),
        scope,
        updated_at_millis: current_timestamp_millis(),
    }
}

fn write_record(conn: &Connection, record: &AuthTokenRecord) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO auth_tokens (
            id,
            account,
            access_token,
            expires_in_seconds,
            scope,
            updated_at_millis
        )
        VALUES (1, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            account = excluded.account,
            access_token = excluded.access_token,
            expires_in_seconds = excluded.expires_in_seconds,
            scope = excluded.scope,
            updated_at_millis = excluded.updated_at_millis",
        params![
            record.account,
            record.access_token,
            record.expires_in_seconds,
            record.scope,
            record.updated_at_millis,
        ],
    )
    .map_err(|e| format!("failed to upsert auth tokens: {e}"))?;
    Ok(())
}

fn read_record(conn: &Connection) -> StorageResult<Option<AuthTokenRecord>> {
    conn.query_row(
        "SELECT
            account,
            access_token,
            expires_in_seconds,
            scope,
            updated_at_millis
        FROM auth_tokens
        WHERE id = 1",
        [],
        |row| {
            Ok(AuthTokenRecord {
                account: row.get(0)?,
                access_token: row.get(1)?,
                expires_in_seconds: row.get(2)?,
                scope: row.get(3)?,
                updated_at_millis: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| format!("failed to read auth tokens: {e}"))
}
