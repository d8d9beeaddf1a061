use rusqlite::{params, Connection, OptionalExtension};

use super::{current_timestamp_millis, with_connection, StorageResult};

pub(crate) const SETTINGS_TABLE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at_millis INTEGER NOT NULL
);";

pub fn get_setting(key: &str) -> StorageResult<Option<String>> {
    with_connection(|conn| query_setting(conn, key))
}

pub fn set_setting(key: &str, value: &str) -> StorageResult<()> {
    with_connection(|conn| upsert_setting(conn, key, value))
}

pub fn delete_setting(key: &str) -> StorageResult<()> {
    with_connection(|conn| remove_setting(conn, key))
}

fn query_setting(conn: &Connection, key: &str) -> StorageResult<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key = ?",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| format!("failed to query setting {key}: {e}"))
}

fn upsert_setting(conn: &Connection, key: &str, value: &str) -> StorageResult<()> {
    let updated_at = current_timestamp_millis();
    conn.execute(
        "INSERT INTO settings (key, value, updated_at_millis) VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at_millis = excluded.updated_at_millis",
        params![key, value, updated_at],
    )
    .map_err(|e| format!("failed to upsert setting {key}: {e}"))?;
    Ok(())
}

fn remove_setting(conn: &Connection, key: &str) -> StorageResult<()> {
    conn.execute("DELETE FROM settings WHERE key = ?", params![key])
        .map_err(|e| format!("failed to delete setting {key}: {e}"))?;
    Ok(())
}
