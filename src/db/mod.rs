mod auth;
mod settings;

pub use auth::{build_record, clear_auth_record, load_auth_record, upsert_auth_record};
pub use settings::{delete_setting, get_setting, set_setting};

use auth::AUTH_TABLE_SCHEMA;
use directories::ProjectDirs;
use rusqlite::Connection;
use settings::SETTINGS_TABLE_SCHEMA;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "GraphSnippets";
const APPLICATION: &str = "GraphSnippets";
const DB_FILE_NAME: &str = "graph_snippets.db";

pub type StorageResult<T> = Result<T, String>;

fn with_connection<T, F>(operation: F) -> StorageResult<T>
where
    F: FnOnce(&Connection) -> StorageResult<T>,
{
    let conn = open_connection()?;
    operation(&conn)
}

fn open_connection() -> StorageResult<Connection> {
    let path = database_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create database directory {dir:?}: {e}"))?;
    }

    let conn =
        Connection::open(path).map_err(|e| format!("failed to open SQLite database: {e}"))?;
    apply_migrations(&conn)?;
    Ok(conn)
}

/// 所有表结构集中在这里建好；各子模块只负责自己的 schema 常量。
fn apply_migrations(conn: &Connection) -> StorageResult<()> {
    for schema in [AUTH_TABLE_SCHEMA, SETTINGS_TABLE_SCHEMA] {
        conn.execute_batch(schema)
            .map_err(|e| format!("failed to initialize database schema: {e}"))?;
    }
    Ok(())
}

fn database_path() -> StorageResult<PathBuf> {
    let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| "failed to resolve application data directory".to_string())?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}

fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) fn in_memory_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory sqlite");
    apply_migrations(&conn).expect("migrations");
    conn
}
