//! SQLite access helpers shared by the service modules.
//!
//! Every service opens a short-lived connection per request, mirroring
//! the request/response granularity of the API. The schema is created
//! once at startup.

use rusqlite::Connection;

/// Opens a connection to the configured database file.
pub fn open(db_path: &str) -> Result<Connection, String> {
    Connection::open(db_path).map_err(|e| e.to_string())
}

/// Creates the schema if it does not exist yet. Called once from `main`.
pub fn init(db_path: &str) -> Result<(), String> {
    let conn = open(db_path)?;
    create_schema(&conn)
}

pub(crate) fn create_schema(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS templates (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            platform     TEXT NOT NULL,
            aspect_ratio TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS template_fields (
            id          TEXT NOT NULL,
            template_id TEXT NOT NULL,
            name        TEXT NOT NULL,
            field_type  TEXT NOT NULL,
            required    INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL DEFAULT '',
            position    INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (id, template_id)
        );
        CREATE TABLE IF NOT EXISTS assets (
            id         TEXT PRIMARY KEY,
            asset_type TEXT NOT NULL,
            url        TEXT NOT NULL,
            metadata   TEXT
        );
        CREATE TABLE IF NOT EXISTS matrices (
            id                TEXT PRIMARY KEY,
            name              TEXT NOT NULL,
            description       TEXT,
            template_id       TEXT NOT NULL,
            status            TEXT NOT NULL,
            variations        TEXT NOT NULL,
            combinations      TEXT NOT NULL,
            field_assignments TEXT NOT NULL
        );",
    )
    .map_err(|e| e.to_string())
}
