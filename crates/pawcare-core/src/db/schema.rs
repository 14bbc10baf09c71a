//! SQLite schema definition.

/// Bumped whenever `SCHEMA` changes; stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

/// Client storage schema: the session row and small key/value settings.
pub const SCHEMA: &str = r#"
-- Session (single row, id = 1)
CREATE TABLE IF NOT EXISTS session (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    token TEXT NOT NULL,
    role INTEGER NOT NULL CHECK (role IN (0, 1, 2)),  -- 0 pet owner, 1 doctor, 2 admin
    user_id TEXT,
    display_name TEXT,
    email TEXT,
    saved_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Key/value settings (basket id, ...)
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Key under which the basket ID is stored.
pub const BASKET_ID_KEY: &str = "basket_id";
