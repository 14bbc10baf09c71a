//! Key/value settings.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult, BASKET_ID_KEY};

impl Database {
    /// Read a setting.
    pub fn get_setting(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Write a setting.
    pub fn set_setting(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a setting. Returns true if it existed.
    pub fn delete_setting(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    /// Stored basket ID.
    pub fn basket_id(&self) -> DbResult<Option<String>> {
        self.get_setting(BASKET_ID_KEY)
    }

    /// Remember the basket ID.
    pub fn set_basket_id(&self, basket_id: &str) -> DbResult<()> {
        self.set_setting(BASKET_ID_KEY, basket_id)
    }

    /// Forget the basket ID.
    pub fn clear_basket_id(&self) -> DbResult<bool> {
        self.delete_setting(BASKET_ID_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basket_id_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.basket_id().unwrap().is_none());

        db.set_basket_id("b-1").unwrap();
        db.set_basket_id("b-2").unwrap();
        assert_eq!(db.basket_id().unwrap(), Some("b-2".into()));

        assert!(db.clear_basket_id().unwrap());
        assert!(db.basket_id().unwrap().is_none());
    }
}
