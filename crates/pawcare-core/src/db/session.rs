//! Session persistence.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Role, Session};

impl Database {
    /// Save the session, replacing any previous one.
    pub fn save_session(&self, session: &Session) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO session (id, token, role, user_id, display_name, email, saved_at)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                role = excluded.role,
                user_id = excluded.user_id,
                display_name = excluded.display_name,
                email = excluded.email,
                saved_at = excluded.saved_at
            "#,
            params![
                session.token,
                session.role.code(),
                session.user_id,
                session.display_name,
                session.email,
            ],
        )?;
        Ok(())
    }

    /// Load the saved session, if any.
    pub fn load_session(&self) -> DbResult<Option<Session>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT token, role, user_id, display_name, email
                FROM session
                WHERE id = 1
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u8>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(token, role, user_id, display_name, email)| {
            let role = Role::from_code(role)
                .ok_or_else(|| DbError::InvalidRow(format!("unknown role code {}", role)))?;
            Ok(Session {
                token,
                role,
                user_id,
                display_name,
                email,
            })
        })
        .transpose()
    }

    /// Get only the stored token.
    pub fn session_token(&self) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT token FROM session WHERE id = 1", [], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Delete the saved session. Returns true if one existed.
    pub fn clear_session(&self) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM session WHERE id = 1", [])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str, role: Role) -> Session {
        Session {
            token: token.into(),
            role,
            user_id: Some("user-1".into()),
            display_name: Some("Sara".into()),
            email: Some("sara@example.com".into()),
        }
    }

    #[test]
    fn test_save_and_load() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_session().unwrap().is_none());

        db.save_session(&session("t1", Role::Doctor)).unwrap();

        let loaded = db.load_session().unwrap().unwrap();
        assert_eq!(loaded, session("t1", Role::Doctor));
        assert_eq!(db.session_token().unwrap(), Some("t1".into()));
    }

    #[test]
    fn test_save_replaces_previous() {
        let db = Database::open_in_memory().unwrap();
        db.save_session(&session("t1", Role::PetOwner)).unwrap();
        db.save_session(&session("t2", Role::Admin)).unwrap();

        let loaded = db.load_session().unwrap().unwrap();
        assert_eq!(loaded.token, "t2");
        assert_eq!(loaded.role, Role::Admin);
    }

    #[test]
    fn test_clear_session() {
        let db = Database::open_in_memory().unwrap();
        db.save_session(&session("t1", Role::PetOwner)).unwrap();

        assert!(db.clear_session().unwrap());
        assert!(db.load_session().unwrap().is_none());
        assert!(!db.clear_session().unwrap());
    }
}
