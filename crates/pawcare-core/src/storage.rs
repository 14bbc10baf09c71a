//! Thread-safe handle on durable client storage.

use std::sync::Mutex;

use pawcare_api::TokenSource;
use tracing::{debug, info, warn};

use crate::db::{Database, DbResult};
use crate::error::{ClientError, ClientResult};
use crate::models::Session;

/// Shared wrapper around the client database.
///
/// Also serves as the API client's token source, so every request carries
/// whatever token is persisted at the moment it is sent.
#[derive(Debug)]
pub struct LocalStorage {
    db: Mutex<Database>,
}

impl LocalStorage {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn open(path: &str) -> DbResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    fn with_db<R>(&self, f: impl FnOnce(&Database) -> DbResult<R>) -> ClientResult<R> {
        let db = self.db.lock()?;
        f(&db).map_err(ClientError::from)
    }

    pub fn load_session(&self) -> ClientResult<Option<Session>> {
        self.with_db(|db| db.load_session())
    }

    pub fn save_session(&self, session: &Session) -> ClientResult<()> {
        self.with_db(|db| db.save_session(session))?;
        info!(role = %session.role, "session persisted");
        Ok(())
    }

    pub fn clear_session(&self) -> ClientResult<bool> {
        let cleared = self.with_db(|db| db.clear_session())?;
        if cleared {
            info!("session cleared");
        }
        Ok(cleared)
    }

    pub fn basket_id(&self) -> ClientResult<Option<String>> {
        self.with_db(|db| db.basket_id())
    }

    pub fn set_basket_id(&self, basket_id: &str) -> ClientResult<()> {
        self.with_db(|db| db.set_basket_id(basket_id))?;
        debug!(basket_id, "basket id stored");
        Ok(())
    }

    pub fn clear_basket_id(&self) -> ClientResult<bool> {
        self.with_db(|db| db.clear_basket_id())
    }
}

impl TokenSource for LocalStorage {
    fn token(&self) -> Option<String> {
        match self.with_db(|db| db.session_token()) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read session token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_token_source_follows_session() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert_eq!(storage.token(), None);

        storage
            .save_session(&Session {
                token: "tok".into(),
                role: Role::PetOwner,
                user_id: None,
                display_name: None,
                email: None,
            })
            .unwrap();
        assert_eq!(storage.token(), Some("tok".into()));

        storage.clear_session().unwrap();
        assert_eq!(storage.token(), None);
    }
}
