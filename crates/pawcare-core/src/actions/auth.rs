use tracing::info;

use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::error::ClientResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, Session};
use crate::notify::Notification;
use crate::session::session_from_auth;
use crate::store::{self, select};

const LOGIN: Operation = Operation::write("auth/login", "Signing in...", "Signed in");
const REGISTER: Operation =
    Operation::write("auth/register", "Creating account...", "Account created");

impl PawcareClient {
    /// Load the persisted session into the store.
    pub fn restore_session(&self) -> ClientResult<Option<Session>> {
        let session = self.storage().load_session()?;
        let restored = session.clone();
        self.dispatcher()
            .update(|s| s.session.reset(restored))?;
        if let Some(session) = &session {
            info!(role = %session.role, "session restored");
        }
        Ok(session)
    }

    /// Sign in, decode the role claim and persist the session.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.dispatcher()
            .run(
                LOGIN,
                store::session,
                self.authenticate("api/Account/login", &request),
                select,
            )
            .await
    }

    /// Create a pet-owner account and sign in with it.
    pub async fn register_pet_owner(&self, request: RegisterRequest) -> Outcome<Session> {
        self.dispatcher()
            .run(
                REGISTER,
                store::session,
                self.authenticate("api/Account/register", &request),
                select,
            )
            .await
    }

    /// Forget the session and everything tied to it.
    pub fn logout(&self) -> ClientResult<()> {
        self.storage().clear_session()?;
        self.dispatcher().update(|s| s.clear_user_data())?;
        self.dispatcher().notifier().notify(Notification::Success {
            message: "Signed out".to_string(),
        });
        Ok(())
    }

    async fn authenticate<B>(&self, path: &str, body: &B) -> ClientResult<Session>
    where
        B: serde::Serialize + ?Sized,
    {
        let response: AuthResponse = self.post(path, body).await?;
        let session = session_from_auth(response)?;
        self.storage().save_session(&session)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CoreConfig;
    use crate::models::Role;
    use crate::notify::QueueNotifier;
    use crate::storage::LocalStorage;

    #[test]
    fn test_restore_and_logout() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage
            .save_session(&Session {
                token: "tok".into(),
                role: Role::Doctor,
                user_id: Some("d-1".into()),
                display_name: None,
                email: None,
            })
            .unwrap();

        let notifier = Arc::new(QueueNotifier::new());
        let client = PawcareClient::new(&CoreConfig::default(), storage, notifier.clone()).unwrap();

        let restored = client.restore_session().unwrap().unwrap();
        assert_eq!(restored.role, Role::Doctor);
        assert_eq!(client.session().unwrap(), Some(restored));

        client.logout().unwrap();
        assert_eq!(client.session().unwrap(), None);
        assert!(client.storage().load_session().unwrap().is_none());
        assert_eq!(
            notifier.notifications(),
            vec![Notification::Success {
                message: "Signed out".into()
            }]
        );
    }
}
