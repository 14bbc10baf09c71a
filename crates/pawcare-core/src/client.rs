//! Client facade: API, storage and dispatcher wired together.
//!
//! Actions live in [`crate::actions`], one `impl PawcareClient` block per
//! domain.

use std::future::Future;
use std::sync::{Arc, Mutex};

use pawcare_api::ApiClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CoreConfig;
use crate::dispatch::{Dispatcher, Operation, Outcome};
use crate::error::{ClientError, ClientResult};
use crate::models::{Role, Session};
use crate::notify::Notifier;
use crate::storage::LocalStorage;
use crate::store::Store;
use crate::workflow::require_role;

/// Entry point for the UI layer.
pub struct PawcareClient {
    api: ApiClient,
    storage: Arc<LocalStorage>,
    dispatcher: Dispatcher,
}

impl PawcareClient {
    /// Wire a client around existing storage.
    pub fn new(
        config: &CoreConfig,
        storage: LocalStorage,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let storage = Arc::new(storage);
        let api = ApiClient::new(&config.api, storage.clone())?;
        let dispatcher = Dispatcher::new(Arc::new(Mutex::new(Store::new())), notifier);

        info!(base_url = api.base_url(), "client ready");
        Ok(Self {
            api,
            storage,
            dispatcher,
        })
    }

    /// Open the configured database (in-memory when no path is set).
    pub fn open(config: &CoreConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let storage = match &config.database_path {
            Some(path) => LocalStorage::open(path)?,
            None => LocalStorage::open_in_memory()?,
        };
        Self::new(config, storage, notifier)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Read derived state under the store lock.
    pub fn select<R>(&self, f: impl FnOnce(&Store) -> R) -> ClientResult<R> {
        self.dispatcher.read(f)
    }

    /// Clone of the whole store.
    pub fn snapshot(&self) -> ClientResult<Store> {
        self.dispatcher.read(Store::clone)
    }

    /// Current session from the store.
    pub fn session(&self) -> ClientResult<Option<Session>> {
        self.dispatcher.read(|s| s.current_session().cloned())
    }

    /// Current session, required to have one of `roles`.
    pub(crate) fn require(&self, roles: &[Role]) -> ClientResult<Session> {
        let session = self.session()?;
        Ok(require_role(session.as_ref(), roles)?.clone())
    }

    /// Refuse an operation before anything is sent.
    pub(crate) fn refuse<P>(&self, op: Operation, err: ClientError) -> Outcome<P> {
        warn!(operation = op.name, error = %err, "refused");
        Outcome::Rejected(err)
    }

    // Request helpers mapping transport errors into client errors.

    pub(crate) fn get<'a, T>(&'a self, path: &'a str) -> impl Future<Output = ClientResult<T>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        async move { self.api.get(path).await.map_err(ClientError::from) }
    }

    /// GET where 404 means "none".
    pub(crate) fn get_optional<'a, T>(
        &'a self,
        path: &'a str,
    ) -> impl Future<Output = ClientResult<Option<T>>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        async move {
            match self.api.get::<Option<T>>(path).await {
                Ok(value) => Ok(value),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(ClientError::from(e)),
            }
        }
    }

    pub(crate) fn get_query<'a, Q, T>(
        &'a self,
        path: &'a str,
        query: &'a Q,
    ) -> impl Future<Output = ClientResult<T>> + 'a
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned + 'a,
    {
        async move {
            self.api
                .get_query(path, query)
                .await
                .map_err(ClientError::from)
        }
    }

    pub(crate) fn post<'a, B, T>(
        &'a self,
        path: &'a str,
        body: &'a B,
    ) -> impl Future<Output = ClientResult<T>> + 'a
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'a,
    {
        async move { self.api.post(path, body).await.map_err(ClientError::from) }
    }

    pub(crate) fn put<'a, B, T>(
        &'a self,
        path: &'a str,
        body: &'a B,
    ) -> impl Future<Output = ClientResult<T>> + 'a
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'a,
    {
        async move { self.api.put(path, body).await.map_err(ClientError::from) }
    }

    pub(crate) fn delete<'a, T>(&'a self, path: &'a str) -> impl Future<Output = ClientResult<T>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        async move { self.api.delete(path).await.map_err(ClientError::from) }
    }
}

impl std::fmt::Debug for PawcareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PawcareClient")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::QueueNotifier;
    use crate::workflow::WorkflowError;

    fn client() -> PawcareClient {
        let config = CoreConfig::default();
        PawcareClient::new(
            &config,
            LocalStorage::open_in_memory().unwrap(),
            Arc::new(QueueNotifier::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_require_without_session() {
        let client = client();
        let err = client.require(&[Role::PetOwner]).unwrap_err();
        assert!(matches!(err, ClientError::Workflow(WorkflowError::NotSignedIn)));
    }

    #[test]
    fn test_snapshot_starts_empty() {
        let store = client().snapshot().unwrap();
        assert_eq!(store, Store::new());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = CoreConfig::default();
        config.api.base_url = "not a url".into();
        let result = PawcareClient::new(
            &config,
            LocalStorage::open_in_memory().unwrap(),
            Arc::new(QueueNotifier::new()),
        );
        assert!(matches!(result, Err(ClientError::Api(_))));
    }
}
