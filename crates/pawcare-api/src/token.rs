//! Bearer token sources.

use std::sync::{Arc, RwLock};

/// Supplies the bearer token attached to each request.
///
/// Queried per request so a token saved after login is picked up without
/// rebuilding the client.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// No authentication.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// In-memory token that can be replaced at runtime.
#[derive(Debug, Default, Clone)]
pub struct StaticToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub fn set(&self, token: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = token;
        }
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}
