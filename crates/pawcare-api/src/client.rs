//! REST client implementation.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::{ApiConfig, ApiError, ApiResult, TokenSource};

/// JSON REST client bound to one backend host.
///
/// Every request carries `Authorization: Bearer <token>` when the token source
/// has a token. No retries are attempted; a failed call surfaces once and the
/// caller decides whether to re-invoke it.
#[derive(Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    /// Create a client for the configured host.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> ApiResult<Self> {
        // Validate once up front so later joins only fail on bad paths.
        Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            inner: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request path against the base URL.
    pub fn url(&self, path: &str) -> ApiResult<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path)?;
        self.execute(builder, Method::GET, path).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        self.execute(builder, Method::GET, path).await
    }

    /// POST a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        self.execute(builder, Method::POST, path).await
    }

    /// PUT a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path)?.json(body);
        self.execute(builder, Method::PUT, path).await
    }

    /// DELETE a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::DELETE, path)?;
        self.execute(builder, Method::DELETE, path).await
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let url = self.url(path)?;
        let mut builder = self.inner.request(method, url);
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        method: Method,
        path: &str,
    ) -> ApiResult<T> {
        let response = builder.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed before a response");
            ApiError::Network(e)
        })?;

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), path, body));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            // Empty 2xx bodies decode as JSON null so `()` and `Option<T>` work.
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
