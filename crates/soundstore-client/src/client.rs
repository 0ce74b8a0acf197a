//! Catalog API client implementation
//!
//! This module provides the shared HTTP client used by the session manager,
//! the resource clients, and the paginated accessors. It owns the reqwest
//! client, the configuration, and the injected credential store, and decodes
//! every response through the standard envelope.

use std::sync::Arc;

use reqwest::{Client as HttpClient, ClientBuilder, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_CLIENT;
use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::session::{AUTH_TOKEN_KEY, CredentialStore};

/// Inner client that holds the HTTP client, configuration, and credentials.
struct ApiClientInner {
    http: HttpClient,
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ApiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Shared client for the catalog API.
///
/// The client attaches a bearer token to every request whenever the
/// credential store holds one. The session manager is the only writer to
/// the store; everything else only reads it.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use soundstore_client::{ApiClient, ApiConfig};
/// use soundstore_client::session::MemoryCredentialStore;
///
/// let config = ApiConfig::builder()
///     .with_base_url("https://api.soundstore.dev")?
///     .build()?;
/// let client = ApiClient::new(config, Arc::new(MemoryCredentialStore::new()))?;
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Creates a new API client with the given configuration and credential store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            "Creating catalog API client"
        );

        let http = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let inner = ApiClientInner {
            http,
            config,
            credentials,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Gets the injected credential store.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.credentials
    }

    /// Creates a request builder for the given method and relative path,
    /// with the bearer token attached when one is stored.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let base = self.inner.config.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}{path}");

        let mut request = self.inner.http.request(method, url);
        if let Some(token) = self.inner.credentials.get(AUTH_TOKEN_KEY) {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Sends a request and decodes the response through the envelope.
    ///
    /// The envelope is decoded regardless of HTTP status; a non-2xx response
    /// whose body is not a well-formed envelope becomes a transport-class
    /// status error.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<Envelope<T>> {
        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(Error::Http)?;

        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) => {
                tracing::debug!(
                    target: TRACING_TARGET_CLIENT,
                    path,
                    status = status.as_u16(),
                    is_success = envelope.is_success,
                    "Request completed"
                );
                Ok(envelope)
            }
            Err(_) if !status.is_success() => {
                let snippet = String::from_utf8_lossy(&body).chars().take(200).collect::<String>();
                tracing::warn!(
                    target: TRACING_TARGET_CLIENT,
                    path,
                    status = status.as_u16(),
                    "Request failed with undecodable body"
                );
                Err(Error::http_status(status.as_u16(), snippet))
            }
            Err(err) => Err(Error::Serialization(err)),
        }
    }

    /// GET a value-carrying endpoint.
    pub(crate) async fn get_value<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path);
        self.execute::<T>(request, path).await?.into_value()
    }

    /// POST a JSON body to a value-carrying endpoint.
    pub(crate) async fn post_value<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::POST, path).json(body);
        self.execute::<T>(request, path).await?.into_value()
    }

    /// POST a JSON body to a message-only mutation endpoint.
    pub(crate) async fn post_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let request = self.request(Method::POST, path).json(body);
        self.execute::<serde_json::Value>(request, path)
            .await?
            .into_message()
    }

    /// PUT a JSON body to a message-only mutation endpoint.
    pub(crate) async fn put_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let request = self.request(Method::PUT, path).json(body);
        self.execute::<serde_json::Value>(request, path)
            .await?
            .into_message()
    }

    /// DELETE a message-only mutation endpoint.
    pub(crate) async fn delete_message(&self, path: &str) -> Result<String> {
        let request = self.request(Method::DELETE, path);
        self.execute::<serde_json::Value>(request, path)
            .await?
            .into_message()
    }

    /// PATCH a message-only mutation endpoint with query parameters.
    pub(crate) async fn patch_message(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String> {
        let request = self.request(Method::PATCH, path).query(query);
        self.execute::<serde_json::Value>(request, path)
            .await?
            .into_message()
    }

    /// POST a multipart form to a message-only mutation endpoint.
    pub(crate) async fn post_multipart_message(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<String> {
        let request = self.request(Method::POST, path).multipart(form);
        self.execute::<serde_json::Value>(request, path)
            .await?
            .into_message()
    }
}
