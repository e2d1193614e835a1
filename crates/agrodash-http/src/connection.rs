//! HTTP connection management.
//!
//! [`ApiClient`] owns the `reqwest` client, resolves paths against the
//! configured base URL, attaches the bearer token and routes every
//! non-success response through the [`ErrorInterceptor`].

use std::sync::Arc;
use std::time::Duration;

use agrodash_core::error::AgroResult;
use agrodash_core::session::TokenSource;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::HttpError;
use crate::interceptor::{ErrorInterceptor, FailedResponse};

/// Configuration for reaching the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    /// (e.g., `http://localhost:8080/api`).
    pub base_url: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            request_timeout_secs: None,
            user_agent: concat!("agrodash/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Shared handle to the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
    interceptor: ErrorInterceptor,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        tokens: Arc<dyn TokenSource>,
        interceptor: ErrorInterceptor,
    ) -> Result<Self, HttpError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            inner: Arc::new(Inner {
                http: builder.build()?,
                base_url,
                tokens,
                interceptor,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn interceptor(&self) -> &ErrorInterceptor {
        &self.inner.interceptor
    }

    /// Start a request against `path` (relative to the base URL) on behalf
    /// of `resource`.
    pub fn request(&self, method: Method, resource: &'static str, path: String) -> ApiRequest<'_> {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut builder = self.inner.http.request(method.clone(), url);
        if let Some(token) = self.inner.tokens.access_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        ApiRequest {
            client: self,
            builder,
            method,
            resource,
            path,
            id: None,
        }
    }

    pub fn get(&self, resource: &'static str, path: String) -> ApiRequest<'_> {
        self.request(Method::GET, resource, path)
    }

    pub fn post(&self, resource: &'static str, path: String) -> ApiRequest<'_> {
        self.request(Method::POST, resource, path)
    }

    pub fn put(&self, resource: &'static str, path: String) -> ApiRequest<'_> {
        self.request(Method::PUT, resource, path)
    }

    pub fn patch(&self, resource: &'static str, path: String) -> ApiRequest<'_> {
        self.request(Method::PATCH, resource, path)
    }

    pub fn delete(&self, resource: &'static str, path: String) -> ApiRequest<'_> {
        self.request(Method::DELETE, resource, path)
    }
}

/// A request being built; consumed by one of the `fetch_*` methods.
pub struct ApiRequest<'a> {
    client: &'a ApiClient,
    builder: RequestBuilder,
    method: Method,
    resource: &'static str,
    path: String,
    id: Option<i64>,
}

/// Why a request did not yield a successful response.
#[derive(Debug)]
pub enum RequestFailure {
    /// The request never produced a response.
    Network(HttpError),
    /// The backend answered with a non-success status.
    Status(FailedResponse),
}

impl<'a> ApiRequest<'a> {
    /// Tag the request with the entity it targets, for `NotFound` errors.
    pub fn entity(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.builder = self.builder.query(query);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.builder = self.builder.headers(headers);
        self
    }

    /// Plain-text body (sent as-is, without JSON quoting).
    pub fn text_body(mut self, body: String) -> Self {
        self.builder = self
            .builder
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body);
        self
    }

    /// Send the request and return the raw response on success.
    ///
    /// Failures are not yet passed through the error hook; callers that
    /// need the failure body use this and call the hook themselves.
    pub async fn send(self) -> Result<Response, RequestFailure> {
        debug!(method = %self.method, path = %self.path, "sending request");

        let response = self
            .builder
            .send()
            .await
            .map_err(|e| RequestFailure::Network(e.into()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .unwrap_or_default();

        Err(RequestFailure::Status(FailedResponse {
            method: self.method,
            path: self.path,
            resource: self.resource,
            id: self.id,
            status: status.as_u16(),
            body,
        }))
    }

    async fn dispatch(self) -> AgroResult<Response> {
        let client = self.client;
        match self.send().await {
            Ok(response) => Ok(response),
            Err(RequestFailure::Network(e)) => Err(e.into()),
            Err(RequestFailure::Status(failure)) => {
                Err(client.interceptor().intercept(&failure))
            }
        }
    }

    pub async fn fetch_json<T: DeserializeOwned>(self) -> AgroResult<T> {
        let response = self.dispatch().await?;
        let bytes = response.bytes().await.map_err(HttpError::from)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| HttpError::Decode(e.to_string()).into())
    }

    pub async fn fetch_text(self) -> AgroResult<String> {
        let response = self.dispatch().await?;
        Ok(response.text().await.map_err(HttpError::from)?)
    }

    /// Discard the body; any 2xx (including 204) is success.
    pub async fn fetch_empty(self) -> AgroResult<()> {
        let response = self.dispatch().await?;
        if response.status() != StatusCode::NO_CONTENT {
            let _ = response.bytes().await;
        }
        Ok(())
    }
}
