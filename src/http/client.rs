//! Authenticated HTTP client for the IDR service
//!
//! Provides a thin transport that handles:
//! - Joining request paths onto the configured base URL
//! - Authentication headers and the fixed request timeout
//! - Converting error statuses into [`Error::Idr`] (or passing them through)

use crate::auth::Credentials;
use crate::config::{ClientConfig, ErrorPolicy, REQUEST_TIMEOUT};
use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request config carrying the given query parameters
    pub fn with_query(query: HashMap<String, String>) -> Self {
        Self { query, body: None }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client bound to one IDR deployment and one set of credentials
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    error_policy: ErrorPolicy,
}

impl HttpClient {
    /// Create a new HTTP client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "IDR URL cannot be used as a base: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("cvelib/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials: Credentials::from_config(config),
            error_policy: config.error_policy(),
        })
    }

    /// Base URL every path is joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials attached to each request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, path, config).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::POST, path, config).await
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json(&self, path: &str, config: RequestConfig) -> Result<Value> {
        let response = self.get(path, config).await?;
        read_json(response).await
    }

    /// Make exactly one authenticated request
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let url = self.build_url(path)?;
        self.request_url(method, url, config).await
    }

    /// Make exactly one authenticated request to an already-built URL
    pub async fn request_url(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<Response> {
        if url.origin() != self.base_url.origin() {
            return Err(Error::PathOutsideBase {
                path: url.to_string(),
            });
        }

        let mut req = self.client.request(method.clone(), url.clone());
        req = self.credentials.apply(req);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        debug!("{} {}", method, url);
        let response = req.send().await.map_err(|e| Error::idr(e.to_string()))?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status.as_u16());

        if self.error_policy == ErrorPolicy::Passthrough || !is_error_status(status) {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = read_body(response).await?;

        Err(Error::idr(format!(
            "{}; returned error: {}",
            status_line(status, &url),
            render_error_body(&body)
        )))
    }

    /// Join a path onto the base URL, refusing joins that leave its origin
    pub fn build_url(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        if url.origin() != self.base_url.origin() {
            return Err(Error::PathOutsideBase {
                path: path.to_string(),
            });
        }
        Ok(url)
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub fn build_segment_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::config(format!(
                    "IDR URL cannot be used as a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("error_policy", &self.error_policy)
            .finish_non_exhaustive()
    }
}

/// Read a response body as JSON
pub async fn read_json(response: Response) -> Result<Value> {
    let body = read_body(response).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Read a whole response body; a dropped or truncated body is an IDR error
async fn read_body(response: Response) -> Result<Bytes> {
    response.bytes().await.map_err(|e| Error::idr(e.to_string()))
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// Describe an error status the way the IDR CLI reports it
fn status_line(status: StatusCode, url: &Url) -> String {
    let kind = if status.is_client_error() {
        "Client"
    } else {
        "Server"
    };
    format!(
        "{} {kind} Error: {} for url: {url}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

/// JSON-decoded body if possible, otherwise the raw bytes as text
pub(crate) fn render_error_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
