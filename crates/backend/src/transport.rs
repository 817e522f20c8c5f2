//! Request execution.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};

use crate::config::{BackendConfig, DEFAULT_TIMEOUT};
use crate::error::{Result, TransportError};
use crate::request::BackendRequest;

/// Executes backend requests.
///
/// Implementations hold only immutable configuration, so one instance can
/// serve any number of concurrent calls.
pub trait Transport: Send + Sync {
    /// Perform the request and return the decoded response body.
    fn send(&self, request: BackendRequest) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: BackendRequest) -> impl Future<Output = Result<Value>> + Send {
        (**self).send(request)
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl HttpTransportBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let base_url = Url::parse(self.base_url.trim())
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| TransportError::Client(format!("header name {name}: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| TransportError::Client(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(HttpTransport {
            client,
            base_url,
            timeout: self.timeout,
        })
    }
}

/// Transport over HTTP(S) to one base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::builder(&config.base_url)
            .timeout(config.timeout)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a request's path and query against the base URL.
    ///
    /// A base URL with a path prefix (`https://host/prefix`) keeps it.
    pub fn url_for(&self, request: &BackendRequest) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        let path = request.path.trim_start_matches('/');
        url.set_path(&format!("{prefix}/{path}"));
        url.set_query(None);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        url
    }

    /// Perform the request and return the raw success body.
    ///
    /// Used for endpoints that answer with audio rather than JSON.
    pub async fn send_bytes(&self, request: BackendRequest) -> Result<Vec<u8>> {
        let response = self.execute(&request).await?;
        let response = check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse(error_chain(&e)))?;
        Ok(bytes.to_vec())
    }

    async fn execute(&self, request: &BackendRequest) -> Result<reqwest::Response> {
        let url = self.url_for(request);
        let started = Instant::now();

        let mut builder = self.client.request(request.method.into(), url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Network(error_chain(&e))
            }
        })?;

        tracing::debug!(
            method = %request.method,
            %url,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );
        Ok(response)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: BackendRequest) -> Result<Value> {
        let response = self.execute(&request).await?;
        let response = check_status(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::InvalidResponse(error_chain(&e))
            }
        })?;

        decode_body(content_type.as_deref(), &bytes)
    }
}

/// Turn a non-success response into [`TransportError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(
                status = status.as_u16(),
                error = %error_chain(&e),
                "error body unreadable"
            );
            String::new()
        }
    };
    let body = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    };

    Err(TransportError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body,
    })
}

/// Decode a success body according to its content type.
fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Value> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }

    match content_type {
        Some(ct) if ct.contains("json") => serde_json::from_slice(bytes)
            .map_err(|e| TransportError::InvalidResponse(format!("malformed JSON body: {e}"))),
        Some(ct) if ct.starts_with("text/") => {
            Ok(Value::String(String::from_utf8_lossy(bytes).into_owned()))
        }
        // Untyped bodies: JSON if it parses, text otherwise.
        None => Ok(serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))),
        Some(ct) => Ok(json!({
            "content_type": ct,
            "size_bytes": bytes.len(),
            "data_base64": STANDARD.encode(bytes),
        })),
    }
}

/// Render an error with its source chain; reqwest hides the useful part
/// ("connection refused") in the sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
