//! reqwest implementation of `HttpTransport`.
//!
//! Joins the base URL with the request path, sends headers and body verbatim,
//! and partitions non-2xx statuses into `RepositoryError` variants.

use crate::domain::RepositoryError;
use crate::ports::{HttpMethod, HttpTransport, TransportRequest, is_dot_segment};
use reqwest::{Client, Method, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport.
    ///
    /// # Arguments
    /// * `base_url` - Backend root (e.g. "http://localhost:8080"); a trailing `/` is ignored
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Network(format!("client build failed: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &TransportRequest) -> Result<Url, RepositoryError> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw).map_err(|e| RepositoryError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if let Some(segment) = request.segments.iter().find(|s| is_dot_segment(s)) {
            return Err(RepositoryError::InvalidUrl(format!(
                "{:?} is not a valid path segment",
                segment
            )));
        }
        if !request.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| RepositoryError::InvalidUrl(format!("{} cannot take path segments", raw)))?
                .extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Map a non-success status to its error kind. `None` for 2xx.
pub fn status_error(status: StatusCode) -> Option<RepositoryError> {
    match status.as_u16() {
        200..=299 => None,
        401 => Some(RepositoryError::Unauthorized),
        403 => Some(RepositoryError::Forbidden),
        404 => Some(RepositoryError::NotFound),
        code @ 500..=599 => Some(RepositoryError::Server(code)),
        code => Some(RepositoryError::Http(code)),
    }
}

fn send_error(e: reqwest::Error) -> RepositoryError {
    if e.is_timeout() {
        RepositoryError::Timeout
    } else if e.is_builder() {
        RepositoryError::InvalidUrl(e.to_string())
    } else {
        RepositoryError::Network(e.to_string())
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: TransportRequest) -> Result<Vec<u8>, RepositoryError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self.client.request(method_of(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "request failed");
            send_error(e)
        })?;

        let status = response.status();
        debug!(method = %request.method, path = %request.path, status = status.as_u16(), "response received");
        if let Some(err) = status_error(status) {
            let text = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "backend returned error"
            );
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(send_error)?;
        Ok(bytes.to_vec())
    }
}
