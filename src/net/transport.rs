//! HTTP seam for the API clients.
//!
//! DESIGN
//! ======
//! Clients talk to a `Transport` that only knows GET and POST-JSON and hands
//! back status + body. The response contract (list vs. create) is enforced
//! here in pure helpers so it can be tested without a network. `HttpTransport`
//! is the `reqwest` implementation; it attaches the session cookie to every
//! request and the CSRF header to mutating ones.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use super::types::{ApiError, CreateOutcome, ValidationErrors};
use crate::config::ClientConfig;

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Decode a list endpoint response. Only 200 is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] for any other status, or
    /// [`ApiError::Parse`] if the body is not a JSON array of `T`.
    pub fn into_list<T: DeserializeOwned>(self, endpoint: &'static str) -> Result<Vec<T>, ApiError> {
        if self.status != 200 {
            return Err(ApiError::UnexpectedStatus { endpoint, status: self.status, body: self.body });
        }
        self.json()
    }

    /// Decode a create endpoint response: 200/201 is success, 400 carries
    /// validation messages, anything else is a hard failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] for statuses outside the contract,
    /// or [`ApiError::Parse`] if a success body is not a `T`.
    pub fn into_create_outcome<T: DeserializeOwned>(
        self,
        endpoint: &'static str,
    ) -> Result<CreateOutcome<T>, ApiError> {
        match self.status {
            200 | 201 => self.json().map(CreateOutcome::Ok),
            400 => Ok(CreateOutcome::Error(ValidationErrors::from_body(&self.body))),
            status => Err(ApiError::UnexpectedStatus { endpoint, status, body: self.body }),
        }
    }
}

/// Minimal async HTTP surface used by the API clients.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, ApiError>;
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    csrf: Option<(HeaderName, HeaderValue)>,
}

impl HttpTransport {
    /// Build a transport from client config.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header is invalid or the HTTP client
    /// fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            headers.insert(COOKIE, header_value(cookie)?);
        }

        let csrf = match &config.csrf_token {
            Some(token) => {
                let name = HeaderName::from_bytes(config.csrf_header.as_bytes())
                    .map_err(|e| ApiError::InvalidHeader(format!("{}: {e}", config.csrf_header)))?;
                Some((name, header_value(token)?))
            }
            None => None,
        };

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, csrf })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, ApiError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(raw).map_err(|e| ApiError::InvalidHeader(e.to_string()))
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, ApiError> {
        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some((name, value)) = &self.csrf {
            request = request.header(name.clone(), value.clone());
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Self::read(response).await
    }
}
