//! Scripted transport shared by client and bootstrap tests.

use std::sync::Mutex;

use super::transport::{HttpResponse, Transport};
use super::types::ApiError;

/// One request seen by [`MockTransport`].
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    Get(String),
    Post(String, serde_json::Value),
}

/// Replays queued responses in order and records every request.
pub struct MockTransport {
    responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
        Self { responses: Mutex::new(responses), requests: Mutex::new(Vec::new()) }
    }

    pub fn replying(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(status, body))])
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self) -> Result<HttpResponse, ApiError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(ApiError::Request("no scripted response".into()))
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(Recorded::Get(url.to_owned()));
        self.next()
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(Recorded::Post(url.to_owned(), body.clone()));
        self.next()
    }
}
