//! Canned-response HTTP transport for store tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// One request seen by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

impl MockResponse {
    fn into_result(self) -> Result<Response, HttpError> {
        match self {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    /// URL prefixes and their answers; the longest matching prefix wins.
    routes: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    log: Vec<RecordedRequest>,
}

impl MockState {
    fn answer(&self, url: &str) -> Result<Response, HttpError> {
        self.routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| HttpError::Other(format!("no canned response for {}", url)))?
            .into_result()
    }
}

/// Transport that records every request and answers from a route table.
///
/// Clones share the table and the log, so a test can keep one handle after
/// moving another into the store.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL starts with `url`. Re-registering a prefix
    /// replaces its answer.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state.routes.retain(|(prefix, _)| prefix != url);
        state.routes.push((url.to_string(), response));
    }

    pub fn set_default_response(&self, response: MockResponse) {
        self.state.lock().unwrap().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().log.clone()
    }

    fn handle(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        let mut state = self.state.lock().unwrap();
        state.log.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
        state.answer(url)
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("GET", url, headers, None)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("POST", url, headers, Some(body))
    }
}
