//! Mock caption endpoint.

use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_MODEL: &str = "test-model";
pub const TEST_API_KEY: &str = "test-key";

/// Wrapper around wiremock MockServer speaking the `generateContent` shape
pub struct MockCaptionServer {
    pub server: MockServer,
}

impl MockCaptionServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure the caption client with
    pub fn url(&self) -> String {
        self.server.uri()
    }

    fn endpoint() -> String {
        format!("/models/{TEST_MODEL}:generateContent")
    }

    /// Answer with one candidate whose text parts are `parts`
    pub async fn mock_caption(&self, parts: &[&str]) {
        let parts: Vec<_> = parts.iter().map(|text| json!({ "text": text })).collect();
        Mock::given(method("POST"))
            .and(path(Self::endpoint()))
            .and(header("x-goog-api-key", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": parts } }]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer with a response that has no candidates
    pub async fn mock_empty(&self) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `status`
    pub async fn mock_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint()))
            .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Respond only after `delay`
    pub async fn mock_slow(&self, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint()))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all requests received so far, parsed as JSON
    pub async fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}
