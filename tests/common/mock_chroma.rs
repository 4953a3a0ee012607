//! Mock Chroma SDK server for testing the REST client.

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the SDK server listens on for registration
pub const SDK_PATH: &str = "/razer/chromasdk";

/// Path of the per-session URI handed out on registration
pub const SESSION_PATH: &str = "/session/4242";

/// Wrapper around wiremock MockServer with Chroma-shaped endpoints
pub struct MockChromaServer {
    pub server: MockServer,
}

impl MockChromaServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Registration URL to configure the client with
    pub fn sdk_url(&self) -> String {
        format!("{}{}", self.server.uri(), SDK_PATH)
    }

    pub fn session_uri(&self) -> String {
        format!("{}{}", self.server.uri(), SESSION_PATH)
    }

    /// Accept registration and hand out the session URI
    pub async fn mock_register(&self) {
        Mock::given(method("POST"))
            .and(path(SDK_PATH))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({ "category": "application" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sessionid": 4242,
                "uri": self.session_uri(),
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `PUT <session>/<device>` with `result`, matching on the effect
    pub async fn mock_effect(&self, device: &str, effect: &str, result: i64) {
        Mock::given(method("PUT"))
            .and(path(format!("{SESSION_PATH}/{device}")))
            .and(body_partial_json(json!({ "effect": effect })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
            .mount(&self.server)
            .await;
    }

    /// Answer `DELETE <session>` with `result`
    pub async fn mock_unregister(&self, result: i64) {
        Mock::given(method("DELETE"))
            .and(path(SESSION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
            .mount(&self.server)
            .await;
    }

    /// Answer any request to `endpoint` with a raw status and body
    pub async fn mock_raw(&self, http_method: &str, endpoint: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of all requests received so far, in order
    pub async fn received_json(&self, http_method: &str) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == http_method)
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}
