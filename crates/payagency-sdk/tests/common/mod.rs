/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for payagency-sdk tests

use payagency_sdk::{ApiClient, ClientConfig, PayAgency};
use wiremock::MockServer;

pub const ENCRYPTION_KEY: &str = "k";
pub const TEST_SECRET_KEY: &str = "PA_TEST_x";
#[allow(dead_code)]
pub const LIVE_SECRET_KEY: &str = "PA_LIVE_x";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// SDK instance pointed at the mock server
pub fn sdk_for(server: &MockServer, secret_key: &str) -> PayAgency {
    let client = ApiClient::with_config_and_base_url(
        ClientConfig::new(ENCRYPTION_KEY, secret_key),
        &server.uri(),
    )
    .expect("client init");
    PayAgency::from_client(client)
}

/// JSON body of the most recent request the mock server received
pub async fn last_request_body(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.expect("request recording enabled");
    let request = requests.last().expect("at least one request");
    serde_json::from_slice(&request.body).expect("json body")
}
