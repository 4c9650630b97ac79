//! Test utilities shared across crate-level unit tests.

use httpmock::MockServer;

use crate::auth::AuthRequestConfiguration;

/// Start a fresh `httpmock::MockServer` instance for use in unit tests.
pub fn start_mock_server() -> MockServer {
    MockServer::start()
}

/// Configuration whose Identity Toolkit endpoint is `<server>/v1`, keyed with `test-key`.
pub fn test_configuration(server: &MockServer) -> AuthRequestConfiguration {
    AuthRequestConfiguration::new("test-key").with_identity_toolkit_endpoint(server.url("/v1"))
}
