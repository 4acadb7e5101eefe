//! Shared test helpers for Mikro integration tests
//!
//! Provides wiremock-based mock server setup. The GraphQL endpoint
//! lives at `/graphql`; media downloads resolve relative to it.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gucker_mikro::client::MikroClient;

/// Starts a mock server and returns it with a client pointed at its
/// `/graphql` endpoint.
pub async fn setup_mikro_mock() -> (MockServer, MikroClient) {
    let server = MockServer::start().await;
    let client = MikroClient::new(&format!("{}/graphql", server.uri()), Some("token".into()))
        .expect("mock endpoint URL must parse");
    (server, client)
}

/// Mounts a GraphQL response for requests whose body contains `marker`
/// (typically the operation name).
pub async fn mount_graphql(server: &MockServer, marker: &str, data: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(server)
        .await;
}

/// Mounts a media endpoint serving raw bytes.
pub async fn mount_media(server: &MockServer, media_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(media_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}
