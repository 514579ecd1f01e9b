//! Shared fixtures for the wiremock-backed integration tests.

use lantern::client::TdxClient;
use lantern::config::Config;
use lantern::instance::TdxInstance;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Initializes test logging once. Respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Configuration with both default applications set.
pub fn test_config() -> Config {
    Config {
        domain: "teamdynamix.example.edu".to_string(),
        default_ticket_app: Some("ITS Tickets".to_string()),
        default_asset_app: Some("IT Assets".to_string()),
        ..Config::default()
    }
}

/// Builds an instance aimed at the mock server.
pub fn instance(server: &MockServer, config: Config) -> TdxInstance {
    let client = TdxClient::with_base_url(server.uri()).expect("client should build");
    TdxInstance::with_client(config, client)
}

/// Mounts the application listing: "IT Assets" = 27, "ITS Tickets" = 31.
pub async fn mount_applications(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"AppID": 27, "Name": "IT Assets", "Type": "Assets/CIs"},
            {"AppID": 31, "Name": "ITS Tickets", "Type": "Tickets"}
        ])))
        .mount(server)
        .await;
}
