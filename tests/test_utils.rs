use tracing::info;

use std::sync::Once;

use stripe_rs::{Client, Config, SecretKey};

static LOGGING_CONFIGURED: Once = Once::new();

/// Setup before test runs
pub fn do_setup() {
    LOGGING_CONFIGURED.call_once(|| tracing_subscriber::fmt().with_test_writer().init());
    info!("Setting up test environment");
}

/// A client for live tests against a test-mode account, or `None` when
/// `STRIPE_SECRET_KEY` is not set.
#[allow(dead_code)]
pub fn try_setup_client() -> Option<Client> {
    let Ok(key) = std::env::var("STRIPE_SECRET_KEY") else {
        info!("STRIPE_SECRET_KEY not set, skipping live test");
        return None;
    };
    assert!(
        key.starts_with("sk_test_") || key.starts_with("rk_test_"),
        "refusing to run live tests with a live-mode key"
    );

    let mut config = Config::new(SecretKey::new(key));
    if let Ok(api_base) = std::env::var("STRIPE_API_BASE") {
        config = config.with_api_base(&api_base).unwrap();
    }
    Some(Client::new(config).unwrap())
}

/// Serializes a JSON fixture to response bytes.
#[allow(dead_code)]
pub fn fixture(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}
