use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1/";

/// The API version this library's resource definitions are written against.
pub const API_VERSION: &str = "2019-12-03";

pub const DEFAULT_MAX_NETWORK_RETRIES: usize = 2;

const ENV_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
const ENV_API_BASE: &str = "STRIPE_API_BASE";
const ENV_MAX_NETWORK_RETRIES: &str = "STRIPE_MAX_NETWORK_RETRIES";

/// A Stripe secret or restricted API key. Redacted from `Debug` output.
#[derive(Clone)]
pub struct SecretKey(String);

impl SecretKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep the mode prefix (`sk_test_`, `rk_live_`, ...) for debugging.
        let prefix = self
            .0
            .match_indices('_')
            .nth(1)
            .map_or("", |(i, _)| &self.0[..=i]);
        write!(f, "SecretKey({prefix}[redacted])")
    }
}

/// Request-independent client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub secret_key: SecretKey,
    pub api_base: Url,
    pub api_version: String,
    /// How many times a retryable failure is retried before giving up.
    pub max_network_retries: usize,
    /// Default `Stripe-Account` header; parameters can override it per request.
    pub stripe_account: Option<String>,
}

impl Config {
    /// # Panics
    /// Never: the default API base is a valid URL.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(secret_key: SecretKey) -> Self {
        Self {
            secret_key,
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            api_version: API_VERSION.to_string(),
            max_network_retries: DEFAULT_MAX_NETWORK_RETRIES,
            stripe_account: None,
        }
    }

    /// Reads `STRIPE_SECRET_KEY`, and optionally `STRIPE_API_BASE` and
    /// `STRIPE_MAX_NETWORK_RETRIES`, from the environment.
    pub fn from_env() -> Result<Self> {
        let secret_key =
            std::env::var(ENV_SECRET_KEY).map_err(|_| Error::MissingConfig(ENV_SECRET_KEY))?;
        let mut config = Self::new(SecretKey::new(secret_key));
        if let Ok(api_base) = std::env::var(ENV_API_BASE) {
            config = config.with_api_base(&api_base)?;
        }
        if let Ok(retries) = std::env::var(ENV_MAX_NETWORK_RETRIES) {
            config.max_network_retries = retries
                .parse()
                .map_err(|_| Error::MissingConfig(ENV_MAX_NETWORK_RETRIES))?;
        }
        Ok(config)
    }

    /// Point the client at a different API base, e.g. a local mock server.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self> {
        let mut url = Url::parse(api_base).map_err(|_| Error::InvalidEndpoint)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidEndpoint);
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.api_base = url;
        Ok(self)
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    #[must_use]
    pub fn with_max_network_retries(mut self, retries: usize) -> Self {
        self.max_network_retries = retries;
        self
    }

    #[must_use]
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let key = SecretKey::new("sk_test_abcdef123");
        let debug = format!("{key:?}");
        assert_eq!(debug, "SecretKey(sk_test_[redacted])");
        assert!(!debug.contains("abcdef"));
    }

    #[test]
    fn api_base_gets_trailing_slash() {
        let config = Config::new(SecretKey::new("sk_test_1"))
            .with_api_base("http://localhost:12111/v1")
            .unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:12111/v1/");
    }

    #[test]
    fn rejects_non_base_urls() {
        let result = Config::new(SecretKey::new("sk_test_1")).with_api_base("mailto:ops@example.com");
        assert!(matches!(result, Err(Error::InvalidEndpoint)));
    }
}
