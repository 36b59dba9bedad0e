//! Pinata client configuration.
//!
//! Base URLs default to the public Pinata API and the public IPFS
//! gateway. Override via environment variables, or construct explicitly
//! for staging and tests.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for connecting to the Pinata pinning service.
///
/// Custom `Debug` implementation redacts the JWT to prevent credential
/// leakage in log output.
#[derive(Clone)]
pub struct PinataConfig {
    /// Base URL of the Pinata pinning API.
    /// Default: <https://api.pinata.cloud>
    pub api_url: Url,
    /// Base URL of the IPFS gateway used to build retrieval URLs for
    /// pinned content. Default: <https://ipfs.io>
    pub gateway_url: Url,
    /// Pinata JWT bearer token.
    pub jwt: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PinataConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PINATA_JWT` (required)
    /// - `PINATA_API_URL` (default: `https://api.pinata.cloud`)
    /// - `IPFS_GATEWAY_URL` (default: `https://ipfs.io`)
    /// - `PINATA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt = std::env::var("PINATA_JWT").map_err(|_| ConfigError::MissingJwt)?;

        Ok(Self {
            api_url: env_url("PINATA_API_URL", "https://api.pinata.cloud")?,
            gateway_url: env_url("IPFS_GATEWAY_URL", "https://ipfs.io")?,
            jwt: Zeroizing::new(jwt),
            timeout_secs: std::env::var("PINATA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL cannot be parsed
    /// (should not occur for valid addresses, but avoids `expect()`).
    pub fn local(base: &str, token: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl("local".to_string(), e.to_string()))?;
        Ok(Self {
            api_url: url.clone(),
            gateway_url: url,
            jwt: Zeroizing::new(token.to_string()),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors. Surface at process startup, never at request time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PINATA_JWT environment variable is required")]
    MissingJwt,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
