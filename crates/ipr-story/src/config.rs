//! Story Protocol client configuration.
//!
//! All values load from the environment at process startup. A missing or
//! malformed required value fails client construction, never a request.

use url::Url;
use zeroize::Zeroizing;

use ipr_core::digest::decode_hex_fixed;
use ipr_core::{EvmAddress, HexParseError};

/// Default RPC gateway for the Aeneid testnet.
const DEFAULT_RPC_URL: &str = "https://aeneid.storyrpc.io";

/// Public testnet SPG collection contract.
const DEFAULT_SPG_NFT_CONTRACT: &str = "0xc32A8a0FF3beDDDa58393d022aF433e78739FAbc";

/// Transaction explorer base, joined with a transaction hash.
const DEFAULT_TX_EXPLORER_URL: &str = "https://aeneid.storyscan.io/tx/";

/// IP asset explorer base, joined with an asset identifier.
const DEFAULT_IPA_EXPLORER_URL: &str = "https://aeneid.explorer.story.foundation/ipa/";

/// Configuration for the Story Protocol registration gateway.
///
/// Custom `Debug` implementation redacts the wallet key.
#[derive(Clone)]
pub struct StoryConfig {
    /// Wallet private key used as the submission credential. Must decode
    /// to exactly 32 bytes.
    pub private_key: Zeroizing<[u8; 32]>,
    /// Base URL of the registration gateway / RPC provider.
    pub rpc_url: Url,
    /// Chain identifier sent with every submission.
    pub chain: String,
    /// SPG collection contract new tokens are minted into.
    pub spg_nft_contract: EvmAddress,
    /// Explorer base URL for transactions.
    pub tx_explorer_url: String,
    /// Explorer base URL for IP assets.
    pub ipa_explorer_url: String,
    /// Request timeout in seconds. Submissions block until the
    /// transaction confirms, so this is deliberately generous.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for StoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryConfig")
            .field("private_key", &"[REDACTED]")
            .field("rpc_url", &self.rpc_url)
            .field("chain", &self.chain)
            .field("spg_nft_contract", &self.spg_nft_contract)
            .field("tx_explorer_url", &self.tx_explorer_url)
            .field("ipa_explorer_url", &self.ipa_explorer_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `WALLET_PRIVATE_KEY` (required; optional `0x` prefix + 64 hex digits)
    /// - `RPC_PROVIDER_URL` (default: `https://aeneid.storyrpc.io`)
    /// - `STORY_CHAIN` (default: `aeneid`)
    /// - `SPG_NFT_CONTRACT_ADDRESS` (default: public testnet collection)
    /// - `STORY_TX_EXPLORER_URL` (default: `https://aeneid.storyscan.io/tx/`)
    /// - `STORY_IPA_EXPLORER_URL` (default: `https://aeneid.explorer.story.foundation/ipa/`)
    /// - `STORY_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_key =
            std::env::var("WALLET_PRIVATE_KEY").map_err(|_| ConfigError::MissingPrivateKey)?;
        let private_key = parse_private_key(&raw_key)?;

        let spg_raw = std::env::var("SPG_NFT_CONTRACT_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_SPG_NFT_CONTRACT.to_string());
        let spg_nft_contract =
            EvmAddress::parse(&spg_raw).map_err(ConfigError::InvalidContractAddress)?;

        Ok(Self {
            private_key,
            rpc_url: env_url("RPC_PROVIDER_URL", DEFAULT_RPC_URL)?,
            chain: std::env::var("STORY_CHAIN").unwrap_or_else(|_| "aeneid".to_string()),
            spg_nft_contract,
            tx_explorer_url: std::env::var("STORY_TX_EXPLORER_URL")
                .unwrap_or_else(|_| DEFAULT_TX_EXPLORER_URL.to_string()),
            ipa_explorer_url: std::env::var("STORY_IPA_EXPLORER_URL")
                .unwrap_or_else(|_| DEFAULT_IPA_EXPLORER_URL.to_string()),
            timeout_secs: std::env::var("STORY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        })
    }

    /// Configuration pointing at a local mock gateway (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL cannot be parsed.
    pub fn local(base: &str) -> Result<Self, ConfigError> {
        let rpc_url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl("local".to_string(), e.to_string()))?;
        let spg_nft_contract = EvmAddress::parse(DEFAULT_SPG_NFT_CONTRACT)
            .map_err(ConfigError::InvalidContractAddress)?;
        Ok(Self {
            private_key: Zeroizing::new([0x11; 32]),
            rpc_url,
            chain: "aeneid".to_string(),
            spg_nft_contract,
            tx_explorer_url: DEFAULT_TX_EXPLORER_URL.to_string(),
            ipa_explorer_url: DEFAULT_IPA_EXPLORER_URL.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Parse a wallet private key: optional `0x` prefix + exactly 64 hex digits.
fn parse_private_key(raw: &str) -> Result<Zeroizing<[u8; 32]>, ConfigError> {
    let payload = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = decode_hex_fixed::<32>(payload).map_err(ConfigError::InvalidPrivateKey)?;
    Ok(Zeroizing::new(bytes))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors. Surface at process startup, never at request time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WALLET_PRIVATE_KEY environment variable is required")]
    MissingPrivateKey,
    #[error("WALLET_PRIVATE_KEY must decode to exactly 32 bytes: {0}")]
    InvalidPrivateKey(#[source] HexParseError),
    #[error("invalid SPG NFT contract address: {0}")]
    InvalidContractAddress(#[source] HexParseError),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_parses_with_prefix() {
        let key = parse_private_key(&format!("0x{}", "ab".repeat(32))).unwrap();
        assert_eq!(key[0], 0xab);
    }

    #[test]
    fn private_key_parses_without_prefix() {
        let key = parse_private_key(&"cd".repeat(32)).unwrap();
        assert_eq!(key[31], 0xcd);
    }

    #[test]
    fn private_key_rejects_wrong_length() {
        assert!(matches!(
            parse_private_key(&"a".repeat(63)),
            Err(ConfigError::InvalidPrivateKey(_))
        ));
        assert!(parse_private_key(&"a".repeat(65)).is_err());
    }

    #[test]
    fn private_key_rejects_non_hex() {
        assert!(parse_private_key(&format!("{}zz", "a".repeat(62))).is_err());
    }

    #[test]
    fn local_config_builds() {
        let cfg = StoryConfig::local("http://127.0.0.1:19300").unwrap();
        assert_eq!(cfg.chain, "aeneid");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn debug_redacts_private_key() {
        let cfg = StoryConfig::local("http://127.0.0.1:19300").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("1111"));
    }
}
