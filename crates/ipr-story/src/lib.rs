//! # ipr-story -- Typed Rust client for the Story Protocol gateway
//!
//! The blockchain side of the registration flow, consumed as a black
//! box: metadata document construction plus three gateway operations.
//!
//! - **mint-and-register**: mint a new token into the configured SPG
//!   collection and register it as an IP asset in one transaction.
//! - **register-existing**: attach registration data to an NFT that
//!   already exists on-chain.
//! - **asset-detail**: look up a registered asset and enrich it with its
//!   pinned metadata documents.
//!
//! ## Architecture
//!
//! This crate is the only authorized path to the registration gateway.
//! The client is constructed once at startup; a missing or malformed
//! wallet key fails construction, never a request. Submissions block
//! until the transaction confirms and are never retried here: a
//! transient gateway failure surfaces immediately as a terminal error
//! for the request.

pub mod config;
pub mod error;
pub mod metadata;

pub use config::{ConfigError, StoryConfig};
pub use error::{StoryError, StoryOp};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use ipr_core::{Bytes32, EvmAddress, IpAssetId};

/// Metadata references submitted with every registration: the pinned
/// document URIs and the digests of their exact pinned bytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationMetadata {
    #[serde(rename = "ipMetadataURI")]
    pub ip_metadata_uri: String,
    pub ip_metadata_hash: Bytes32,
    #[serde(rename = "nftMetadataURI")]
    pub nft_metadata_uri: String,
    pub nft_metadata_hash: Bytes32,
}

/// A confirmed registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Asset identifier assigned by the protocol.
    pub ip_id: String,
    /// Hash of the confirmed transaction.
    pub tx_hash: Bytes32,
    /// Explorer URL for the caller to inspect the result.
    pub view_url: String,
}

/// Registered asset detail, enriched with pinned metadata where
/// retrievable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAssetDetail {
    pub ip_id: String,
    pub owner: String,
    pub status: String,
    pub registration_date: Option<String>,
    pub nft_contract: String,
    pub token_id: String,
    #[serde(rename = "ipMetadataURI")]
    pub ip_metadata_uri: String,
    #[serde(rename = "nftMetadataURI")]
    pub nft_metadata_uri: String,
    pub ip_metadata: Option<serde_json::Value>,
    pub nft_metadata: Option<serde_json::Value>,
    pub media_url: Option<String>,
    pub title: String,
    pub description: String,
    pub creator: String,
    pub view_url: String,
}

// -- Wire types matching the gateway schemas ----------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MintAndRegisterRequest<'a> {
    chain: &'a str,
    spg_nft_contract: EvmAddress,
    ip_metadata: &'a RegistrationMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterExistingRequest<'a> {
    chain: &'a str,
    nft_contract: EvmAddress,
    token_id: &'a str,
    ip_metadata: &'a RegistrationMetadata,
}

/// Registration response. Both fields are nominally required; the
/// gateway has returned success bodies without them, hence `Option`
/// plus explicit validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    #[serde(default)]
    ip_id: Option<String>,
    #[serde(default)]
    tx_hash: Option<String>,
}

/// Asset record as returned by the gateway. Fields use `serde(default)`
/// for resilience against schema evolution in the live API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetRecord {
    #[serde(default)]
    ip_id: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    status: Option<String>,
    /// Registration time as epoch seconds.
    #[serde(default)]
    registered_at: Option<String>,
    #[serde(default)]
    token_contract: Option<String>,
    #[serde(default)]
    token_id: Option<String>,
    #[serde(default, rename = "ipMetadataURI")]
    ip_metadata_uri: Option<String>,
    #[serde(default, rename = "nftMetadataURI")]
    nft_metadata_uri: Option<String>,
}

// -- Client -------------------------------------------------------------------

/// Client for the Story Protocol registration gateway.
#[derive(Debug, Clone)]
pub struct StoryClient {
    http: reqwest::Client,
    /// Wallet credential, attached to gateway requests only. Pinned
    /// metadata documents live on arbitrary hosts and their fetches
    /// must never carry it.
    auth: reqwest::header::HeaderValue,
    rpc_url: Url,
    chain: String,
    spg_nft_contract: EvmAddress,
    tx_explorer_url: String,
    ipa_explorer_url: String,
}

impl StoryClient {
    /// Create a new client from configuration.
    ///
    /// The gateway holds the signing wallet; the configured private key
    /// authenticates this service to it. Key custody beyond that is the
    /// gateway's concern.
    pub fn new(config: StoryConfig) -> Result<Self, StoryError> {
        let key_hex: String = config
            .private_key
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        let bearer = zeroize::Zeroizing::new(format!("Bearer 0x{key_hex}"));

        let mut auth = reqwest::header::HeaderValue::from_str(&bearer)
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        tracing::info!(rpc_url = %config.rpc_url, chain = %config.chain, "story client initialized");

        Ok(Self {
            http,
            auth,
            rpc_url: config.rpc_url,
            chain: config.chain,
            spg_nft_contract: config.spg_nft_contract,
            tx_explorer_url: config.tx_explorer_url,
            ipa_explorer_url: config.ipa_explorer_url,
        })
    }

    /// Mint a new token into the configured collection and register it
    /// as an IP asset. Blocks until the transaction confirms.
    ///
    /// Calls `POST {rpc_url}/ip-assets/mint-and-register`.
    pub async fn mint_and_register(
        &self,
        metadata: &RegistrationMetadata,
    ) -> Result<Registration, StoryError> {
        let op = StoryOp::MintAndRegister;
        let url = format!("{}ip-assets/mint-and-register", self.rpc_url);

        tracing::info!(spg_nft_contract = %self.spg_nft_contract, "submitting mint-and-register");

        let req = MintAndRegisterRequest {
            chain: &self.chain,
            spg_nft_contract: self.spg_nft_contract,
            ip_metadata: metadata,
        };

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth.clone())
            .json(&req)
            .send()
            .await
            .map_err(|e| StoryError::Transport { op, source: e })?;

        let (ip_id, tx_hash) = self.read_register_response(op, resp).await?;
        let view_url = format!("{}{}", self.tx_explorer_url, tx_hash.to_hex_prefixed());

        tracing::info!(ip_id = %ip_id, tx_hash = %tx_hash, "mint-and-register confirmed");

        Ok(Registration {
            ip_id,
            tx_hash,
            view_url,
        })
    }

    /// Attach registration data to an existing NFT. Blocks until the
    /// transaction confirms.
    ///
    /// Calls `POST {rpc_url}/ip-assets/register`.
    pub async fn register_existing(
        &self,
        nft_contract: EvmAddress,
        token_id: &str,
        metadata: &RegistrationMetadata,
    ) -> Result<Registration, StoryError> {
        let op = StoryOp::RegisterExisting;
        let url = format!("{}ip-assets/register", self.rpc_url);

        tracing::info!(%nft_contract, token_id, "submitting register-existing");

        let req = RegisterExistingRequest {
            chain: &self.chain,
            nft_contract,
            token_id,
            ip_metadata: metadata,
        };

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth.clone())
            .json(&req)
            .send()
            .await
            .map_err(|e| StoryError::Transport { op, source: e })?;

        let (ip_id, tx_hash) = self.read_register_response(op, resp).await?;
        let view_url = format!("{}{}", self.ipa_explorer_url, ip_id);

        tracing::info!(ip_id = %ip_id, tx_hash = %tx_hash, "register-existing confirmed");

        Ok(Registration {
            ip_id,
            tx_hash,
            view_url,
        })
    }

    /// Look up a registered asset and enrich it with its pinned metadata
    /// documents. Metadata retrieval is best-effort: a failed document
    /// fetch degrades the detail, it never fails the lookup.
    ///
    /// Calls `GET {rpc_url}/ip-assets/{id}`.
    pub async fn asset_detail(&self, ip_id: &IpAssetId) -> Result<IpAssetDetail, StoryError> {
        let op = StoryOp::Detail;
        let url = format!("{}ip-assets/{}", self.rpc_url, ip_id.address_part());

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth.clone())
            .send()
            .await
            .map_err(|e| StoryError::Transport { op, source: e })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoryError::AssetNotFound {
                ip_id: ip_id.as_str().to_string(),
            });
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoryError::Gateway { op, status, body });
        }

        let record: AssetRecord = resp
            .json()
            .await
            .map_err(|e| StoryError::Deserialization { op, source: e })?;

        let ip_metadata_uri = record.ip_metadata_uri.unwrap_or_default();
        let nft_metadata_uri = record.nft_metadata_uri.unwrap_or_default();

        let ip_metadata = self.fetch_document(&ip_metadata_uri).await;
        let nft_metadata = self.fetch_document(&nft_metadata_uri).await;

        let ip_obj = ip_metadata.clone().unwrap_or_default();
        let nft_obj = nft_metadata.clone().unwrap_or_default();

        let registration_date = record
            .registered_at
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.to_rfc3339());

        let title = first_string(&[&ip_obj["title"], &nft_obj["name"]])
            .unwrap_or_else(|| "Untitled".to_string());
        let description =
            first_string(&[&ip_obj["description"], &nft_obj["description"]]).unwrap_or_default();
        let creator = ip_obj["creators"][0]["name"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown Creator".to_string());
        let media_url = first_string(&[&ip_obj["mediaUrl"], &ip_obj["image"], &nft_obj["image"]]);

        Ok(IpAssetDetail {
            ip_id: record.ip_id.unwrap_or_else(|| ip_id.as_str().to_string()),
            owner: record.owner.unwrap_or_default(),
            status: record.status.unwrap_or_else(|| "UNKNOWN".to_string()),
            registration_date,
            nft_contract: record.token_contract.unwrap_or_default(),
            token_id: record.token_id.unwrap_or_else(|| "0".to_string()),
            ip_metadata_uri,
            nft_metadata_uri,
            ip_metadata,
            nft_metadata,
            media_url,
            title,
            description,
            creator,
            view_url: format!("{}{}", self.ipa_explorer_url, ip_id.as_str()),
        })
    }

    /// Fetch a pinned metadata document. Returns `None` on any failure.
    async fn fetch_document(&self, uri: &str) -> Option<serde_json::Value> {
        if !uri.starts_with("http://") && !uri.starts_with("https://") {
            return None;
        }
        match self.http.get(uri).send().await {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(uri, error = %e, "pinned metadata document is not JSON");
                    None
                }
            },
            Ok(resp) => {
                tracing::warn!(uri, status = %resp.status(), "pinned metadata fetch failed");
                None
            }
            Err(e) => {
                tracing::warn!(uri, error = %e, "pinned metadata fetch failed");
                None
            }
        }
    }

    /// Validate a registration response: success status, then both the
    /// asset identifier and the transaction hash present and well-formed.
    /// A success body missing either is never surfaced as a partial
    /// result.
    async fn read_register_response(
        &self,
        op: StoryOp,
        resp: reqwest::Response,
    ) -> Result<(String, Bytes32), StoryError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoryError::Gateway { op, status, body });
        }

        let body: RegisterResponse = resp
            .json()
            .await
            .map_err(|e| StoryError::Deserialization { op, source: e })?;

        let ip_id = body
            .ip_id
            .filter(|s| !s.is_empty())
            .ok_or(StoryError::InvalidRegistrationResponse { op })?;
        let tx_hash = body
            .tx_hash
            .as_deref()
            .and_then(|s| Bytes32::parse(s).ok())
            .ok_or(StoryError::InvalidRegistrationResponse { op })?;

        Ok((ip_id, tx_hash))
    }
}

fn first_string(candidates: &[&serde_json::Value]) -> Option<String> {
    candidates
        .iter()
        .find_map(|v| v.as_str())
        .map(str::to_string)
}
