//! # ipr-pinata -- Typed Rust client for the Pinata pinning API
//!
//! Provides content pinning for the IP registration flow:
//!
//! - **pin file** via `POST /pinning/pinFileToIPFS` (multipart)
//! - **pin JSON** via `POST /pinning/pinJSONToIPFS`
//! - **capture remote content**: fetch a URL, digest the raw bytes, pin
//!
//! ## Architecture
//!
//! This crate is the only authorized path to the pinning service. The
//! client is constructed once at startup from [`PinataConfig`] and
//! injected into whatever owns the request flow; there is no hidden
//! process-wide singleton, and tests construct a fresh instance against a
//! mock server.
//!
//! ## Digest Invariant
//!
//! [`PinataClient::pin_json`] accepts [`CanonicalBytes`] and sends those
//! exact bytes as the pinned document, returning their SHA-256 alongside
//! the CID. The digest registered on-chain therefore covers the bytes
//! that were actually pinned. [`PinataClient::upload_content`] digests
//! the downloaded bytes before the pin call, so the content hash is
//! reproducible without trusting the upload result.
//!
//! No operation retries: a transient failure surfaces immediately.

pub mod config;
pub mod error;

pub use config::{ConfigError, PinataConfig};
pub use error::{PinOp, PinataError};

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use ipr_core::{sha256_bytes, sha256_canonical, Bytes32, CanonicalBytes};

/// Content type assumed when the origin response carries none.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Result of capturing remote content: the pin CID, the declared MIME
/// type, and the SHA-256 of the raw downloaded bytes.
#[derive(Debug, Clone)]
pub struct ContentUpload {
    /// Content identifier returned by the pinning service.
    pub ipfs_cid: String,
    /// MIME type declared by the origin (or the octet-stream fallback).
    pub content_type: String,
    /// SHA-256 over the exact downloaded byte sequence, computed locally
    /// before the pin call.
    pub content_hash: Bytes32,
}

/// Result of pinning a canonical JSON document.
#[derive(Debug, Clone)]
pub struct JsonPin {
    /// Content identifier returned by the pinning service.
    pub ipfs_cid: String,
    /// SHA-256 over the exact serialized bytes that were pinned.
    pub digest: Bytes32,
}

/// Pin response as returned by the Pinata API.
///
/// Extra fields the live API returns are ignored; only the CID is load-bearing.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for the Pinata pinning API.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    /// Bearer credential, attached to pin requests only. Origin fetches
    /// go to arbitrary hosts and must never carry it.
    auth: reqwest::header::HeaderValue,
    api_url: Url,
    gateway_url: Url,
}

impl PinataClient {
    /// Create a new client from configuration.
    pub fn new(config: PinataConfig) -> Result<Self, ConfigError> {
        let bearer = format!("Bearer {}", config.jwt.as_str());
        let mut auth = reqwest::header::HeaderValue::from_str(&bearer)
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            auth,
            api_url: config.api_url,
            gateway_url: config.gateway_url,
        })
    }

    /// Build the gateway retrieval URL for a pinned CID.
    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}ipfs/{cid}", self.gateway_url)
    }

    /// Fetch remote content, digest it, and pin it.
    ///
    /// One GET to the origin, one pin call. The content hash is computed
    /// over the raw downloaded bytes before anything is sent to the
    /// pinning service. A non-success origin status fails the whole
    /// capture; nothing is pinned in that case.
    pub async fn upload_content(&self, file_url: &str) -> Result<ContentUpload, PinataError> {
        tracing::debug!(url = file_url, "fetching remote content");

        let resp = self
            .http
            .get(file_url)
            .send()
            .await
            .map_err(|e| PinataError::Fetch {
                url: file_url.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(PinataError::FetchStatus {
                url: file_url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        let bytes = resp.bytes().await.map_err(|e| PinataError::Fetch {
            url: file_url.to_string(),
            source: e,
        })?;

        let content_hash = sha256_bytes(&bytes);

        // Deterministic filename derived from the content itself.
        let filename = content_hash.to_hex();

        tracing::debug!(
            filename = %filename,
            content_type = %content_type,
            size = bytes.len(),
            "pinning content"
        );

        let ipfs_cid = self
            .pin_file(&filename, &content_type, bytes.to_vec())
            .await?;

        tracing::info!(ipfs_cid = %ipfs_cid, "content pinned");

        Ok(ContentUpload {
            ipfs_cid,
            content_type,
            content_hash,
        })
    }

    /// Pin raw bytes as a file.
    ///
    /// Calls `POST {api_url}/pinning/pinFileToIPFS` with a multipart body.
    pub async fn pin_file(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, PinataError> {
        let url = format!("{}pinning/pinFileToIPFS", self.api_url);

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| PinataError::Transport {
                op: PinOp::File,
                source: e,
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinataError::Transport {
                op: PinOp::File,
                source: e,
            })?;

        self.read_pin_response(PinOp::File, resp).await
    }

    /// Pin a canonical JSON document.
    ///
    /// Calls `POST {api_url}/pinning/pinJSONToIPFS`. The request body is
    /// assembled by splicing the canonical bytes verbatim into the
    /// `pinataContent` wrapper, never by re-serializing the document, so
    /// the pinned bytes and the returned digest cover the same value.
    pub async fn pin_json(&self, document: &CanonicalBytes) -> Result<JsonPin, PinataError> {
        let url = format!("{}pinning/pinJSONToIPFS", self.api_url);

        // CanonicalBytes is UTF-8 JSON by construction.
        let content = String::from_utf8_lossy(document.as_bytes());
        let body = format!("{{\"pinataContent\":{content}}}");

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PinataError::Transport {
                op: PinOp::Json,
                source: e,
            })?;

        let ipfs_cid = self.read_pin_response(PinOp::Json, resp).await?;

        tracing::info!(ipfs_cid = %ipfs_cid, "metadata document pinned");

        Ok(JsonPin {
            ipfs_cid,
            digest: sha256_canonical(document),
        })
    }

    async fn read_pin_response(
        &self,
        op: PinOp,
        resp: reqwest::Response,
    ) -> Result<String, PinataError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PinataError::Gateway { op, status, body });
        }

        let pin: PinResponse = resp
            .json()
            .await
            .map_err(|e| PinataError::Deserialization { op, source: e })?;
        Ok(pin.ipfs_hash)
    }
}
