//! # IP Asset Routes
//!
//! The registration API surface:
//!
//! - `POST /api/v1/ip/register` — register a new IP asset from a file URL
//! - `POST /api/v1/ip/register-existing-nft` — attach registration data
//!   to an NFT that already exists on-chain
//! - `GET /api/v1/ip/:ipId` — registered asset detail
//!
//! Request DTOs validate in a fixed order and stop at the first failing
//! rule: required-field presence and lengths, then URL syntax, then the
//! contribution-sum invariant, then per-creator format checks.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use url::Url;

use ipr_core::{Bytes32, EvmAddress, IpAssetId};
use ipr_story::IpAssetDetail;

use crate::error::ApiError;
use crate::extractors::{extract_validated_json, Validate};
use crate::orchestration;
use crate::state::AppState;

// ── Request DTOs ────────────────────────────────────────────────────

/// Request to register a new IP asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIpRequest {
    /// Asset title, 1–100 characters.
    pub title: String,
    /// Asset description, 3–1000 characters.
    pub description: String,
    /// Absolute URL of the content to register.
    pub file_url: String,
    /// Ordered creator list. Contribution percentages sum to exactly 100.
    pub creators: Vec<CreatorInput>,
    /// Optional license terms for the minted token.
    #[serde(default)]
    pub license_terms: Option<LicenseTermsInput>,
}

/// One creator entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorInput {
    pub name: String,
    /// EVM-style address: optional `0x` prefix + 40 hex digits.
    pub address: String,
    /// Contribution share in [1, 100].
    pub contribution_percent: f64,
    #[serde(default)]
    pub social_media: Vec<SocialMediaInput>,
}

/// A social media link on a creator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaInput {
    pub platform: String,
    pub url: String,
}

/// License terms carried into the token metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseTermsInput {
    pub commercial_use: bool,
    #[serde(default)]
    pub mint_fee: Option<MintFeeInput>,
    #[serde(default)]
    pub royalty_percentage: Option<f64>,
}

/// Minting fee. Amount and token are required together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintFeeInput {
    pub amount: String,
    pub token: String,
}

/// Request to register an existing NFT as an IP asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterExistingNftRequest {
    /// Contract of the already-minted NFT.
    pub nft_contract: String,
    pub token_id: String,
    #[serde(rename = "ipMetadataURI")]
    pub ip_metadata_uri: String,
    /// 0x-prefixed 64-hex-digit digest of the IP metadata document.
    pub ip_metadata_hash: String,
    #[serde(rename = "nftMetadataURI")]
    pub nft_metadata_uri: String,
    /// 0x-prefixed 64-hex-digit digest of the NFT metadata document.
    pub nft_metadata_hash: String,
}

// ── Response DTOs ───────────────────────────────────────────────────

/// Successful registration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIpResponse {
    /// Always `"success"`.
    pub status: &'static str,
    pub ip_id: String,
    pub transaction_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_url: Option<String>,
    pub ipfs_data: IpfsData,
}

/// Pinned-content references included with a registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpfsData {
    pub media_url: String,
    pub metadata_url: String,
}

// ── Validation ──────────────────────────────────────────────────────

impl Validate for RegisterIpRequest {
    fn validate(&self) -> Result<(), ApiError> {
        // Required fields and lengths.
        let title_len = self.title.chars().count();
        if title_len == 0 {
            return Err(ApiError::InvalidRequest("title is required".to_string()));
        }
        if title_len > 100 {
            return Err(ApiError::InvalidRequest(
                "title cannot exceed 100 characters".to_string(),
            ));
        }
        let description_len = self.description.chars().count();
        if description_len < 3 {
            return Err(ApiError::InvalidRequest(
                "description must be at least 3 characters long".to_string(),
            ));
        }
        if description_len > 1000 {
            return Err(ApiError::InvalidRequest(
                "description cannot exceed 1000 characters".to_string(),
            ));
        }
        if self.file_url.is_empty() {
            return Err(ApiError::InvalidRequest("file URL is required".to_string()));
        }
        if self.creators.is_empty() {
            return Err(ApiError::InvalidRequest(
                "at least one creator is required".to_string(),
            ));
        }

        // URL syntax.
        if Url::parse(&self.file_url).is_err() {
            return Err(ApiError::InvalidContentUrl(format!(
                "file URL is not a valid URL: {}",
                self.file_url
            )));
        }

        // Contribution sum. Exact equality, matching the invariant:
        // shares must sum to precisely 100.
        let total: f64 = self.creators.iter().map(|c| c.contribution_percent).sum();
        if total != 100.0 {
            return Err(ApiError::InvalidRequest(format!(
                "creator contribution percentages must sum to 100, got {total}"
            )));
        }

        // Per-creator checks.
        for creator in &self.creators {
            let name_len = creator.name.chars().count();
            if name_len == 0 {
                return Err(ApiError::InvalidRequest(
                    "creator name cannot be empty".to_string(),
                ));
            }
            if name_len > 100 {
                return Err(ApiError::InvalidRequest(
                    "creator name cannot exceed 100 characters".to_string(),
                ));
            }
            if creator.contribution_percent < 1.0 || creator.contribution_percent > 100.0 {
                return Err(ApiError::InvalidRequest(format!(
                    "contribution percentage must be in [1, 100], got {}",
                    creator.contribution_percent
                )));
            }
            if EvmAddress::parse(&creator.address).is_err() {
                return Err(ApiError::InvalidRequest(format!(
                    "invalid creator address format: {}",
                    creator.address
                )));
            }
            for link in &creator.social_media {
                if link.platform.is_empty() {
                    return Err(ApiError::InvalidRequest(
                        "social media platform is required".to_string(),
                    ));
                }
                if Url::parse(&link.url).is_err() {
                    return Err(ApiError::InvalidRequest(format!(
                        "social media URL must be a valid URL: {}",
                        link.url
                    )));
                }
            }
        }

        // License terms.
        if let Some(terms) = &self.license_terms {
            if let Some(fee) = &terms.mint_fee {
                if fee.amount.is_empty() {
                    return Err(ApiError::InvalidRequest(
                        "mint fee amount is required".to_string(),
                    ));
                }
                if fee.token.is_empty() {
                    return Err(ApiError::InvalidRequest(
                        "mint fee token is required".to_string(),
                    ));
                }
            }
            if let Some(royalty) = terms.royalty_percentage {
                if !(0.0..=100.0).contains(&royalty) {
                    return Err(ApiError::InvalidRequest(format!(
                        "royalty percentage must be in [0, 100], got {royalty}"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Validate for RegisterExistingNftRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if EvmAddress::parse(&self.nft_contract).is_err() {
            return Err(ApiError::InvalidRequest(format!(
                "invalid NFT contract address format: {}",
                self.nft_contract
            )));
        }
        if self.token_id.is_empty() {
            return Err(ApiError::InvalidRequest("token ID is required".to_string()));
        }
        if Url::parse(&self.ip_metadata_uri).is_err() {
            return Err(ApiError::InvalidRequest(
                "IP metadata URI must be a valid URI".to_string(),
            ));
        }
        if Bytes32::parse(&self.ip_metadata_hash).is_err() {
            return Err(ApiError::InvalidRequest(format!(
                "invalid IP metadata hash format: {}",
                self.ip_metadata_hash
            )));
        }
        if Url::parse(&self.nft_metadata_uri).is_err() {
            return Err(ApiError::InvalidRequest(
                "NFT metadata URI must be a valid URI".to_string(),
            ));
        }
        if Bytes32::parse(&self.nft_metadata_hash).is_err() {
            return Err(ApiError::InvalidRequest(format!(
                "invalid NFT metadata hash format: {}",
                self.nft_metadata_hash
            )));
        }
        Ok(())
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the IP asset router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/ip/register", post(register))
        .route("/api/v1/ip/register-existing-nft", post(register_existing_nft))
        .route("/api/v1/ip/:ip_id", get(asset_detail))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/v1/ip/register — register a new IP asset.
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterIpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterIpResponse>), ApiError> {
    let req = extract_validated_json(body)?;
    let response = orchestration::register_ip(&state, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/ip/register-existing-nft — register an existing NFT.
async fn register_existing_nft(
    State(state): State<AppState>,
    body: Result<Json<RegisterExistingNftRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterIpResponse>), ApiError> {
    let req = extract_validated_json(body)?;
    let response = orchestration::register_existing_nft(&state, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/ip/:ipId — registered asset detail.
async fn asset_detail(
    State(state): State<AppState>,
    Path(ip_id): Path<String>,
) -> Result<Json<IpAssetDetail>, ApiError> {
    let ip_id = IpAssetId::parse(&ip_id).map_err(|_| {
        ApiError::InvalidRequest(format!(
            "invalid IP ID format, must match IP-0x followed by hex digits: {ip_id}"
        ))
    })?;
    let detail = orchestration::asset_detail(&state, &ip_id).await?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterIpRequest {
        RegisterIpRequest {
            title: "T".to_string(),
            description: "desc".to_string(),
            file_url: "https://example.com/a.png".to_string(),
            creators: vec![CreatorInput {
                name: "A".to_string(),
                address: format!("0x{}", "1".repeat(40)),
                contribution_percent: 100.0,
                social_media: vec![],
            }],
            license_terms: None,
        }
    }

    fn error_code(err: ApiError) -> &'static str {
        err.status_and_code().1
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn empty_title_fails() {
        let mut req = valid_request();
        req.title = String::new();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn long_title_fails() {
        let mut req = valid_request();
        req.title = "x".repeat(101);
        assert!(req.validate().is_err());
    }

    #[test]
    fn short_description_fails() {
        let mut req = valid_request();
        req.description = "ab".to_string();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn empty_creators_fails() {
        let mut req = valid_request();
        req.creators.clear();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn invalid_url_fails_with_content_url_code() {
        let mut req = valid_request();
        req.file_url = "not-a-url".to_string();
        assert_eq!(
            error_code(req.validate().unwrap_err()),
            "INVALID_CONTENT_URL"
        );
    }

    #[test]
    fn missing_file_url_is_presence_failure_not_syntax() {
        // Presence is checked before syntax, so an empty URL reports
        // INVALID_REQUEST rather than INVALID_CONTENT_URL.
        let mut req = valid_request();
        req.file_url = String::new();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn contribution_sum_below_100_fails() {
        let mut req = valid_request();
        req.creators[0].contribution_percent = 50.0;
        let err = req.validate().unwrap_err();
        assert_eq!(error_code(err), "INVALID_REQUEST");
    }

    #[test]
    fn contribution_sum_60_plus_30_fails() {
        let mut req = valid_request();
        req.creators = vec![
            CreatorInput {
                name: "A".to_string(),
                address: format!("0x{}", "1".repeat(40)),
                contribution_percent: 60.0,
                social_media: vec![],
            },
            CreatorInput {
                name: "B".to_string(),
                address: format!("0x{}", "2".repeat(40)),
                contribution_percent: 30.0,
                social_media: vec![],
            },
        ];
        assert!(req.validate().is_err());
    }

    #[test]
    fn split_summing_to_100_passes() {
        let mut req = valid_request();
        req.creators = vec![
            CreatorInput {
                name: "A".to_string(),
                address: format!("0x{}", "1".repeat(40)),
                contribution_percent: 60.0,
                social_media: vec![],
            },
            CreatorInput {
                name: "B".to_string(),
                address: format!("0x{}", "2".repeat(40)),
                contribution_percent: 40.0,
                social_media: vec![],
            },
        ];
        assert!(req.validate().is_ok());
    }

    #[test]
    fn bad_creator_address_fails() {
        let mut req = valid_request();
        req.creators[0].address = "0x1234".to_string();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn address_without_prefix_passes() {
        let mut req = valid_request();
        req.creators[0].address = "a".repeat(40);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn address_with_41_digits_fails() {
        let mut req = valid_request();
        req.creators[0].address = format!("0x{}", "1".repeat(41));
        assert!(req.validate().is_err());
    }

    #[test]
    fn sum_is_checked_before_address_format() {
        // Validation order: the 90-sum failure must win over the bad
        // address in the same request.
        let mut req = valid_request();
        req.creators = vec![CreatorInput {
            name: "A".to_string(),
            address: "garbage".to_string(),
            contribution_percent: 90.0,
            social_media: vec![],
        }];
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 100"), "got: {err}");
    }

    #[test]
    fn contribution_below_1_fails() {
        let mut req = valid_request();
        req.creators = vec![
            CreatorInput {
                name: "A".to_string(),
                address: format!("0x{}", "1".repeat(40)),
                contribution_percent: 0.5,
                social_media: vec![],
            },
            CreatorInput {
                name: "B".to_string(),
                address: format!("0x{}", "2".repeat(40)),
                contribution_percent: 99.5,
                social_media: vec![],
            },
        ];
        assert!(req.validate().is_err());
    }

    #[test]
    fn social_media_with_bad_url_fails() {
        let mut req = valid_request();
        req.creators[0].social_media = vec![SocialMediaInput {
            platform: "twitter".to_string(),
            url: "not a url".to_string(),
        }];
        assert!(req.validate().is_err());
    }

    #[test]
    fn license_with_empty_mint_fee_amount_fails() {
        let mut req = valid_request();
        req.license_terms = Some(LicenseTermsInput {
            commercial_use: true,
            mint_fee: Some(MintFeeInput {
                amount: String::new(),
                token: "WIP".to_string(),
            }),
            royalty_percentage: None,
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn license_with_out_of_range_royalty_fails() {
        let mut req = valid_request();
        req.license_terms = Some(LicenseTermsInput {
            commercial_use: true,
            mint_fee: None,
            royalty_percentage: Some(101.0),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn license_with_zero_royalty_passes() {
        let mut req = valid_request();
        req.license_terms = Some(LicenseTermsInput {
            commercial_use: false,
            mint_fee: None,
            royalty_percentage: Some(0.0),
        });
        assert!(req.validate().is_ok());
    }

    fn valid_existing_request() -> RegisterExistingNftRequest {
        RegisterExistingNftRequest {
            nft_contract: format!("0x{}", "3".repeat(40)),
            token_id: "42".to_string(),
            ip_metadata_uri: "https://ipfs.io/ipfs/QmA".to_string(),
            ip_metadata_hash: format!("0x{}", "a".repeat(64)),
            nft_metadata_uri: "https://ipfs.io/ipfs/QmB".to_string(),
            nft_metadata_hash: format!("0x{}", "b".repeat(64)),
        }
    }

    #[test]
    fn valid_existing_nft_request_passes() {
        assert!(valid_existing_request().validate().is_ok());
    }

    #[test]
    fn existing_nft_bad_contract_fails() {
        let mut req = valid_existing_request();
        req.nft_contract = "0xnothex".to_string();
        assert_eq!(error_code(req.validate().unwrap_err()), "INVALID_REQUEST");
    }

    #[test]
    fn existing_nft_short_hash_fails() {
        let mut req = valid_existing_request();
        req.ip_metadata_hash = format!("0x{}", "a".repeat(63));
        assert!(req.validate().is_err());
    }

    #[test]
    fn existing_nft_empty_token_id_fails() {
        let mut req = valid_existing_request();
        req.token_id = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn existing_nft_bad_uri_fails() {
        let mut req = valid_existing_request();
        req.nft_metadata_uri = "nope".to_string();
        assert!(req.validate().is_err());
    }
}
