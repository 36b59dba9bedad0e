//! # Registration Orchestration
//!
//! Sequences the registration pipeline for the two supported operations
//! and the detail lookup. Stages run strictly in order per request:
//!
//! ```text
//! validate → upload-content → build-metadata → upload-metadata ×2
//!          → canonical-hash → register → respond
//! ```
//!
//! The first failing stage short-circuits into the boundary translator;
//! nothing downstream of a failure executes, and nothing retries.
//!
//! ## Digest Agreement
//!
//! Each metadata document is canonicalized exactly once. The resulting
//! [`CanonicalBytes`] value is pinned verbatim and its digest goes into
//! the registration call, so the on-chain integrity hash covers the
//! pinned bytes by construction.

use ipr_core::{CanonicalBytes, EvmAddress, IpAssetId};
use ipr_story::metadata::{
    build_ip_metadata, build_nft_metadata, parse_creator, IpMetadataParams, License, MintFee,
    SocialMediaLink,
};
use ipr_story::{IpAssetDetail, RegistrationMetadata};

use crate::error::ApiError;
use crate::routes::ip::{
    IpfsData, LicenseTermsInput, RegisterExistingNftRequest, RegisterIpRequest, RegisterIpResponse,
};
use crate::state::AppState;

/// Register a new IP asset: capture the content, pin both metadata
/// documents, and mint-and-register on-chain.
pub async fn register_ip(
    state: &AppState,
    req: RegisterIpRequest,
) -> Result<RegisterIpResponse, ApiError> {
    tracing::info!(title = %req.title, file_url = %req.file_url, "ip registration started");

    // Content capture: fetch, digest, pin.
    let content = state.pinata.upload_content(&req.file_url).await?;
    let media_url = state.pinata.gateway_url(&content.ipfs_cid);
    tracing::info!(ipfs_cid = %content.ipfs_cid, content_type = %content.content_type, "content uploaded");

    // Metadata documents.
    let creators = req
        .creators
        .iter()
        .map(|c| {
            parse_creator(
                &c.name,
                &c.address,
                c.contribution_percent,
                c.social_media
                    .iter()
                    .map(|s| SocialMediaLink {
                        platform: s.platform.clone(),
                        url: s.url.clone(),
                    })
                    .collect(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let ip_metadata = build_ip_metadata(IpMetadataParams {
        title: req.title.clone(),
        description: req.description.clone(),
        media_url: media_url.clone(),
        media_hash: content.content_hash,
        media_type: content.content_type.clone(),
        creators,
    });
    let nft_metadata = build_nft_metadata(
        &req.title,
        &req.description,
        &media_url,
        &content.content_type,
        req.license_terms.map(license_from_input),
    );

    // One canonicalization site per document: the pinned bytes and the
    // registered digest come from the same value.
    let ip_document = CanonicalBytes::new(&ip_metadata)?;
    let nft_document = CanonicalBytes::new(&nft_metadata)?;

    let ip_pin = state.pinata.pin_json(&ip_document).await?;
    let nft_pin = state.pinata.pin_json(&nft_document).await?;
    tracing::info!(ip_cid = %ip_pin.ipfs_cid, nft_cid = %nft_pin.ipfs_cid, "metadata uploaded");

    let metadata_url = state.pinata.gateway_url(&ip_pin.ipfs_cid);
    let registration_metadata = RegistrationMetadata {
        ip_metadata_uri: metadata_url.clone(),
        ip_metadata_hash: ip_pin.digest,
        nft_metadata_uri: state.pinata.gateway_url(&nft_pin.ipfs_cid),
        nft_metadata_hash: nft_pin.digest,
    };

    // On-chain registration, blocking until confirmation.
    let registration = state.story.mint_and_register(&registration_metadata).await?;
    tracing::info!(ip_id = %registration.ip_id, tx_hash = %registration.tx_hash, "ip registration completed");

    Ok(RegisterIpResponse {
        status: "success",
        ip_id: registration.ip_id,
        transaction_hash: registration.tx_hash.to_hex_prefixed(),
        transaction_url: Some(registration.view_url),
        ipfs_data: IpfsData {
            media_url,
            metadata_url,
        },
    })
}

/// Attach registration data to an already-minted NFT. The metadata
/// documents were pinned by the caller; this operation carries their
/// references through to the registration gateway.
pub async fn register_existing_nft(
    state: &AppState,
    req: RegisterExistingNftRequest,
) -> Result<RegisterIpResponse, ApiError> {
    tracing::info!(nft_contract = %req.nft_contract, token_id = %req.token_id, "existing NFT registration started");

    // Validation already checked these shapes; parse failures here mean
    // the handler was bypassed.
    let nft_contract = EvmAddress::parse(&req.nft_contract)
        .map_err(|e| ApiError::InvalidAddress(format!("{}: {e}", req.nft_contract)))?;
    let ip_metadata_hash = ipr_core::Bytes32::parse(&req.ip_metadata_hash)
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let nft_metadata_hash = ipr_core::Bytes32::parse(&req.nft_metadata_hash)
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let registration_metadata = RegistrationMetadata {
        ip_metadata_uri: req.ip_metadata_uri.clone(),
        ip_metadata_hash,
        nft_metadata_uri: req.nft_metadata_uri.clone(),
        nft_metadata_hash,
    };

    let registration = state
        .story
        .register_existing(nft_contract, &req.token_id, &registration_metadata)
        .await?;
    tracing::info!(ip_id = %registration.ip_id, tx_hash = %registration.tx_hash, "existing NFT registration completed");

    Ok(RegisterIpResponse {
        status: "success",
        ip_id: registration.ip_id,
        transaction_hash: registration.tx_hash.to_hex_prefixed(),
        transaction_url: Some(registration.view_url),
        ipfs_data: IpfsData {
            media_url: req.nft_metadata_uri,
            metadata_url: req.ip_metadata_uri,
        },
    })
}

/// Look up a registered asset.
pub async fn asset_detail(
    state: &AppState,
    ip_id: &IpAssetId,
) -> Result<IpAssetDetail, ApiError> {
    tracing::debug!(ip_id = %ip_id, "asset detail lookup");
    Ok(state.story.asset_detail(ip_id).await?)
}

fn license_from_input(terms: LicenseTermsInput) -> License {
    License {
        commercial_use: terms.commercial_use,
        mint_fee: terms.mint_fee.map(|fee| MintFee {
            amount: fee.amount,
            token: fee.token,
        }),
        royalty_percentage: terms.royalty_percentage,
    }
}
