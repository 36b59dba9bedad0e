//! # IP Metadata Documents
//!
//! Typed construction of the two JSON documents pinned during
//! registration: the IP metadata document (asset provenance) and the NFT
//! metadata document (token display data). Both are built per request,
//! canonicalized, hashed, pinned, and discarded.
//!
//! Optional license data is a typed structure, never dynamic JSON
//! shaping, so every optional-field combination is enumerable:
//! no license / license without extras / license with mint fee /
//! license with royalty / license with both.

use serde::{Deserialize, Serialize};

use ipr_core::{Bytes32, EvmAddress, HexParseError};

use crate::error::StoryError;

/// A creator entry in the IP metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpCreator {
    /// Display name.
    pub name: String,
    /// Canonical 0x-prefixed address.
    pub address: EvmAddress,
    /// Contribution share in percent. All creators of one asset sum to 100.
    pub contribution_percent: f64,
    /// Social media links, omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_media: Vec<SocialMediaLink>,
}

/// A social media link attached to a creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLink {
    /// Platform label, e.g. `twitter`.
    pub platform: String,
    /// Absolute profile URL.
    pub url: String,
}

/// The IP metadata document registered for the asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMetadata {
    pub title: String,
    pub description: String,
    /// Creation time as epoch seconds, rendered as a string.
    pub created_at: String,
    pub creators: Vec<IpCreator>,
    /// Gateway URL of the pinned content.
    pub image: String,
    /// SHA-256 of the raw content bytes.
    pub image_hash: Bytes32,
    /// Gateway URL of the pinned content (same content as `image`).
    pub media_url: String,
    /// SHA-256 of the raw content bytes.
    pub media_hash: Bytes32,
    /// MIME type of the content.
    pub media_type: String,
}

/// A display attribute on the NFT metadata document.
///
/// Field names follow the NFT metadata convention (`trait_type`), not
/// this crate's camelCase default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

/// License block on the NFT metadata document. Present only when the
/// registration request carried license terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub commercial_use: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_fee: Option<MintFee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub royalty_percentage: Option<f64>,
}

/// Minting fee: amount and token are required together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintFee {
    pub amount: String,
    pub token: String,
}

/// The NFT metadata document for the minted token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<NftAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// Inputs for building the IP metadata document.
#[derive(Debug, Clone)]
pub struct IpMetadataParams {
    pub title: String,
    pub description: String,
    pub media_url: String,
    pub media_hash: Bytes32,
    pub media_type: String,
    pub creators: Vec<IpCreator>,
}

/// Coerce a creator entry, validating the address.
///
/// The request validator has already checked the address shape, so a
/// failure here indicates a caller bypassing validation; it surfaces as
/// a metadata generation failure with the parse error as cause.
pub fn parse_creator(
    name: &str,
    address: &str,
    contribution_percent: f64,
    social_media: Vec<SocialMediaLink>,
) -> Result<IpCreator, StoryError> {
    let address = EvmAddress::parse(address).map_err(|source: HexParseError| {
        StoryError::MetadataGeneration {
            address: address.to_string(),
            source,
        }
    })?;
    Ok(IpCreator {
        name: name.to_string(),
        address,
        contribution_percent,
        social_media,
    })
}

/// Build the IP metadata document. Pure; always succeeds for typed input.
pub fn build_ip_metadata(params: IpMetadataParams) -> IpMetadata {
    IpMetadata {
        title: params.title,
        description: params.description,
        created_at: chrono::Utc::now().timestamp().to_string(),
        creators: params.creators,
        image: params.media_url.clone(),
        image_hash: params.media_hash,
        media_url: params.media_url,
        media_hash: params.media_hash,
        media_type: params.media_type,
    }
}

/// Build the NFT metadata document. Pure; always succeeds for typed input.
///
/// The attributes list is seeded with an asset-type trait and a
/// content-type trait. The license block is included only when license
/// terms were supplied.
pub fn build_nft_metadata(
    title: &str,
    description: &str,
    image: &str,
    content_type: &str,
    license: Option<License>,
) -> NftMetadata {
    NftMetadata {
        name: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        attributes: vec![
            NftAttribute {
                trait_type: "Type".to_string(),
                value: "IP Asset".to_string(),
            },
            NftAttribute {
                trait_type: "Content Type".to_string(),
                value: content_type.to_string(),
            },
        ],
        license,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipr_core::sha256_bytes;

    fn media_hash() -> Bytes32 {
        sha256_bytes(b"content")
    }

    fn creator() -> IpCreator {
        parse_creator("Alice", &format!("0x{}", "1".repeat(40)), 100.0, vec![]).unwrap()
    }

    #[test]
    fn parse_creator_accepts_valid_address() {
        let c = creator();
        assert_eq!(c.address.to_hex_prefixed(), format!("0x{}", "1".repeat(40)));
        assert_eq!(c.contribution_percent, 100.0);
    }

    #[test]
    fn parse_creator_rejects_bad_address_as_metadata_failure() {
        let err = parse_creator("Bob", "0x1234", 50.0, vec![]).unwrap_err();
        assert_eq!(err.code(), "IP_METADATA_GENERATION_FAILED");
    }

    #[test]
    fn ip_metadata_mirrors_media_fields_into_image() {
        let meta = build_ip_metadata(IpMetadataParams {
            title: "T".to_string(),
            description: "desc".to_string(),
            media_url: "https://ipfs.io/ipfs/QmCid".to_string(),
            media_hash: media_hash(),
            media_type: "image/png".to_string(),
            creators: vec![creator()],
        });
        assert_eq!(meta.image, meta.media_url);
        assert_eq!(meta.image_hash, meta.media_hash);
        assert!(!meta.created_at.is_empty());
    }

    #[test]
    fn ip_metadata_serializes_camel_case() {
        let meta = build_ip_metadata(IpMetadataParams {
            title: "T".to_string(),
            description: "d".to_string(),
            media_url: "u".to_string(),
            media_hash: media_hash(),
            media_type: "image/png".to_string(),
            creators: vec![creator()],
        });
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("mediaUrl").is_some());
        assert!(json.get("imageHash").is_some());
        assert!(json["creators"][0].get("contributionPercent").is_some());
    }

    #[test]
    fn creator_social_media_omitted_when_empty() {
        let json = serde_json::to_value(creator()).unwrap();
        assert!(json.get("socialMedia").is_none());
    }

    #[test]
    fn nft_metadata_seeds_type_attributes() {
        let meta = build_nft_metadata("T", "d", "img", "image/png", None);
        assert_eq!(meta.attributes.len(), 2);
        assert_eq!(meta.attributes[0].trait_type, "Type");
        assert_eq!(meta.attributes[0].value, "IP Asset");
        assert_eq!(meta.attributes[1].trait_type, "Content Type");
        assert_eq!(meta.attributes[1].value, "image/png");
    }

    #[test]
    fn nft_metadata_without_license_omits_block() {
        let meta = build_nft_metadata("T", "d", "img", "image/png", None);
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("license").is_none());
    }

    #[test]
    fn nft_metadata_license_combinations_serialize_exactly() {
        // commercial use only
        let bare = build_nft_metadata(
            "T",
            "d",
            "img",
            "image/png",
            Some(License {
                commercial_use: true,
                mint_fee: None,
                royalty_percentage: None,
            }),
        );
        let json = serde_json::to_value(&bare).unwrap();
        assert_eq!(json["license"]["commercialUse"], true);
        assert!(json["license"].get("mintFee").is_none());
        assert!(json["license"].get("royaltyPercentage").is_none());

        // mint fee only
        let fee = build_nft_metadata(
            "T",
            "d",
            "img",
            "image/png",
            Some(License {
                commercial_use: true,
                mint_fee: Some(MintFee {
                    amount: "10".to_string(),
                    token: "WIP".to_string(),
                }),
                royalty_percentage: None,
            }),
        );
        let json = serde_json::to_value(&fee).unwrap();
        assert_eq!(json["license"]["mintFee"]["amount"], "10");
        assert!(json["license"].get("royaltyPercentage").is_none());

        // royalty only
        let royalty = build_nft_metadata(
            "T",
            "d",
            "img",
            "image/png",
            Some(License {
                commercial_use: false,
                mint_fee: None,
                royalty_percentage: Some(5.0),
            }),
        );
        let json = serde_json::to_value(&royalty).unwrap();
        assert_eq!(json["license"]["royaltyPercentage"], 5.0);
        assert!(json["license"].get("mintFee").is_none());

        // both
        let both = build_nft_metadata(
            "T",
            "d",
            "img",
            "image/png",
            Some(License {
                commercial_use: true,
                mint_fee: Some(MintFee {
                    amount: "1".to_string(),
                    token: "WIP".to_string(),
                }),
                royalty_percentage: Some(2.5),
            }),
        );
        let json = serde_json::to_value(&both).unwrap();
        assert!(json["license"].get("mintFee").is_some());
        assert!(json["license"].get("royaltyPercentage").is_some());
    }

    #[test]
    fn nft_attribute_uses_snake_case_trait_type() {
        let meta = build_nft_metadata("T", "d", "img", "text/plain", None);
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["attributes"][0].get("trait_type").is_some());
    }
}
