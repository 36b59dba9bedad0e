//! Story Protocol client errors.
//!
//! Each failure carries a stable machine-readable code and the original
//! cause, assigned at the point of failure and propagated unchanged to
//! the HTTP boundary. No operation retries.

use thiserror::Error;

use ipr_core::HexParseError;

use crate::config::ConfigError;

/// Which gateway operation an error belongs to. Mint-and-register,
/// register-existing, and detail lookups surface under distinct codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOp {
    /// Mint a new token and register it as an IP asset.
    MintAndRegister,
    /// Attach registration data to an existing NFT.
    RegisterExisting,
    /// Asset detail lookup.
    Detail,
}

impl std::fmt::Display for StoryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MintAndRegister => "mint-and-register",
            Self::RegisterExisting => "register-existing",
            Self::Detail => "asset-detail",
        })
    }
}

/// Errors from the registration gateway client.
#[derive(Error, Debug)]
pub enum StoryError {
    /// Client construction failed: credentials missing or malformed.
    #[error("story client initialization failed: {0}")]
    Init(#[from] ConfigError),

    /// A creator address could not be coerced while building metadata.
    #[error("metadata generation failed for address {address}")]
    MetadataGeneration {
        /// The address that failed to parse.
        address: String,
        /// Underlying parse failure.
        #[source]
        source: HexParseError,
    },

    /// The gateway request failed at the transport level.
    #[error("{op} request failed")]
    Transport {
        /// Which operation failed.
        op: StoryOp,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway returned a non-success status.
    #[error("{op} returned status {status}: {body}")]
    Gateway {
        /// Which operation failed.
        op: StoryOp,
        /// HTTP status code returned by the gateway.
        status: u16,
        /// Response body, for operator diagnostics.
        body: String,
    },

    /// The gateway response could not be deserialized.
    #[error("unexpected {op} response")]
    Deserialization {
        /// Which operation failed.
        op: StoryOp,
        /// Underlying deserialization error.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway reported success but omitted the asset identifier or
    /// the transaction hash. Never surfaced as a partial result.
    #[error("registration response missing ipId or txHash")]
    InvalidRegistrationResponse {
        /// Which registration operation produced the response.
        op: StoryOp,
    },

    /// The queried IP asset is not registered.
    #[error("IP asset not found: {ip_id}")]
    AssetNotFound {
        /// The identifier that was queried.
        ip_id: String,
    },
}

impl StoryError {
    /// Stable machine-readable error code for the HTTP error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Init(_) => "STORY_CLIENT_INIT_FAILED",
            Self::MetadataGeneration { .. } => "IP_METADATA_GENERATION_FAILED",
            Self::InvalidRegistrationResponse { .. } => "INVALID_IP_REGISTRATION_RESPONSE",
            Self::AssetNotFound { .. } => "IP_ASSET_NOT_FOUND",
            Self::Transport { op, .. }
            | Self::Gateway { op, .. }
            | Self::Deserialization { op, .. } => match op {
                StoryOp::MintAndRegister => "STORY_REGISTER_FAILED",
                StoryOp::RegisterExisting => "STORY_REGISTER_EXISTING_NFT_FAILED",
                StoryOp::Detail => "STORY_GET_DETAIL_FAILED",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_code() {
        let err = StoryError::Init(ConfigError::MissingPrivateKey);
        assert_eq!(err.code(), "STORY_CLIENT_INIT_FAILED");
    }

    #[test]
    fn register_codes_follow_operation() {
        let mint = StoryError::Gateway {
            op: StoryOp::MintAndRegister,
            status: 500,
            body: String::new(),
        };
        assert_eq!(mint.code(), "STORY_REGISTER_FAILED");

        let existing = StoryError::Gateway {
            op: StoryOp::RegisterExisting,
            status: 500,
            body: String::new(),
        };
        assert_eq!(existing.code(), "STORY_REGISTER_EXISTING_NFT_FAILED");

        let detail = StoryError::Gateway {
            op: StoryOp::Detail,
            status: 500,
            body: String::new(),
        };
        assert_eq!(detail.code(), "STORY_GET_DETAIL_FAILED");
    }

    #[test]
    fn invalid_response_code() {
        let err = StoryError::InvalidRegistrationResponse {
            op: StoryOp::MintAndRegister,
        };
        assert_eq!(err.code(), "INVALID_IP_REGISTRATION_RESPONSE");
    }

    #[test]
    fn not_found_code() {
        let err = StoryError::AssetNotFound {
            ip_id: "IP-0xdeadbeef".to_string(),
        };
        assert_eq!(err.code(), "IP_ASSET_NOT_FOUND");
    }
}
