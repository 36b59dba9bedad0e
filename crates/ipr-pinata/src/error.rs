//! Pinata client errors.
//!
//! Every failure is tagged at its origin with a stable machine-readable
//! code and carries the underlying cause. Errors propagate unchanged to
//! the HTTP boundary; nothing here retries.

use thiserror::Error;

/// Which pin operation an error belongs to. Content pins and metadata
/// pins surface under different machine codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    /// `POST /pinning/pinFileToIPFS`
    File,
    /// `POST /pinning/pinJSONToIPFS`
    Json,
}

impl PinOp {
    fn endpoint(&self) -> &'static str {
        match self {
            Self::File => "POST /pinning/pinFileToIPFS",
            Self::Json => "POST /pinning/pinJSONToIPFS",
        }
    }
}

impl std::fmt::Display for PinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Errors from pinning operations and remote content capture.
#[derive(Error, Debug)]
pub enum PinataError {
    /// The origin fetch for remote content failed at the transport level.
    #[error("content fetch failed for {url}")]
    Fetch {
        /// The URL that was being fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The origin fetch returned a non-success status.
    #[error("content fetch for {url} returned status {status}")]
    FetchStatus {
        /// The URL that was being fetched.
        url: String,
        /// HTTP status code returned by the origin.
        status: u16,
    },

    /// The pin request failed at the transport level.
    #[error("pin request failed: {op}")]
    Transport {
        /// Which pin operation failed.
        op: PinOp,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The pinning gateway returned a non-success status.
    #[error("pin request {op} returned status {status}: {body}")]
    Gateway {
        /// Which pin operation failed.
        op: PinOp,
        /// HTTP status code returned by the gateway.
        status: u16,
        /// Response body, for operator diagnostics.
        body: String,
    },

    /// The pin response could not be deserialized.
    #[error("unexpected pin response from {op}")]
    Deserialization {
        /// Which pin operation failed.
        op: PinOp,
        /// Underlying deserialization error.
        #[source]
        source: reqwest::Error,
    },
}

impl PinataError {
    /// Stable machine-readable error code for the HTTP error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch { .. } | Self::FetchStatus { .. } => "IPFS_UPLOAD_FAILED",
            Self::Transport { op, .. }
            | Self::Gateway { op, .. }
            | Self::Deserialization { op, .. } => match op {
                PinOp::File => "IPFS_UPLOAD_FAILED",
                PinOp::Json => "IPFS_METADATA_UPLOAD_FAILED",
            },
        }
    }
}
