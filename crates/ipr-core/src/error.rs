//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations and keep the
//! original cause where one exists.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("canonical serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing a hex-encoded identifier (address, digest, key).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexParseError {
    /// The hex payload had the wrong number of digits.
    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength {
        /// Number of hex digits the type requires.
        expected: usize,
        /// Number of digits actually supplied (after stripping any 0x).
        actual: usize,
    },

    /// A character outside `[0-9a-fA-F]` appeared in the payload.
    #[error("invalid hex character {character:?} at offset {offset}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset within the hex payload.
        offset: usize,
    },

    /// The identifier did not match its required shape (e.g. `IP-0x` prefix).
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),
}
