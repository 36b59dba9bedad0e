//! # Content Digests -- SHA-256 Integrity Values
//!
//! Defines [`Bytes32`], the fixed 32-byte digest used as the on-chain
//! integrity pointer for pinned content and metadata documents, and the
//! two digest entry points:
//!
//! - [`sha256_bytes`] hashes raw bytes (downloaded media content).
//! - [`sha256_canonical`] hashes a [`CanonicalBytes`] value (JSON
//!   metadata documents), so the digest provably covers the exact bytes
//!   that were pinned.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::HexParseError;

/// A 32-byte SHA-256 digest, rendered as `0x` + 64 lowercase hex digits.
///
/// Parsing accepts an optional `0x` prefix and is case-insensitive;
/// a parsed value is valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string: optional `0x` prefix + exactly 64 hex digits.
    pub fn parse(s: &str) -> Result<Self, HexParseError> {
        let payload = s.strip_prefix("0x").unwrap_or(s);
        let bytes = decode_hex_fixed::<32>(payload)?;
        Ok(Self(bytes))
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as 64 lowercase hex digits without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Render as `0x` + 64 lowercase hex digits.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }
}

impl std::fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_prefixed())
    }
}

impl std::str::FromStr for Bytes32 {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_prefixed())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

/// Compute the SHA-256 digest of raw bytes.
///
/// Used for downloaded media content, where the digest must cover the
/// exact byte sequence fetched from the origin, independent of any
/// pinning-service response.
pub fn sha256_bytes(data: &[u8]) -> Bytes32 {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Bytes32(bytes)
}

/// Compute the SHA-256 digest of canonical bytes.
///
/// The signature accepts only `&CanonicalBytes`, not raw `&[u8]`, so no
/// code path can register a metadata digest over bytes that did not come
/// out of the canonical serialization pipeline.
pub fn sha256_canonical(data: &CanonicalBytes) -> Bytes32 {
    sha256_bytes(data.as_bytes())
}

/// Decode exactly `N` bytes from a hex payload (no prefix).
pub fn decode_hex_fixed<const N: usize>(payload: &str) -> Result<[u8; N], HexParseError> {
    if payload.len() != N * 2 {
        return Err(HexParseError::InvalidLength {
            expected: N * 2,
            actual: payload.len(),
        });
    }
    let mut out = [0u8; N];
    for (i, chunk) in payload.as_bytes().chunks_exact(2).enumerate() {
        let hi = hex_nibble(chunk[0]).ok_or_else(|| HexParseError::InvalidCharacter {
            character: chunk[0] as char,
            offset: i * 2,
        })?;
        let lo = hex_nibble(chunk[1]).ok_or_else(|| HexParseError::InvalidCharacter {
            character: chunk[1] as char,
            offset: i * 2 + 1,
        })?;
        out[i] = (hi << 4) | lo;
    }
    Ok(out)
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
