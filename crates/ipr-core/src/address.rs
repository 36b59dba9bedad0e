//! # Identifier Newtypes
//!
//! Hex-shaped identifiers used throughout the registration flow. Each is
//! a distinct type validated at construction time: an [`EvmAddress`]
//! cannot be passed where a [`Bytes32`](crate::Bytes32) digest is
//! expected, and neither can hold a malformed value.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::digest::decode_hex_fixed;
use crate::error::HexParseError;

/// A 20-byte EVM-style account or contract address.
///
/// Parsing accepts an optional `0x` prefix and mixed case; the canonical
/// rendering is always `0x` + 40 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvmAddress([u8; 20]);

impl EvmAddress {
    /// The all-zero address.
    pub const ZERO: EvmAddress = EvmAddress([0u8; 20]);

    /// Parse from a hex string: optional `0x` prefix + exactly 40 hex digits.
    pub fn parse(s: &str) -> Result<Self, HexParseError> {
        let payload = s.strip_prefix("0x").unwrap_or(s);
        let bytes = decode_hex_fixed::<20>(payload)?;
        Ok(Self(bytes))
    }

    /// Access the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as `0x` + 40 lowercase hex digits.
    pub fn to_hex_prefixed(&self) -> String {
        let hex: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{hex}")
    }
}

impl std::fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_prefixed())
    }
}

impl std::str::FromStr for EvmAddress {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EvmAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_prefixed())
    }
}

impl<'de> Deserialize<'de> for EvmAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

/// A registered IP asset identifier in the external `IP-0x…` form.
///
/// The registration API returns asset identifiers as `IP-` followed by a
/// 0x-prefixed hex value. Lookups accept exactly that shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IpAssetId(String);

impl IpAssetId {
    /// Parse an identifier of the form `IP-0x` + one or more hex digits.
    pub fn parse(s: &str) -> Result<Self, HexParseError> {
        let payload = s.strip_prefix("IP-0x").ok_or_else(|| {
            HexParseError::MalformedIdentifier(format!(
                "IP asset id must start with IP-0x: {s}"
            ))
        })?;
        if payload.is_empty() {
            return Err(HexParseError::MalformedIdentifier(
                "IP asset id has no hex payload".to_string(),
            ));
        }
        if let Some((offset, character)) = payload
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(HexParseError::InvalidCharacter { character, offset });
        }
        Ok(Self(s.to_string()))
    }

    /// The full identifier, e.g. `IP-0xdeadbeef`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `0x…` portion, as expected by the registration API.
    pub fn address_part(&self) -> &str {
        &self.0["IP-".len()..]
    }
}

impl std::fmt::Display for IpAssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
