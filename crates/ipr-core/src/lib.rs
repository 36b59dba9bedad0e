//! # ipr-core -- Foundational types for the IP registrar
//!
//! Domain-primitive newtypes and the canonical-bytes pipeline shared by
//! every other crate in the workspace.
//!
//! ## Canonical Digest Pipeline
//!
//! The registration flow pins a JSON metadata document to IPFS and also
//! registers a SHA-256 digest of that document on-chain as an integrity
//! pointer. The two values must agree byte-for-byte. [`CanonicalBytes`] is
//! the sole construction path for bytes entering digest computation, so a
//! document is serialized exactly once and both the pin upload and the
//! on-chain hash consume the same byte sequence.
//!
//! ## Crate Policy
//!
//! - No I/O. Everything here is pure and synchronous.
//! - Identifier newtypes validate format at construction time; a parsed
//!   [`EvmAddress`] or [`Bytes32`] is valid by construction.

pub mod address;
pub mod canonical;
pub mod digest;
pub mod error;

pub use address::{EvmAddress, IpAssetId};
pub use canonical::CanonicalBytes;
pub use digest::{sha256_bytes, sha256_canonical, Bytes32};
pub use error::{CanonicalizationError, HexParseError};
