//! Digest function for transaction and block hashes.
//!
//! The reference algorithm is a 32-bit rolling hash (`h * 31 + c` over UTF-16
//! code units with signed wraparound). It is small and fast and NOT
//! collision or preimage resistant. [`DigestAlgorithm::Blake3`] swaps in a
//! 256-bit digest without changing any other contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The `previous_hash` of the first record in a chain.
pub const GENESIS_HASH: &str = "0000000000000000";

/// A fixed-width lowercase hex digest.
///
/// Deserialization accepts any string so that tampered records still load
/// and then fail verification instead of failing to parse.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// The genesis sentinel.
    pub fn genesis() -> Self {
        Self(GENESIS_HASH.to_string())
    }

    /// Parse from a lowercase hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(CoreError::InvalidDigest(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        self.0 == GENESIS_HASH
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which digest function a ledger is built with.
///
/// A chain must be verified with the algorithm that built it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// 32-bit rolling hash, 8 hex characters.
    #[default]
    Rolling32,
    /// BLAKE3, 64 hex characters.
    Blake3,
}

impl DigestAlgorithm {
    /// Digest a payload string.
    pub fn digest(self, payload: &str) -> Digest {
        match self {
            Self::Rolling32 => rolling32(payload),
            Self::Blake3 => Digest(hex::encode(blake3::hash(payload.as_bytes()).as_bytes())),
        }
    }

    /// Width of the hex output in characters.
    pub const fn width(self) -> usize {
        match self {
            Self::Rolling32 => 8,
            Self::Blake3 => 64,
        }
    }

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rolling32 => "rolling32",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rolling32" => Ok(Self::Rolling32),
            "blake3" => Ok(Self::Blake3),
            other => Err(CoreError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// The reference rolling hash.
///
/// Iterates UTF-16 code units so non-BMP characters contribute two units,
/// matching `charCodeAt` semantics. `|i32::MIN|` renders as `80000000`.
pub fn rolling32(payload: &str) -> Digest {
    let mut h: i32 = 0;
    for unit in payload.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    Digest(format!("{:08x}", h.unsigned_abs()))
}
