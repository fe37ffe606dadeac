//!
//! Four-byte dispatch keys.
//!
//! Selectors are stored as a big-endian `u32` so they encode as a plain
//! `nat32` over candid and sort in byte order.
//!

use crate::utils::hash::sha256_prefix4;
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

///
/// Selector
///

#[derive(
    CandidType, Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Selector(u32);

impl Selector {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Derive a selector from a canonical signature such as
    /// `"facetAddress(bytes4)"`: the first four bytes of its SHA-256 digest.
    #[must_use]
    pub fn from_signature(signature: &str) -> Self {
        Self::from_bytes(sha256_prefix4(signature.as_bytes()))
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| format!("selector '{s}' must start with 0x"))?;

        let mut bytes = [0u8; 4];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| format!("selector '{s}' must have exactly 8 hex digits: {e}"))?;

        Ok(Self::from_bytes(bytes))
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<u32> for Selector {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

///
/// TESTS
///
