use crate::ids::Selector;
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// InterfaceId
///
/// Four-byte interface key. By convention the id of an interface is the XOR
/// of all of its selectors.
///

#[derive(
    CandidType, Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct InterfaceId(u32);

impl InterfaceId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn from_selectors(selectors: &[Selector]) -> Self {
        Self(selectors.iter().fold(0, |acc, s| acc ^ s.as_u32()))
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

///
/// TESTS
///
