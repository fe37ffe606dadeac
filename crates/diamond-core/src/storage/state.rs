//! DiamondState
//!
//! Everything persistent about one diamond: the selector registry, the
//! interface-support flags and the namespaced slot store that facet code
//! reads and writes through its execution context.
//!
//! Interface flags have their own lifecycle; cuts never touch them.
//! The whole state is cloned to stage a mutation and swapped in on commit.

use crate::{
    ids::InterfaceId,
    storage::registry::DiamondRegistry,
    utils::serialize::{SerializeError, deserialize, serialize},
};
use candid::Principal;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use std::collections::BTreeMap;

///
/// DiamondState
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiamondState {
    registry: DiamondRegistry,
    interfaces: BTreeMap<InterfaceId, bool>,
    slots: BTreeMap<String, ByteBuf>,
}

impl DiamondState {
    #[must_use]
    pub const fn new(diamond: Principal) -> Self {
        Self {
            registry: DiamondRegistry::new(diamond),
            interfaces: BTreeMap::new(),
            slots: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &DiamondRegistry {
        &self.registry
    }

    pub(crate) const fn registry_mut(&mut self) -> &mut DiamondRegistry {
        &mut self.registry
    }

    //
    // Interface flags
    //

    /// Current flag value; unset interfaces are unsupported.
    #[must_use]
    pub fn supports_interface(&self, id: InterfaceId) -> bool {
        self.interfaces.get(&id).copied().unwrap_or(false)
    }

    pub(crate) fn set_interface(&mut self, id: InterfaceId, supported: bool) {
        self.interfaces.insert(id, supported);
    }

    //
    // Namespaced slots
    //

    #[must_use]
    pub fn slot(&self, namespace: &str) -> Option<&[u8]> {
        self.slots.get(namespace).map(|buf| buf.as_slice())
    }

    pub(crate) fn set_slot(&mut self, namespace: &str, bytes: Vec<u8>) {
        self.slots
            .insert(namespace.to_string(), ByteBuf::from(bytes));
    }

    pub(crate) fn clear_slot(&mut self, namespace: &str) -> Option<Vec<u8>> {
        self.slots.remove(namespace).map(ByteBuf::into_vec)
    }

    pub fn slot_namespaces(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.keys().map(String::as_str)
    }

    //
    // Export
    //

    /// Encode the full state as CBOR, for persistence across upgrades.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        deserialize(bytes)
    }
}

///
/// TESTS
///
