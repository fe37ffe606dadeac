use crate::{
    exec::Revert,
    ids::InterfaceId,
    storage::{DiamondRegistry, DiamondState},
    utils::serialize::{deserialize, serialize},
};
use candid::Principal;
use serde::{Serialize, de::DeserializeOwned};

///
/// ExecutionContext
///
/// Mutable handle to a diamond's state handed to facet code. The registry is
/// read-only here; selectors change only through cuts.
///

pub struct ExecutionContext<'a> {
    diamond: Principal,
    caller: Principal,
    state: &'a mut DiamondState,
}

impl<'a> ExecutionContext<'a> {
    pub(crate) const fn new(
        diamond: Principal,
        caller: Principal,
        state: &'a mut DiamondState,
    ) -> Self {
        Self {
            diamond,
            caller,
            state,
        }
    }

    /// The diamond whose state this code runs against.
    #[must_use]
    pub const fn diamond(&self) -> Principal {
        self.diamond
    }

    /// The original caller; delegated execution preserves it.
    #[must_use]
    pub const fn caller(&self) -> Principal {
        self.caller
    }

    #[must_use]
    pub fn registry(&self) -> &DiamondRegistry {
        self.state.registry()
    }

    //
    // Interface flags
    //

    #[must_use]
    pub fn supports_interface(&self, id: InterfaceId) -> bool {
        self.state.supports_interface(id)
    }

    pub fn set_interface(&mut self, id: InterfaceId, supported: bool) {
        self.state.set_interface(id, supported);
    }

    //
    // Slots
    //

    #[must_use]
    pub fn slot(&self, namespace: &str) -> Option<&[u8]> {
        self.state.slot(namespace)
    }

    pub fn set_slot(&mut self, namespace: &str, bytes: Vec<u8>) {
        self.state.set_slot(namespace, bytes);
    }

    pub fn clear_slot(&mut self, namespace: &str) -> Option<Vec<u8>> {
        self.state.clear_slot(namespace)
    }

    /// Decode a typed record from `namespace`. Decoding failures revert with
    /// the codec message as payload.
    pub fn load<T: DeserializeOwned>(&self, namespace: &str) -> Result<Option<T>, Revert> {
        self.slot(namespace)
            .map(|bytes| deserialize(bytes).map_err(|e| Revert::message(&e.to_string())))
            .transpose()
    }

    pub fn store<T: Serialize>(&mut self, namespace: &str, value: &T) -> Result<(), Revert> {
        let bytes = serialize(value).map_err(|e| Revert::message(&e.to_string()))?;
        self.set_slot(namespace, bytes);

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_slots_round_trip_through_context() {
        let diamond = Principal::from_slice(&[1; 29]);
        let mut state = DiamondState::new(diamond);

        {
            let mut ctx = ExecutionContext::new(diamond, Principal::anonymous(), &mut state);
            assert_eq!(ctx.load::<u64>("counter").unwrap(), None);

            ctx.store("counter", &41u64).unwrap();
            let next = ctx.load::<u64>("counter").unwrap().unwrap() + 1;
            ctx.store("counter", &next).unwrap();
        }

        assert!(state.slot("counter").is_some());

        let ctx = ExecutionContext::new(diamond, Principal::anonymous(), &mut state);
        assert_eq!(ctx.load::<u64>("counter").unwrap(), Some(42));
    }

    #[test]
    fn undecodable_slot_reverts() {
        let diamond = Principal::from_slice(&[1; 29]);
        let mut state = DiamondState::new(diamond);
        state.set_slot("counter", vec![0xff]);

        let ctx = ExecutionContext::new(diamond, diamond, &mut state);

        assert!(ctx.load::<u64>("counter").is_err());
    }
}
