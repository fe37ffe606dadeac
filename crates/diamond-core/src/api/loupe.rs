//! Loupe
//!
//! Read-only introspection over a diamond state, plus the built-in loupe
//! facet the diamond can host itself. Loupe reads never mutate and never
//! take the writer slot.

use crate::{
    Error, ThisError,
    dto::loupe::FacetView,
    exec::calldata,
    ids::{InterfaceId, Selector},
    storage::DiamondState,
    workflow::dispatch::DispatchError,
};
use candid::Principal;

///
/// LoupeError
///

#[derive(Debug, ThisError)]
pub enum LoupeError {
    #[error("function does not exist: {0}")]
    FunctionDoesNotExist(Selector),
}

//
// Queries
//

/// Every registered facet with its selectors, in facet list order.
#[must_use]
pub fn facets(state: &DiamondState) -> Vec<FacetView> {
    state
        .registry()
        .facets()
        .map(|(facet_address, selectors)| FacetView {
            facet_address,
            selectors: selectors.to_vec(),
        })
        .collect()
}

/// Selectors served by `facet`; empty for unknown facets.
#[must_use]
pub fn facet_function_selectors(state: &DiamondState, facet: &Principal) -> Vec<Selector> {
    state.registry().selectors_of(facet).to_vec()
}

#[must_use]
pub fn facet_addresses(state: &DiamondState) -> Vec<Principal> {
    state.registry().facet_addresses().to_vec()
}

pub fn facet_address(state: &DiamondState, selector: Selector) -> Result<Principal, LoupeError> {
    state
        .registry()
        .facet_of(selector)
        .ok_or(LoupeError::FunctionDoesNotExist(selector))
}

#[must_use]
pub fn supports_interface(state: &DiamondState, id: InterfaceId) -> bool {
    state.supports_interface(id)
}

///
/// BuiltinLoupe
///
/// Loupe functions the diamond can serve from its own address. Arguments and
/// results are candid-encoded; calldata is the selector followed by the
/// encoded arguments.
///

pub struct BuiltinLoupe;

impl BuiltinLoupe {
    pub const FACETS: &'static str = "facets()";
    pub const FACET_FUNCTION_SELECTORS: &'static str = "facetFunctionSelectors(principal)";
    pub const FACET_ADDRESSES: &'static str = "facetAddresses()";
    pub const FACET_ADDRESS: &'static str = "facetAddress(bytes4)";
    pub const SUPPORTS_INTERFACE: &'static str = "supportsInterface(bytes4)";

    pub const SIGNATURES: [&'static str; 5] = [
        Self::FACETS,
        Self::FACET_FUNCTION_SELECTORS,
        Self::FACET_ADDRESSES,
        Self::FACET_ADDRESS,
        Self::SUPPORTS_INTERFACE,
    ];

    #[must_use]
    pub fn selectors() -> Vec<Selector> {
        Self::SIGNATURES
            .iter()
            .map(|sig| Selector::from_signature(sig))
            .collect()
    }

    /// Interface id of the loupe surface: XOR of its selectors.
    #[must_use]
    pub fn interface_id() -> InterfaceId {
        InterfaceId::from_selectors(&Self::selectors())
    }

    /// Serve a built-in loupe call. Undecodable arguments revert with the
    /// decoder message.
    pub fn handle(state: &DiamondState, selector: Selector, args: &[u8]) -> Result<Vec<u8>, Error> {
        let sig = Self::SIGNATURES
            .into_iter()
            .find(|sig| Selector::from_signature(sig) == selector)
            .ok_or(DispatchError::UnservedSelector(selector))?;

        Self::serve(state, sig, args)
    }

    fn serve(state: &DiamondState, sig: &str, args: &[u8]) -> Result<Vec<u8>, Error> {
        let out = match sig {
            Self::FACETS => calldata::encode_one(facets(state))?,
            Self::FACET_FUNCTION_SELECTORS => {
                let facet: Principal = calldata::decode_one(args)?;
                calldata::encode_one(facet_function_selectors(state, &facet))?
            }
            Self::FACET_ADDRESSES => calldata::encode_one(facet_addresses(state))?,
            Self::FACET_ADDRESS => {
                let queried: Selector = calldata::decode_one(args)?;
                calldata::encode_one(facet_address(state, queried)?)?
            }
            Self::SUPPORTS_INTERFACE => {
                let id: u32 = calldata::decode_one(args)?;
                calldata::encode_one(supports_interface(state, InterfaceId::new(id)))?
            }
            other => {
                return Err(DispatchError::UnservedSelector(Selector::from_signature(other)).into());
            }
        };

        Ok(out)
    }
}

///
/// TESTS
///
