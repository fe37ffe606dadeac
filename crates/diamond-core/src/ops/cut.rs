//! Per-action validation for facet cuts.
//!
//! Each cut is checked and applied against a staged state. A failure leaves
//! the staged state partially edited; the caller discards it.

use crate::{
    Error, ThisError,
    dto::cut::{FacetCut, FacetCutAction},
    exec::CodeHost,
    ids::{Selector, is_zero_address},
    ops::code::CodeOps,
    storage::{DiamondRegistry, DiamondState, RegistryError},
    utils::format::to_hex,
};
use candid::Principal;

///
/// CutError
///
/// Validation and execution failures of a cut. Registry-level conflicts
/// (duplicates, missing or immutable selectors) surface as `RegistryError`.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum CutError {
    #[error("no selectors given for {action} cut of facet {facet}")]
    EmptySelectorList {
        action: FacetCutAction,
        facet: Principal,
    },

    #[error("initializer {target} failed without a revert payload (calldata {})", to_hex(.payload))]
    InitializerFailed { target: Principal, payload: Vec<u8> },

    #[error("address {0} has no code")]
    MissingCode(Principal),

    #[error("remove cut facet address must be the zero address, got {0}")]
    NonZeroFacetOnRemove(Principal),

    #[error("cannot replace selector {0} with the facet that already serves it")]
    NoOpReplace(Selector),

    #[error("cannot cut selectors {} to the zero address", selector_list(.selectors))]
    ZeroAddressFacet { selectors: Vec<Selector> },
}

fn selector_list(selectors: &[Selector]) -> String {
    selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

///
/// FacetCutOps
///

pub struct FacetCutOps;

impl FacetCutOps {
    /// Validate and apply a single cut.
    pub fn apply(state: &mut DiamondState, host: &dyn CodeHost, cut: &FacetCut) -> Result<(), Error> {
        if cut.selectors.is_empty() {
            return Err(CutError::EmptySelectorList {
                action: cut.action,
                facet: cut.facet_address,
            }
            .into());
        }

        let registry = state.registry_mut();

        match cut.action {
            FacetCutAction::Add => {
                Self::add_selectors(registry, host, cut.facet_address, &cut.selectors)
            }
            FacetCutAction::Replace => {
                Self::replace_selectors(registry, host, cut.facet_address, &cut.selectors)
            }
            FacetCutAction::Remove => {
                Self::remove_selectors(registry, cut.facet_address, &cut.selectors)
            }
        }
    }

    pub fn add_selectors(
        registry: &mut DiamondRegistry,
        host: &dyn CodeHost,
        facet: Principal,
        selectors: &[Selector],
    ) -> Result<(), Error> {
        Self::ensure_facet(registry, host, facet, selectors)?;

        for &selector in selectors {
            registry.add_selector(selector, facet)?;
        }

        Ok(())
    }

    pub fn replace_selectors(
        registry: &mut DiamondRegistry,
        host: &dyn CodeHost,
        facet: Principal,
        selectors: &[Selector],
    ) -> Result<(), Error> {
        Self::ensure_facet(registry, host, facet, selectors)?;

        for &selector in selectors {
            let Some(previous) = registry.facet_of(selector) else {
                return Err(RegistryError::SelectorNotFound(selector).into());
            };

            if previous == facet {
                return Err(CutError::NoOpReplace(selector).into());
            }

            registry.remove_selector(selector)?;
            registry.add_selector(selector, facet)?;
        }

        Ok(())
    }

    pub fn remove_selectors(
        registry: &mut DiamondRegistry,
        facet: Principal,
        selectors: &[Selector],
    ) -> Result<(), Error> {
        if !is_zero_address(&facet) {
            return Err(CutError::NonZeroFacetOnRemove(facet).into());
        }

        for &selector in selectors {
            registry.remove_selector(selector)?;
        }

        Ok(())
    }

    // A facet must be non-zero and, unless it is already registered or is the
    // diamond itself, carry code before it receives its first selector.
    fn ensure_facet(
        registry: &DiamondRegistry,
        host: &dyn CodeHost,
        facet: Principal,
        selectors: &[Selector],
    ) -> Result<(), CutError> {
        if is_zero_address(&facet) {
            return Err(CutError::ZeroAddressFacet {
                selectors: selectors.to_vec(),
            });
        }

        if facet != registry.diamond() && !registry.contains_facet(&facet) {
            CodeOps::enforce_has_code(host, facet)?;
        }

        Ok(())
    }
}

///
/// TESTS
///
