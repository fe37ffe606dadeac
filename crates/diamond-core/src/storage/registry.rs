//! DiamondRegistry
//!
//! Authoritative mapping between selectors and the facets that serve them.
//!
//! Invariants (hold after every completed mutation):
//! - Every selector in a facet's list maps back to that facet, and every
//!   mapped selector appears in its facet's list exactly once.
//! - Recorded positions equal the true index in the corresponding list.
//! - The facet list has no duplicates and holds a facet iff it owns at least
//!   one selector.
//! - An unregistered selector has no entry at all.
//!
//! Removal uses swap-and-pop compaction, so neither selector order within a
//! facet nor facet order is stable across removals.

use crate::{ThisError, ids::Selector};
use candid::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("selector {0} is already registered")]
    DuplicateRegistration(Selector),

    #[error("selector {0} is served by the diamond itself and is immutable")]
    ImmutableSelector(Selector),

    #[error("registry invariant violated: {0}")]
    InvariantViolation(String),

    #[error("selector {0} is not registered")]
    SelectorNotFound(Selector),
}

///
/// SelectorSlot
///
/// Owning facet of a selector and the selector's index in that facet's list.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectorSlot {
    pub facet: Principal,
    pub position: usize,
}

///
/// FacetSlot
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct FacetSlot {
    selectors: Vec<Selector>,
    position: usize,
}

///
/// DiamondRegistry
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiamondRegistry {
    diamond: Principal,
    selectors: BTreeMap<Selector, SelectorSlot>,
    facets: BTreeMap<Principal, FacetSlot>,
    facet_addresses: Vec<Principal>,
}

impl DiamondRegistry {
    #[must_use]
    pub const fn new(diamond: Principal) -> Self {
        Self {
            diamond,
            selectors: BTreeMap::new(),
            facets: BTreeMap::new(),
            facet_addresses: Vec::new(),
        }
    }

    //
    // Core accessors
    //

    /// The diamond that hosts this registry. Selectors it owns are immutable.
    #[must_use]
    pub const fn diamond(&self) -> Principal {
        self.diamond
    }

    #[must_use]
    pub fn slot(&self, selector: Selector) -> Option<SelectorSlot> {
        self.selectors.get(&selector).copied()
    }

    #[must_use]
    pub fn facet_of(&self, selector: Selector) -> Option<Principal> {
        self.slot(selector).map(|slot| slot.facet)
    }

    #[must_use]
    pub fn contains_facet(&self, facet: &Principal) -> bool {
        self.facets.contains_key(facet)
    }

    /// Selectors served by `facet`, empty when the facet is unregistered.
    #[must_use]
    pub fn selectors_of(&self, facet: &Principal) -> &[Selector] {
        self.facets
            .get(facet)
            .map_or(&[], |slot| slot.selectors.as_slice())
    }

    #[must_use]
    pub fn facet_addresses(&self) -> &[Principal] {
        &self.facet_addresses
    }

    /// Facets with their selectors, in facet-list order.
    pub fn facets(&self) -> impl Iterator<Item = (Principal, &[Selector])> + '_ {
        self.facet_addresses
            .iter()
            .map(|facet| (*facet, self.selectors_of(facet)))
    }

    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    //
    // Mutation primitives
    //

    /// Register `selector` under `facet`, appending it to the facet's list.
    /// The facet joins the facet list with its first selector.
    pub(crate) fn add_selector(
        &mut self,
        selector: Selector,
        facet: Principal,
    ) -> Result<(), RegistryError> {
        if self.selectors.contains_key(&selector) {
            return Err(RegistryError::DuplicateRegistration(selector));
        }

        if !self.facets.contains_key(&facet) {
            self.add_facet(facet);
        }

        let Some(facet_slot) = self.facets.get_mut(&facet) else {
            return Err(RegistryError::InvariantViolation(format!(
                "facet {facet} missing right after insertion"
            )));
        };

        let position = facet_slot.selectors.len();
        facet_slot.selectors.push(selector);
        self.selectors
            .insert(selector, SelectorSlot { facet, position });

        Ok(())
    }

    /// Unregister `selector` and return the facet that served it.
    ///
    /// The facet's last selector moves into the vacated slot. When the facet
    /// is left without selectors it is dropped from the facet list the same
    /// way.
    pub(crate) fn remove_selector(&mut self, selector: Selector) -> Result<Principal, RegistryError> {
        let Some(slot) = self.slot(selector) else {
            return Err(RegistryError::SelectorNotFound(selector));
        };

        if slot.facet == self.diamond {
            return Err(RegistryError::ImmutableSelector(selector));
        }

        let Some(facet_slot) = self.facets.get_mut(&slot.facet) else {
            return Err(RegistryError::InvariantViolation(format!(
                "selector {selector} points at unlisted facet {}",
                slot.facet
            )));
        };

        if facet_slot.selectors.get(slot.position) != Some(&selector) {
            return Err(RegistryError::InvariantViolation(format!(
                "selector {selector} recorded at stale position {}",
                slot.position
            )));
        }

        facet_slot.selectors.swap_remove(slot.position);

        if let Some(moved) = facet_slot.selectors.get(slot.position).copied()
            && let Some(moved_slot) = self.selectors.get_mut(&moved)
        {
            moved_slot.position = slot.position;
        }

        let facet_emptied = facet_slot.selectors.is_empty();
        self.selectors.remove(&selector);

        if facet_emptied {
            self.remove_facet(slot.facet);
        }

        Ok(slot.facet)
    }

    fn add_facet(&mut self, facet: Principal) {
        let position = self.facet_addresses.len();

        self.facet_addresses.push(facet);
        self.facets.insert(
            facet,
            FacetSlot {
                selectors: Vec::new(),
                position,
            },
        );
    }

    fn remove_facet(&mut self, facet: Principal) {
        let Some(removed) = self.facets.remove(&facet) else {
            return;
        };

        if removed.position >= self.facet_addresses.len() {
            return;
        }

        self.facet_addresses.swap_remove(removed.position);

        if let Some(moved) = self.facet_addresses.get(removed.position).copied()
            && let Some(moved_slot) = self.facets.get_mut(&moved)
        {
            moved_slot.position = removed.position;
        }
    }

    //
    // Invariants
    //

    /// Check every structural invariant, reporting the first violation.
    pub fn validate_invariants(&self) -> Result<(), RegistryError> {
        let violation = |msg: String| Err(RegistryError::InvariantViolation(msg));

        if self.facet_addresses.len() != self.facets.len() {
            return violation(format!(
                "facet list has {} entries but {} facets are tracked",
                self.facet_addresses.len(),
                self.facets.len()
            ));
        }

        let mut listed_selectors = 0;

        for (index, facet) in self.facet_addresses.iter().enumerate() {
            let Some(facet_slot) = self.facets.get(facet) else {
                return violation(format!("facet {facet} is listed but not tracked"));
            };

            if facet_slot.position != index {
                return violation(format!(
                    "facet {facet} records position {} but sits at {index}",
                    facet_slot.position
                ));
            }

            if facet_slot.selectors.is_empty() {
                return violation(format!("facet {facet} is listed without selectors"));
            }

            for (position, selector) in facet_slot.selectors.iter().enumerate() {
                match self.selectors.get(selector) {
                    None => {
                        return violation(format!(
                            "selector {selector} listed by {facet} has no map entry"
                        ));
                    }
                    Some(slot) if slot.facet != *facet || slot.position != position => {
                        return violation(format!(
                            "selector {selector} maps to {}@{} but is listed by {facet}@{position}",
                            slot.facet, slot.position
                        ));
                    }
                    Some(_) => {}
                }
            }

            listed_selectors += facet_slot.selectors.len();
        }

        if listed_selectors != self.selectors.len() {
            return violation(format!(
                "{} selectors mapped but {listed_selectors} listed",
                self.selectors.len()
            ));
        }

        Ok(())
    }
}

///
/// TESTS
///
