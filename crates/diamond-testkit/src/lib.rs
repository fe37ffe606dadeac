//! Test utilities and fixtures for exercising diamonds.
//!
//! Provides stable dummy principals and selectors, a handful of canned facet
//! behaviours, and a [`Harness`] that wires an in-memory code host to a
//! diamond guarded by a single owner.

pub mod facet;

use candid::Principal;
use diamond_core::{
    Diamond, DiamondBuilder, Error,
    access::auth::OwnerOnly,
    exec::{CodeHost, FacetCode, InMemoryCodeHost},
    ids::Selector,
};
use std::sync::Arc;

///
/// Deterministic dummy-value generator for tests.
///

pub struct Fake;

impl Fake {
    ///
    /// Deterministically derive a [`Principal`] from `seed`.
    ///
    #[must_use]
    pub fn principal(seed: u32) -> Principal {
        let mut buf = [0u8; 29];
        buf[..4].copy_from_slice(&seed.to_be_bytes());

        Principal::from_slice(&buf)
    }

    /// Selector for a synthetic signature `fn_<seed>()`.
    #[must_use]
    pub fn selector(seed: u32) -> Selector {
        Selector::from_signature(&format!("fn_{seed}()"))
    }

    #[must_use]
    pub fn selectors(seeds: impl IntoIterator<Item = u32>) -> Vec<Selector> {
        seeds.into_iter().map(Self::selector).collect()
    }
}

///
/// Harness
///
/// Shared host plus the identities a test needs: the diamond itself and the
/// single owner allowed to cut it.
///

pub struct Harness {
    pub id: Principal,
    pub owner: Principal,
    pub host: Arc<InMemoryCodeHost>,
}

impl Harness {
    pub const DIAMOND_SEED: u32 = 1_000_000;
    pub const OWNER_SEED: u32 = 1;

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Fake::principal(Self::DIAMOND_SEED),
            owner: Fake::principal(Self::OWNER_SEED),
            host: Arc::new(InMemoryCodeHost::new()),
        }
    }

    /// Deploy `code` at the address derived from `seed`.
    pub fn deploy(&self, seed: u32, code: Arc<dyn FacetCode>) -> Principal {
        let address = Fake::principal(seed);
        self.host.deploy(address, code);

        address
    }

    /// Builder for a diamond only `owner` may cut.
    #[must_use]
    pub fn builder(&self) -> DiamondBuilder {
        let host: Arc<dyn CodeHost> = self.host.clone();

        DiamondBuilder::new(self.id, host).authority(OwnerOnly(self.owner))
    }

    /// Build the default owner-gated diamond.
    pub fn diamond(&self) -> Result<Diamond, Error> {
        self.builder().build()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
