//! Delegated execution.
//!
//! Facet code never owns state. Every call, whether routed through dispatch or
//! issued as a cut initializer, receives an [`ExecutionContext`] over the
//! diamond's own (staged) state. Whatever the code writes there commits or
//! rolls back together with the surrounding operation.

pub mod calldata;
mod context;
mod host;

pub use context::ExecutionContext;
pub use host::{CodeHost, InMemoryCodeHost};

use crate::{ThisError, utils::format::to_hex};
use std::sync::Arc;

///
/// Revert
///
/// Failure payload returned by facet code. The bytes are opaque to the
/// diamond and are surfaced to callers unchanged; an empty payload carries no
/// diagnostics.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, ThisError)]
#[error("facet reverted with payload {}", to_hex(.0))]
pub struct Revert(Vec<u8>);

impl Revert {
    #[must_use]
    pub const fn new(payload: Vec<u8>) -> Self {
        Self(payload)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Revert with a UTF-8 reason string.
    #[must_use]
    pub fn message(reason: &str) -> Self {
        Self(reason.as_bytes().to_vec())
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

///
/// FacetCode
///
/// Executable code deployed at a facet address. `calldata` is the full call
/// input: for routed calls it starts with the selector, for initializer calls
/// it is the initializer payload as submitted.
///
/// Code runs while the diamond's writer slot is held. Calling back into the
/// diamond from the same thread fails with `Reentrant`; a nested mutation
/// issued from another thread must use `Diamond::try_diamond_cut`, since a
/// blocking `diamond_cut` there waits for the running call to finish.
///

pub trait FacetCode: Send + Sync {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, calldata: &[u8]) -> Result<Vec<u8>, Revert>;
}

impl<F> FacetCode for F
where
    F: Fn(&mut ExecutionContext<'_>, &[u8]) -> Result<Vec<u8>, Revert> + Send + Sync,
{
    fn execute(&self, ctx: &mut ExecutionContext<'_>, calldata: &[u8]) -> Result<Vec<u8>, Revert> {
        self(ctx, calldata)
    }
}

/// Wrap a closure as shareable facet code.
pub fn from_fn<F>(f: F) -> Arc<dyn FacetCode>
where
    F: Fn(&mut ExecutionContext<'_>, &[u8]) -> Result<Vec<u8>, Revert> + Send + Sync + 'static,
{
    Arc::new(f)
}

///
/// TESTS
///
