//! Canned facet behaviours.
//!
//! Each constructor returns code ready to [`deploy`](crate::Harness::deploy).
//! Facets that touch state use a slot namespace of their own so tests can
//! observe exactly what committed.

use diamond_core::{
    exec::{FacetCode, Revert, calldata, from_fn},
    ids::InterfaceId,
};
use std::sync::Arc;

/// Slot written by [`counter`].
pub const COUNTER_SLOT: &str = "testkit.counter";

/// Slot written by [`reverting`] before it reverts.
pub const SCRATCH_SLOT: &str = "testkit.scratch";

/// Slot holding the last calldata seen by [`recorder`].
pub const RECORD_SLOT: &str = "testkit.record";

/// Returns nothing, touches nothing.
#[must_use]
pub fn noop() -> Arc<dyn FacetCode> {
    from_fn(|_, _| Ok(Vec::new()))
}

/// Returns the argument bytes that follow the selector.
#[must_use]
pub fn echo() -> Arc<dyn FacetCode> {
    from_fn(|_, input| {
        calldata::split(input)
            .map(|(_, args)| args.to_vec())
            .ok_or_else(|| Revert::message("echo: no selector"))
    })
}

/// Increments a `u64` in [`COUNTER_SLOT`] and returns the new value,
/// candid-encoded.
#[must_use]
pub fn counter() -> Arc<dyn FacetCode> {
    from_fn(|ctx, _| {
        let next = ctx.load::<u64>(COUNTER_SLOT)?.unwrap_or_default() + 1;
        ctx.store(COUNTER_SLOT, &next)?;

        calldata::encode_one(next)
    })
}

/// Stores its full input in [`RECORD_SLOT`], the caller under
/// `RECORD_SLOT.caller`, and succeeds.
#[must_use]
pub fn recorder() -> Arc<dyn FacetCode> {
    from_fn(|ctx, input| {
        let caller = ctx.caller();
        ctx.set_slot(RECORD_SLOT, input.to_vec());
        ctx.set_slot(&format!("{RECORD_SLOT}.caller"), caller.as_slice().to_vec());

        Ok(Vec::new())
    })
}

/// Writes [`SCRATCH_SLOT`] and an interface flag, then reverts with
/// `payload`. Nothing it wrote may survive.
#[must_use]
pub fn reverting(payload: Vec<u8>) -> Arc<dyn FacetCode> {
    from_fn(move |ctx, _| {
        ctx.set_slot(SCRATCH_SLOT, b"dirty".to_vec());
        ctx.set_interface(InterfaceId::new(0xdead_beef), true);

        Err(Revert::new(payload.clone()))
    })
}

/// Initializer that marks every id in `ids` as supported.
#[must_use]
pub fn interface_setter(ids: Vec<InterfaceId>) -> Arc<dyn FacetCode> {
    from_fn(move |ctx, _| {
        for id in &ids {
            ctx.set_interface(*id, true);
        }

        Ok(Vec::new())
    })
}
