//! Mechanical, reusable operations between the workflows and storage.
//!
//! Ops validate one facet cut at a time and translate it into registry
//! primitives. They never commit; the caller owns the staged state.

pub mod code;
pub mod cut;
