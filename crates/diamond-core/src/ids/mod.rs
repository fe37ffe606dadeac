//!
//! Strongly-typed identifiers shared across the storage, ops and endpoint
//! layers: dispatch selectors, interface ids and the zero-address sentinel
//! used for facet principals.
//!

mod address;
mod interface;
mod selector;

pub use address::*;
pub use interface::*;
pub use selector::*;
