//! Core library for facet-composed diamonds.
//!
//! A diamond is a single addressable entity whose callable surface is
//! assembled at run time from independently deployed facets. Each facet
//! contributes a set of 4-byte selectors; the diamond resolves every incoming
//! selector to its facet and runs that facet's code against the diamond's own
//! state.
//!
//! ## Layering
//!
//! - `api/` exposes [`Diamond`](api::Diamond) and its builder, the only
//!   public entry point for mutation.
//! - `access/` holds the cut authority gate and the single-writer lock.
//! - `workflow/` sequences a cut (operations, then initializer) and routed
//!   dispatch.
//! - `ops/` enforces per-action validation over the storage primitives.
//! - `storage/` owns the registry aggregate and its invariant-preserving
//!   mutation primitives.
//! - `exec/` defines the delegated-execution seam (`FacetCode`, `CodeHost`).
//!
//! The default flow is: api → workflow → ops → storage.

pub mod access;
pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod exec;
pub mod ids;
pub mod log;
pub mod storage;

pub(crate) mod ops;
pub(crate) mod workflow;

pub use ::diamond_utils as utils;
pub use api::{Diamond, DiamondBuilder};
pub use error::Error;
pub use thiserror::Error as ThisError;

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
