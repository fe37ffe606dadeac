//! Persistent diamond state.
//!
//! Storage types own data and the minimal mutation primitives that keep their
//! internal bookkeeping consistent. Per-action validation (zero addresses,
//! no-op replaces, code checks) lives one layer up in `ops`.

pub mod audit;
pub mod registry;
pub mod state;

pub use audit::{AuditLog, AuditSink};
pub use registry::{DiamondRegistry, RegistryError, SelectorSlot};
pub use state::DiamondState;
