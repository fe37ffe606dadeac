//! Public façade.
//!
//! [`Diamond`] is the only entry point that mutates state. Every mutation
//! stages a copy of the current state, runs the workflow against it, and
//! swaps the copy in only on success. Readers always see a committed
//! snapshot.

pub mod builder;
pub mod diamond;
pub mod loupe;

pub use builder::DiamondBuilder;
pub use diamond::Diamond;
pub use loupe::{BuiltinLoupe, LoupeError};
