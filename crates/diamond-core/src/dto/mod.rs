pub mod audit;
pub mod cut;
pub mod error;
pub mod loupe;

///
/// PRELUDE
///

pub mod prelude {
    pub use crate::ids::{InterfaceId, Selector};
    pub use candid::{CandidType, Principal};
    pub use derive_more::Display;
    pub use serde::{Deserialize, Serialize};
}
