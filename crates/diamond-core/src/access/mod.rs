//! Boundary enforcement for mutating diamond calls.
//!
//! `auth` decides who may cut; `guard` serializes writers and rejects
//! re-entry from inside a running mutation.

pub mod auth;
pub mod guard;

use crate::ThisError;

///
/// AccessError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum AccessError {
    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    #[error(transparent)]
    Guard(#[from] guard::GuardError),
}
