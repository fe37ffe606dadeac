//! Public error surface.
//!
//! Internal layers raise their own typed errors; this enum collects them so
//! callers match on one type, and maps each to a stable [`ErrorCode`].

use crate::{
    ThisError,
    access::{AccessError, auth::AuthError, guard::GuardError},
    api::loupe::LoupeError,
    config::ConfigError,
    dto::error::{ErrorCode, ErrorView},
    exec::Revert,
    storage::RegistryError,
    utils::serialize::SerializeError,
};

pub use crate::{ops::cut::CutError, workflow::dispatch::DispatchError};

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cut(#[from] CutError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Loupe(#[from] LoupeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Facet or initializer revert, payload preserved byte for byte.
    #[error(transparent)]
    Reverted(#[from] Revert),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl Error {
    /// Stable classification for callers and wire views.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Access(AccessError::Auth(_)) => ErrorCode::Unauthorized,
            Self::Access(AccessError::Guard(_))
            | Self::Registry(
                RegistryError::DuplicateRegistration(_) | RegistryError::ImmutableSelector(_),
            ) => ErrorCode::Conflict,
            Self::Config(_)
            | Self::Dispatch(DispatchError::MalformedCalldata { .. })
            | Self::Cut(
                CutError::EmptySelectorList { .. }
                | CutError::NoOpReplace(_)
                | CutError::NonZeroFacetOnRemove(_)
                | CutError::ZeroAddressFacet { .. },
            ) => ErrorCode::InvalidInput,
            Self::Cut(CutError::MissingCode(_))
            | Self::Dispatch(
                DispatchError::FunctionDoesNotExist(_)
                | DispatchError::MissingCode(_)
                | DispatchError::UnservedSelector(_),
            )
            | Self::Loupe(_)
            | Self::Registry(RegistryError::SelectorNotFound(_)) => ErrorCode::NotFound,
            Self::Cut(CutError::InitializerFailed { .. }) | Self::Reverted(_) => {
                ErrorCode::Reverted
            }
            Self::Registry(RegistryError::InvariantViolation(_)) => ErrorCode::InvariantViolation,
            Self::Serialize(_) => ErrorCode::Internal,
        }
    }

    /// Revert payload carried by this error, if a facet supplied one.
    #[must_use]
    pub fn revert_payload(&self) -> Option<&[u8]> {
        match self {
            Self::Reverted(revert) => Some(revert.payload()),
            _ => None,
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Self::Access(AccessError::Auth(err))
    }
}

impl From<GuardError> for Error {
    fn from(err: GuardError) -> Self {
        Self::Access(AccessError::Guard(err))
    }
}

impl From<&Error> for ErrorView {
    fn from(err: &Error) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<Error> for ErrorView {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Selector;

    #[test]
    fn codes_classify_layers() {
        let err: Error = GuardError::Reentrant.into();
        assert_eq!(err.code(), ErrorCode::Conflict);

        let err: Error = RegistryError::SelectorNotFound(Selector::new(1)).into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err: Error = CutError::NoOpReplace(Selector::new(1)).into();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    #[test]
    fn revert_payload_passes_through_to_view() {
        let err: Error = Revert::new(vec![0xca, 0xfe]).into();

        assert_eq!(err.revert_payload(), Some(&[0xca, 0xfe][..]));

        let view = ErrorView::from(&err);
        assert_eq!(view.code, ErrorCode::Reverted);
        assert_eq!(view.message, "facet reverted with payload 0xcafe");
    }
}
