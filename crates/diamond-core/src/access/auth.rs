//! Cut authorization.
//!
//! The diamond consults a [`CutAuthority`] before accepting any batch. The
//! authority sees only the caller and the diamond id and returns admit/deny;
//! key, signature or session checks belong inside custom implementations.

use crate::{
    ThisError,
    config::{AccessConfig, AccessMode},
};
use candid::Principal;
use std::collections::BTreeSet;

///
/// AuthError
///
/// Each variant captures the principal that failed a rule, so denials can be
/// logged with actionable detail.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum AuthError {
    #[error("caller '{0}' was denied: {1}")]
    Denied(Principal, String),

    #[error("expected owner '{1}' got '{0}'")]
    NotOwner(Principal, Principal),

    #[error("caller '{0}' is not the diamond itself")]
    NotSelf(Principal),

    #[error("caller '{0}' is not on the whitelist")]
    NotWhitelisted(Principal),
}

///
/// CutAuthority
///

pub trait CutAuthority: Send + Sync {
    fn authorize(&self, caller: Principal, diamond: Principal) -> Result<(), AuthError>;
}

///
/// SelfOnly
/// Admits only calls issued by the diamond itself.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SelfOnly;

impl CutAuthority for SelfOnly {
    fn authorize(&self, caller: Principal, diamond: Principal) -> Result<(), AuthError> {
        if caller == diamond {
            Ok(())
        } else {
            Err(AuthError::NotSelf(caller))
        }
    }
}

///
/// OwnerOnly
///

#[derive(Clone, Copy, Debug)]
pub struct OwnerOnly(pub Principal);

impl CutAuthority for OwnerOnly {
    fn authorize(&self, caller: Principal, _: Principal) -> Result<(), AuthError> {
        if caller == self.0 {
            Ok(())
        } else {
            Err(AuthError::NotOwner(caller, self.0))
        }
    }
}

///
/// Whitelist
///

#[derive(Clone, Debug, Default)]
pub struct Whitelist(pub BTreeSet<Principal>);

impl Whitelist {
    #[must_use]
    pub fn new(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self(principals.into_iter().collect())
    }
}

impl CutAuthority for Whitelist {
    fn authorize(&self, caller: Principal, _: Principal) -> Result<(), AuthError> {
        if self.0.contains(&caller) {
            Ok(())
        } else {
            Err(AuthError::NotWhitelisted(caller))
        }
    }
}

impl<F> CutAuthority for F
where
    F: Fn(Principal, Principal) -> bool + Send + Sync,
{
    fn authorize(&self, caller: Principal, diamond: Principal) -> Result<(), AuthError> {
        if self(caller, diamond) {
            Ok(())
        } else {
            Err(AuthError::Denied(caller, "rejected by custom authority".to_string()))
        }
    }
}

/// Build the authority described by an access config section.
#[must_use]
pub fn authority_from_config(cfg: &AccessConfig) -> Box<dyn CutAuthority> {
    match (cfg.mode, cfg.principals.first()) {
        (AccessMode::Owner, Some(owner)) => Box::new(OwnerOnly(*owner)),
        (AccessMode::Whitelist, _) => Box::new(Whitelist::new(cfg.principals.iter().copied())),
        // validated configs never reach Owner without a principal
        (AccessMode::SelfOnly | AccessMode::Owner, _) => Box::new(SelfOnly),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> Principal {
        Principal::from_slice(&[id; 29])
    }

    #[test]
    fn self_only_admits_the_diamond() {
        assert!(SelfOnly.authorize(p(1), p(1)).is_ok());
        assert!(matches!(
            SelfOnly.authorize(p(2), p(1)),
            Err(AuthError::NotSelf(c)) if c == p(2)
        ));
    }

    #[test]
    fn owner_and_whitelist_rules() {
        assert!(OwnerOnly(p(3)).authorize(p(3), p(1)).is_ok());
        assert!(OwnerOnly(p(3)).authorize(p(4), p(1)).is_err());

        let list = Whitelist::new([p(5), p(6)]);
        assert!(list.authorize(p(6), p(1)).is_ok());
        assert!(matches!(list.authorize(p(7), p(1)), Err(AuthError::NotWhitelisted(_))));
    }

    #[test]
    fn closures_act_as_authorities() {
        let even = |caller: Principal, _: Principal| caller.as_slice()[0] % 2 == 0;

        assert!(even.authorize(p(2), p(1)).is_ok());
        assert!(matches!(even.authorize(p(3), p(1)), Err(AuthError::Denied(..))));
    }

    #[test]
    fn config_selects_rule() {
        let cfg = AccessConfig {
            mode: AccessMode::Owner,
            principals: vec![p(9)],
        };
        let authority = authority_from_config(&cfg);

        assert!(authority.authorize(p(9), p(1)).is_ok());
        assert!(authority.authorize(p(1), p(1)).is_err());

        let authority = authority_from_config(&AccessConfig::default());
        assert!(authority.authorize(p(1), p(1)).is_ok());
    }
}
