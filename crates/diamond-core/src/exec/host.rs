use crate::exec::FacetCode;
use candid::Principal;
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

///
/// CodeHost
///
/// Where facet code lives. A facet address "has code" exactly when the host
/// returns something for it.
///

pub trait CodeHost: Send + Sync {
    fn code(&self, address: &Principal) -> Option<Arc<dyn FacetCode>>;

    fn has_code(&self, address: &Principal) -> bool {
        self.code(address).is_some()
    }
}

///
/// InMemoryCodeHost
///
/// Host-side code registry. Deploying over an existing address replaces the
/// code; diamonds pick up the change on their next call.
///

#[derive(Default)]
pub struct InMemoryCodeHost {
    code: RwLock<BTreeMap<Principal, Arc<dyn FacetCode>>>,
}

impl InMemoryCodeHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy(&self, address: Principal, code: Arc<dyn FacetCode>) {
        self.code
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address, code);
    }

    pub fn undeploy(&self, address: &Principal) -> bool {
        self.code
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(address)
            .is_some()
    }

    #[must_use]
    pub fn addresses(&self) -> Vec<Principal> {
        self.code
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }
}

impl CodeHost for InMemoryCodeHost {
    fn code(&self, address: &Principal) -> Option<Arc<dyn FacetCode>> {
        self.code
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{ExecutionContext, Revert};

    fn noop(_: &mut ExecutionContext<'_>, _: &[u8]) -> Result<Vec<u8>, Revert> {
        Ok(Vec::new())
    }

    #[test]
    fn deploy_and_undeploy() {
        let host = InMemoryCodeHost::new();
        let addr = Principal::from_slice(&[5; 29]);

        assert!(!host.has_code(&addr));

        host.deploy(addr, Arc::new(noop));
        assert!(host.has_code(&addr));
        assert_eq!(host.addresses(), vec![addr]);

        assert!(host.undeploy(&addr));
        assert!(!host.has_code(&addr));
        assert!(!host.undeploy(&addr));
    }
}
