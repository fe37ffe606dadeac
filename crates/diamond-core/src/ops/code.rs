use crate::{
    exec::{CodeHost, FacetCode},
    ops::cut::CutError,
};
use candid::Principal;
use std::sync::Arc;

///
/// CodeOps
///

pub struct CodeOps;

impl CodeOps {
    /// Resolve the code deployed at `target`, failing with `MissingCode`.
    pub fn enforce_has_code(
        host: &dyn CodeHost,
        target: Principal,
    ) -> Result<Arc<dyn FacetCode>, CutError> {
        host.code(&target).ok_or(CutError::MissingCode(target))
    }
}
