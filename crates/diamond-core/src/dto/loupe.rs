use crate::dto::prelude::*;

///
/// FacetView
///
/// One row of the loupe: a registered facet and the selectors it serves, in
/// registry order (which is not stable across removals).
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FacetView {
    pub facet_address: Principal,
    pub selectors: Vec<Selector>,
}
