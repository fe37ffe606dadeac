use crate::{dto::prelude::*, ids::ZERO_ADDRESS};

///
/// FacetCutAction
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum FacetCutAction {
    Add,
    Replace,
    Remove,
}

///
/// FacetCut
///
/// One operation of a cut. Remove cuts address selectors only, so their
/// `facet_address` must be the zero address.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FacetCut {
    pub facet_address: Principal,
    pub action: FacetCutAction,
    pub selectors: Vec<Selector>,
}

impl FacetCut {
    #[must_use]
    pub const fn add(facet_address: Principal, selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Add,
            selectors,
        }
    }

    #[must_use]
    pub const fn replace(facet_address: Principal, selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Replace,
            selectors,
        }
    }

    #[must_use]
    pub const fn remove(selectors: Vec<Selector>) -> Self {
        Self {
            facet_address: ZERO_ADDRESS,
            action: FacetCutAction::Remove,
            selectors,
        }
    }
}

///
/// InitCall
///
/// One-shot call forwarded after every operation of a cut succeeded. The
/// target's code runs against the diamond's state.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InitCall {
    pub target: Principal,
    #[serde(with = "serde_bytes")]
    pub payload: Vec<u8>,
}

impl InitCall {
    #[must_use]
    pub const fn new(target: Principal, payload: Vec<u8>) -> Self {
        Self { target, payload }
    }
}

///
/// DiamondCutArgs
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiamondCutArgs {
    pub cuts: Vec<FacetCut>,
    pub init: Option<InitCall>,
}

impl DiamondCutArgs {
    #[must_use]
    pub const fn new(cuts: Vec<FacetCut>) -> Self {
        Self { cuts, init: None }
    }

    #[must_use]
    pub fn with_init(mut self, init: InitCall) -> Self {
        self.init = Some(init);
        self
    }
}
