use crate::dto::{cut::FacetCut, prelude::*};

///
/// DiamondCutRecord
///
/// Audit record emitted once per committed cut. It reproduces the submitted
/// operations, the initializer target (zero address when none ran) and the
/// initializer payload.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiamondCutRecord {
    pub sequence: u64,
    pub cuts: Vec<FacetCut>,
    pub init: Principal,
    #[serde(with = "serde_bytes")]
    pub calldata: Vec<u8>,
}
