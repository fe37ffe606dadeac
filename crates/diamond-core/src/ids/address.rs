use candid::Principal;

///
/// ZERO_ADDRESS
///
/// The empty principal stands in for "no facet": it is the mandatory facet of
/// a Remove cut and the target value that disables the initializer.
///

pub const ZERO_ADDRESS: Principal = Principal::management_canister();

/// Returns true when `pid` is the zero-address sentinel.
#[must_use]
pub fn is_zero_address(pid: &Principal) -> bool {
    pid.as_slice().is_empty()
}

///
/// TESTS
///
