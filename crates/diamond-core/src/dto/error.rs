use crate::dto::prelude::*;
use std::fmt::{self, Display};

///
/// ErrorView
///
/// Boundary error envelope. Internal errors keep their structure; this is the
/// flattened form handed to candid consumers.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorView {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorView {
    #[must_use]
    pub const fn new(code: ErrorCode, message: String) -> Self {
        Self { code, message }
    }
}

impl Display for ErrorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

///
/// ErrorCode
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
#[remain::sorted]
pub enum ErrorCode {
    Conflict,
    Internal,
    InvalidInput,
    InvariantViolation,
    NotFound,
    Reverted,
    Unauthorized,
}
