//! Orchestration over staged diamond state.
//!
//! Workflows sequence ops against a `DiamondState` the caller staged. They
//! never commit; on error the caller drops the staged copy.

pub mod cut;
pub mod dispatch;

use crate::exec::CodeHost;
use candid::Principal;

///
/// ExecEnv
///
/// Call-scoped inputs shared by cut and dispatch workflows.
///

#[derive(Clone, Copy)]
pub struct ExecEnv<'a> {
    pub diamond: Principal,
    pub caller: Principal,
    pub host: &'a dyn CodeHost,
}
