use crate::{
    Error, ThisError,
    exec::{ExecutionContext, calldata},
    ids::Selector,
    storage::{DiamondRegistry, DiamondState},
    workflow::ExecEnv,
};
use candid::Principal;

///
/// DispatchError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum DispatchError {
    #[error("function does not exist: {0}")]
    FunctionDoesNotExist(Selector),

    #[error("calldata of {len} bytes is too short to carry a selector")]
    MalformedCalldata { len: usize },

    #[error("facet {0} has no code")]
    MissingCode(Principal),

    #[error("selector {0} is served by the diamond but has no built-in handler")]
    UnservedSelector(Selector),
}

///
/// DispatchWorkflow
///

pub struct DispatchWorkflow;

impl DispatchWorkflow {
    /// Extract the selector from raw calldata.
    pub fn selector(calldata: &[u8]) -> Result<(Selector, &[u8]), DispatchError> {
        calldata::split(calldata).ok_or(DispatchError::MalformedCalldata {
            len: calldata.len(),
        })
    }

    /// Resolve the facet serving `selector`.
    pub fn route(registry: &DiamondRegistry, selector: Selector) -> Result<Principal, DispatchError> {
        registry
            .facet_of(selector)
            .ok_or(DispatchError::FunctionDoesNotExist(selector))
    }

    /// Run the facet serving the calldata's selector against staged state.
    pub fn execute(state: &mut DiamondState, env: &ExecEnv<'_>, input: &[u8]) -> Result<Vec<u8>, Error> {
        let (selector, _) = Self::selector(input)?;
        let facet = Self::route(state.registry(), selector)?;

        if facet == env.diamond {
            return Err(DispatchError::UnservedSelector(selector).into());
        }

        let code = env
            .host
            .code(&facet)
            .ok_or(DispatchError::MissingCode(facet))?;
        let mut ctx = ExecutionContext::new(env.diamond, env.caller, state);

        code.execute(&mut ctx, input).map_err(Error::Reverted)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{InMemoryCodeHost, Revert};
    use std::sync::Arc;

    fn p(id: u8) -> Principal {
        Principal::from_slice(&[id; 29])
    }

    fn echo(ctx: &mut ExecutionContext<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        ctx.set_slot("echo", input.to_vec());
        Ok(input[4..].to_vec())
    }

    #[test]
    fn routes_to_registered_facet_with_full_calldata() {
        let host = InMemoryCodeHost::new();
        host.deploy(p(1), Arc::new(echo));
        let mut st = DiamondState::new(p(99));
        st.registry_mut().add_selector(Selector::new(7), p(1)).unwrap();
        let env = ExecEnv {
            diamond: p(99),
            caller: p(5),
            host: &host,
        };
        let input = calldata::encode(Selector::new(7), b"hi");

        let out = DispatchWorkflow::execute(&mut st, &env, &input).unwrap();

        assert_eq!(out, b"hi");
        assert_eq!(st.slot("echo"), Some(input.as_slice()));
    }

    #[test]
    fn unknown_and_short_calldata_are_rejected() {
        let host = InMemoryCodeHost::new();
        let mut st = DiamondState::new(p(99));
        let env = ExecEnv {
            diamond: p(99),
            caller: p(5),
            host: &host,
        };

        let err = DispatchWorkflow::execute(&mut st, &env, &[1, 2]).unwrap_err();
        assert!(matches!(err, Error::Dispatch(DispatchError::MalformedCalldata { len: 2 })));

        let err = DispatchWorkflow::execute(&mut st, &env, &[0, 0, 0, 9]).unwrap_err();
        assert!(matches!(err, Error::Dispatch(DispatchError::FunctionDoesNotExist(_))));
    }
}
