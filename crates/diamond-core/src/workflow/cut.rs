use crate::{
    Error,
    dto::cut::{DiamondCutArgs, InitCall},
    exec::ExecutionContext,
    ids::is_zero_address,
    log,
    log::Topic,
    ops::{
        code::CodeOps,
        cut::{CutError, FacetCutOps},
    },
    storage::DiamondState,
    workflow::ExecEnv,
};

///
/// CutWorkflow
///
/// Applies every operation of a cut in submission order, then runs the
/// optional initializer against the same staged state.
///

pub struct CutWorkflow;

impl CutWorkflow {
    pub fn apply(state: &mut DiamondState, env: &ExecEnv<'_>, args: &DiamondCutArgs) -> Result<(), Error> {
        for (index, cut) in args.cuts.iter().enumerate() {
            FacetCutOps::apply(state, env.host, cut).inspect_err(|err| {
                log!(
                    Topic::Cut,
                    Warn,
                    "op {index} ({} facet={}) rejected: {err}",
                    cut.action,
                    cut.facet_address
                );
            })?;
        }

        debug_assert!(state.registry().validate_invariants().is_ok());

        match &args.init {
            Some(init) => Self::initialize(state, env, init),
            None => Ok(()),
        }
    }

    // A zero target skips execution entirely, whatever the payload.
    fn initialize(state: &mut DiamondState, env: &ExecEnv<'_>, init: &InitCall) -> Result<(), Error> {
        if is_zero_address(&init.target) {
            return Ok(());
        }

        let code = CodeOps::enforce_has_code(env.host, init.target)?;
        let mut ctx = ExecutionContext::new(env.diamond, env.caller, state);

        match code.execute(&mut ctx, &init.payload) {
            Ok(_) => {
                log!(Topic::Init, Debug, "initializer {} completed", init.target);
                Ok(())
            }
            Err(revert) if revert.is_empty() => Err(CutError::InitializerFailed {
                target: init.target,
                payload: init.payload.clone(),
            }
            .into()),
            Err(revert) => {
                log!(Topic::Init, Warn, "initializer {} reverted: {revert}", init.target);
                Err(Error::Reverted(revert))
            }
        }
    }
}

///
/// TESTS
///
