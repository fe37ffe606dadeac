use crate::{
    Error,
    access::{auth::CutAuthority, guard::WriterLock},
    api::{
        DiamondBuilder,
        loupe::{self, BuiltinLoupe},
    },
    config::DiamondConfig,
    dto::{
        audit::DiamondCutRecord,
        cut::{DiamondCutArgs, FacetCut},
        loupe::FacetView,
    },
    exec::CodeHost,
    ids::{InterfaceId, Selector, ZERO_ADDRESS},
    log,
    log::Topic,
    storage::{AuditLog, AuditSink, DiamondState},
    workflow::{ExecEnv, cut::CutWorkflow, dispatch::DispatchWorkflow},
};
use candid::Principal;
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

///
/// Diamond
///
/// A facet-composed entity. Cuts and routed calls are serialized through a
/// single writer slot; loupe reads work on the last committed snapshot.
///

pub struct Diamond {
    pub(super) id: Principal,
    pub(super) config: DiamondConfig,
    pub(super) host: Arc<dyn CodeHost>,
    pub(super) authority: Box<dyn CutAuthority>,
    pub(super) state: RwLock<Arc<DiamondState>>,
    pub(super) writer: WriterLock,
    pub(super) audit: Mutex<AuditLog>,
    pub(super) sinks: Vec<Box<dyn AuditSink>>,
}

impl fmt::Debug for Diamond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diamond")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("writer_held", &self.writer.is_held())
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

impl Diamond {
    #[must_use]
    pub fn builder(id: Principal, host: Arc<dyn CodeHost>) -> DiamondBuilder {
        DiamondBuilder::new(id, host)
    }

    #[must_use]
    pub const fn id(&self) -> Principal {
        self.id
    }

    #[must_use]
    pub const fn config(&self) -> &DiamondConfig {
        &self.config
    }

    /// The last committed state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DiamondState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    //
    // Mutation
    //

    /// Apply a batch of facet cuts and the optional initializer atomically.
    ///
    /// Either every operation and the initializer succeed and the new state
    /// is committed and recorded in the audit log, or nothing changes.
    pub fn diamond_cut(&self, caller: Principal, args: DiamondCutArgs) -> Result<(), Error> {
        let _writer = self.writer.enter()?;
        self.authorize(caller)?;

        self.apply_cut(caller, args)
    }

    /// Like [`diamond_cut`](Self::diamond_cut), but fails with `Busy`
    /// instead of waiting when another mutation is in progress.
    pub fn try_diamond_cut(&self, caller: Principal, args: DiamondCutArgs) -> Result<(), Error> {
        let _writer = self.writer.try_enter()?;
        self.authorize(caller)?;

        self.apply_cut(caller, args)
    }

    /// Set one interface flag, leaving every other flag untouched.
    pub fn set_supports_interface(
        &self,
        caller: Principal,
        id: InterfaceId,
        supported: bool,
    ) -> Result<(), Error> {
        let _writer = self.writer.enter()?;
        self.authorize(caller)?;

        let mut staged = self.stage();
        staged.set_interface(id, supported);
        self.commit(staged);

        log!(Topic::Registry, Info, "interface {id} supported={supported}");

        Ok(())
    }

    /// Route `calldata` to the facet serving its selector.
    ///
    /// Selectors owned by the diamond are answered by the built-in loupe from
    /// the committed snapshot. Everything else runs facet code against a
    /// staged state that commits only when the facet returns normally.
    pub fn dispatch(&self, caller: Principal, calldata: &[u8]) -> Result<Vec<u8>, Error> {
        let (selector, args) = DispatchWorkflow::selector(calldata)?;

        let snapshot = self.snapshot();
        let facet = DispatchWorkflow::route(snapshot.registry(), selector).inspect_err(|err| {
            log!(Topic::Dispatch, Debug, "dispatch miss caller={caller}: {err}");
        })?;

        if facet == self.id {
            return BuiltinLoupe::handle(&snapshot, selector, args);
        }
        drop(snapshot);

        let _writer = self.writer.enter()?;
        let env = self.env(caller);
        let mut staged = self.stage();
        let out = DispatchWorkflow::execute(&mut staged, &env, calldata)?;
        self.commit(staged);

        log!(Topic::Dispatch, Debug, "{selector} -> {facet} ok ({} bytes)", out.len());

        Ok(out)
    }

    //
    // Loupe
    //

    #[must_use]
    pub fn facets(&self) -> Vec<FacetView> {
        loupe::facets(&self.snapshot())
    }

    #[must_use]
    pub fn facet_function_selectors(&self, facet: &Principal) -> Vec<Selector> {
        loupe::facet_function_selectors(&self.snapshot(), facet)
    }

    #[must_use]
    pub fn facet_addresses(&self) -> Vec<Principal> {
        loupe::facet_addresses(&self.snapshot())
    }

    pub fn facet_address(&self, selector: Selector) -> Result<Principal, Error> {
        Ok(loupe::facet_address(&self.snapshot(), selector)?)
    }

    #[must_use]
    pub fn supports_interface(&self, id: InterfaceId) -> bool {
        loupe::supports_interface(&self.snapshot(), id)
    }

    //
    // Audit & export
    //

    /// Retained cut records, oldest first.
    #[must_use]
    pub fn audit_log(&self) -> Vec<DiamondCutRecord> {
        self.audit().entries()
    }

    /// CBOR snapshot of the committed state, restorable with
    /// [`DiamondBuilder::restore`](crate::DiamondBuilder::restore).
    pub fn export_state(&self) -> Result<Vec<u8>, Error> {
        Ok(self.snapshot().to_bytes()?)
    }

    //
    // Internals
    //

    fn authorize(&self, caller: Principal) -> Result<(), Error> {
        self.authority.authorize(caller, self.id).map_err(|err| {
            log!(Topic::Access, Warn, "cut denied: {err}");
            err.into()
        })
    }

    // Caller must hold the writer slot.
    fn apply_cut(&self, caller: Principal, args: DiamondCutArgs) -> Result<(), Error> {
        let staged = self.stage_cut(caller, &args)?;

        self.commit_cut(staged, args);

        Ok(())
    }

    fn stage_cut(&self, caller: Principal, args: &DiamondCutArgs) -> Result<DiamondState, Error> {
        let env = self.env(caller);
        let mut staged = self.stage();

        if let Err(err) = CutWorkflow::apply(&mut staged, &env, args) {
            log!(
                Topic::Cut,
                Warn,
                "cut of {} ops by {caller} rolled back: {err}",
                args.cuts.len()
            );
            return Err(err);
        }

        Ok(staged)
    }

    // Commits a staged cut, then audits it.
    fn commit_cut(&self, staged: DiamondState, args: DiamondCutArgs) {
        self.commit(staged);

        let ops = args.cuts.len();
        let (init, calldata) = match args.init {
            Some(init) => (init.target, init.payload),
            None => (ZERO_ADDRESS, Vec::new()),
        };

        let record = self.audit().append(args.cuts, init, calldata);
        for sink in &self.sinks {
            sink.record(&record);
        }

        log!(
            Topic::Cut,
            Ok,
            "cut #{} committed: {ops} ops, init={init}",
            record.sequence
        );
    }

    // Registers the built-in loupe selectors not yet served and flags the
    // loupe interface in the same commit. Bypasses the authority; the
    // registration is audited like any other cut.
    pub(super) fn install_builtin_loupe(&self) -> Result<(), Error> {
        let _writer = self.writer.enter()?;

        let snapshot = self.snapshot();
        let missing: Vec<_> = BuiltinLoupe::selectors()
            .into_iter()
            .filter(|sel| snapshot.registry().facet_of(*sel).is_none())
            .collect();
        drop(snapshot);

        if missing.is_empty() {
            return Ok(());
        }

        let args = DiamondCutArgs::new(vec![FacetCut::add(self.id, missing)]);
        let mut staged = self.stage_cut(self.id, &args)?;
        staged.set_interface(BuiltinLoupe::interface_id(), true);
        self.commit_cut(staged, args);

        Ok(())
    }

    fn env(&self, caller: Principal) -> ExecEnv<'_> {
        ExecEnv {
            diamond: self.id,
            caller,
            host: self.host.as_ref(),
        }
    }

    fn stage(&self) -> DiamondState {
        DiamondState::clone(&self.snapshot())
    }

    fn commit(&self, staged: DiamondState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(staged);
    }

    fn audit(&self) -> MutexGuard<'_, AuditLog> {
        self.audit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::InMemoryCodeHost;

    fn diamond() -> Diamond {
        let host: Arc<dyn CodeHost> = Arc::new(InMemoryCodeHost::new());

        Diamond::builder(Principal::from_slice(&[9; 29]), host)
            .authority(|_: Principal, _: Principal| true)
            .build()
            .unwrap()
    }

    #[test]
    fn loupe_install_commits_selectors_and_flag_together() {
        let d = diamond();
        let before = d.snapshot();

        d.install_builtin_loupe().unwrap();

        let after = d.snapshot();
        assert!(!before.supports_interface(BuiltinLoupe::interface_id()));
        assert!(after.supports_interface(BuiltinLoupe::interface_id()));
        assert_eq!(after.registry().selectors_of(&d.id()), BuiltinLoupe::selectors());
        assert_eq!(d.audit_log().len(), 1);
    }

    #[test]
    fn loupe_install_is_idempotent() {
        let d = diamond();
        d.install_builtin_loupe().unwrap();
        d.set_supports_interface(d.id(), BuiltinLoupe::interface_id(), false)
            .unwrap();

        d.install_builtin_loupe().unwrap();

        assert_eq!(d.audit_log().len(), 1);
        assert!(!d.supports_interface(BuiltinLoupe::interface_id()));
    }

    #[test]
    fn try_cut_commits_when_uncontended() {
        let d = diamond();

        d.try_diamond_cut(d.id(), DiamondCutArgs::default()).unwrap();

        assert_eq!(d.audit_log().len(), 1);
    }

    #[test]
    fn debug_names_the_diamond() {
        let d = diamond();

        let rendered = format!("{d:?}");

        assert!(rendered.starts_with("Diamond"));
        assert!(rendered.contains("writer_held: false"));
    }
}
