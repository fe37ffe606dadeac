use crate::{
    Error,
    access::{
        auth::{CutAuthority, authority_from_config},
        guard::WriterLock,
    },
    api::Diamond,
    config::{ConfigError, DiamondConfig, Validate},
    exec::CodeHost,
    log,
    log::Topic,
    storage::{AuditLog, AuditSink, DiamondState, RegistryError},
};
use candid::Principal;
use std::sync::{Arc, Mutex, RwLock};

///
/// DiamondBuilder
///
/// Assembles a [`Diamond`]: identity, code host, config, authority, audit
/// sinks, and optionally a previously exported state.
///

pub struct DiamondBuilder {
    id: Principal,
    host: Arc<dyn CodeHost>,
    config: DiamondConfig,
    authority: Option<Box<dyn CutAuthority>>,
    sinks: Vec<Box<dyn AuditSink>>,
    restore: Option<Vec<u8>>,
}

impl DiamondBuilder {
    #[must_use]
    pub fn new(id: Principal, host: Arc<dyn CodeHost>) -> Self {
        Self {
            id,
            host,
            config: DiamondConfig::default(),
            authority: None,
            sinks: Vec::new(),
            restore: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: DiamondConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the authority derived from `[access]` config.
    #[must_use]
    pub fn authority(mut self, authority: impl CutAuthority + 'static) -> Self {
        self.authority = Some(Box::new(authority));
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl AuditSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Start from bytes produced by [`Diamond::export_state`].
    #[must_use]
    pub fn restore(mut self, bytes: Vec<u8>) -> Self {
        self.restore = Some(bytes);
        self
    }

    /// Validate the config and assemble the diamond.
    ///
    /// The `[log]` section configures the process-wide log buffer, which all
    /// diamonds in the process share. The most recently built diamond's
    /// settings apply to every one of them.
    pub fn build(self) -> Result<Diamond, Error> {
        self.config.validate().map_err(ConfigError::from)?;
        log::configure(self.config.log.max_entries, self.config.log.console_level);

        let state = match &self.restore {
            Some(bytes) => Self::restored_state(self.id, bytes)?,
            None => DiamondState::new(self.id),
        };

        let authority = self
            .authority
            .unwrap_or_else(|| authority_from_config(&self.config.access));

        let diamond = Diamond {
            id: self.id,
            audit: Mutex::new(AuditLog::new(self.config.audit.max_entries)),
            config: self.config,
            host: self.host,
            authority,
            state: RwLock::new(Arc::new(state)),
            writer: WriterLock::new(),
            sinks: self.sinks,
        };

        if diamond.config.loupe.self_hosted {
            diamond.install_builtin_loupe()?;
        }

        log!(
            Topic::Init,
            Ok,
            "diamond {} ready: {} facets, {} selectors",
            diamond.id,
            diamond.snapshot().registry().facet_addresses().len(),
            diamond.snapshot().registry().selector_count()
        );

        Ok(diamond)
    }

    fn restored_state(id: Principal, bytes: &[u8]) -> Result<DiamondState, Error> {
        let state = DiamondState::from_bytes(bytes)?;

        if state.registry().diamond() != id {
            return Err(RegistryError::InvariantViolation(format!(
                "snapshot belongs to diamond {}, not {id}",
                state.registry().diamond()
            ))
            .into());
        }
        state.registry().validate_invariants()?;

        Ok(state)
    }
}
