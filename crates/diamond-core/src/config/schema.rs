use crate::{ThisError, log::Level};
use candid::Principal;
use serde::{Deserialize, Serialize};

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// Defaults
///

mod defaults {
    use crate::log::Level;

    pub const fn audit_max_entries() -> usize {
        1024
    }

    pub const fn log_max_entries() -> usize {
        10_000
    }

    pub const fn console_level() -> Level {
        Level::Info
    }
}

pub const MAX_AUDIT_ENTRIES: usize = 100_000;
pub const MAX_LOG_ENTRIES: usize = 100_000;

///
/// DiamondConfig
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiamondConfig {
    #[serde(default)]
    pub loupe: LoupeConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub access: AccessConfig,
}

impl Validate for DiamondConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        self.audit.validate()?;
        self.log.validate()?;
        self.access.validate()?;

        Ok(())
    }
}

///
/// LoupeConfig
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoupeConfig {
    /// Register the built-in loupe selectors under the diamond's own id.
    #[serde(default)]
    pub self_hosted: bool,
}

///
/// AuditConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default = "defaults::audit_max_entries")]
    pub max_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::audit_max_entries(),
        }
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.max_entries == 0 || self.max_entries > MAX_AUDIT_ENTRIES {
            return Err(ConfigSchemaError::ValidationError(format!(
                "audit.max_entries {} must be within 1..={MAX_AUDIT_ENTRIES}",
                self.max_entries
            )));
        }

        Ok(())
    }
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "defaults::log_max_entries")]
    pub max_entries: usize,

    #[serde(default = "defaults::console_level")]
    pub console_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::log_max_entries(),
            console_level: defaults::console_level(),
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.max_entries > MAX_LOG_ENTRIES {
            return Err(ConfigSchemaError::ValidationError(format!(
                "log.max_entries {} exceeds max {MAX_LOG_ENTRIES}",
                self.max_entries
            )));
        }

        Ok(())
    }
}

///
/// AccessMode
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Only the diamond itself may cut (calls routed back through dispatch).
    #[default]
    #[serde(rename = "self")]
    SelfOnly,
    Owner,
    Whitelist,
}

///
/// AccessConfig
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    #[serde(default)]
    pub mode: AccessMode,

    #[serde(default)]
    pub principals: Vec<Principal>,
}

impl Validate for AccessConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        match self.mode {
            AccessMode::SelfOnly => Ok(()),
            AccessMode::Owner if self.principals.len() == 1 => Ok(()),
            AccessMode::Owner => Err(ConfigSchemaError::ValidationError(format!(
                "access.mode = \"owner\" needs exactly one principal, got {}",
                self.principals.len()
            ))),
            AccessMode::Whitelist if !self.principals.is_empty() => Ok(()),
            AccessMode::Whitelist => Err(ConfigSchemaError::ValidationError(
                "access.mode = \"whitelist\" needs at least one principal".to_string(),
            )),
        }
    }
}
