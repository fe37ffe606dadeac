pub mod schema;

pub use schema::{
    AccessConfig, AccessMode, AuditConfig, ConfigSchemaError, DiamondConfig, LogConfig,
    LoupeConfig, Validate,
};

use crate::ThisError;

/// Errors related to configuration parsing and validation.
#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

impl DiamondConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::CannotParseToml(e.to_string()))
    }
}

///
/// TESTS
///
