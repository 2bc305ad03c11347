//! Error type for configuration loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Extraction from the layered figment failed (malformed TOML, bad env value).
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section the caller requires is missing its mandatory fields.
    #[error("Configuration section '{section}' is incomplete")]
    NotConfigured { section: String },
}
