//! Error types for device configuration

use crate::hostname::HostnameError;
use crate::validation::Field;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to expand environment variables in '{field}': {message}")]
    Expand { field: &'static str, message: String },

    #[error(
        "Device is unconfigured: placeholder value in {}",
        join_keys(.fields)
    )]
    Unconfigured { fields: Vec<Field> },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] HostnameError),

    #[error("Failed to render TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// True when the failure is a placeholder left in place by the deployer.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, ConfigError::Unconfigured { .. })
    }
}

fn join_keys(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
