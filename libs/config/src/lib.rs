//! # Braccio Device Configuration
//!
//! This crate provides the configuration contract of the braccio WiFi
//! controller: the network it joins, the credential it presents, the
//! hostname it advertises and the port its HTTP server binds.
//!
//! ## Features
//!
//! - **Build-time constants**: `WLAN_SSID`, `WLAN_PASSWORD`, `HOSTNAME`,
//!   `HTTP_SERVER_PORT`, injectable at compile time
//! - **Layered loading**: TOML file, environment overlay, `BRACCIO_` variables
//! - **Sentinel detection**: placeholder credentials are reported as
//!   unconfigured before any connection attempt
//!
//! ## Usage
//!
//! ```rust
//! use braccio_config::{constants, ConfigValidator, DeviceConfig};
//!
//! let port = constants::HTTP_SERVER_PORT;
//! assert!(braccio_config::hostname::is_valid_hostname(constants::HOSTNAME));
//!
//! let config = DeviceConfig::new("braccio1", "", "braccio1", port);
//! let report = ConfigValidator::new(&config).validate_all()?;
//! assert!(!report.has_errors());
//! # Ok::<(), braccio_config::ConfigError>(())
//! ```

pub mod constants;
pub mod device_config;
pub mod error;
pub mod hostname;
pub mod validation;

// Re-export commonly used types
pub use constants::*;
pub use device_config::{load_config, ConfigLoader, DeviceConfig, Secret, ServerConfig, WifiConfig};
pub use error::{ConfigError, Result};
pub use validation::{is_placeholder, ConfigValidator, Field, ValidationReport};
