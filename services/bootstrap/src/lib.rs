//! # Braccio Bootstrap
//!
//! Reference consumer of `braccio-config`. Loads the device configuration,
//! refuses to continue while placeholder credentials are in place, and
//! produces the WiFi join parameters and HTTP bind address.
//!
//! ```rust
//! use braccio_bootstrap::{BootstrapPlan, Security};
//! use braccio_config::DeviceConfig;
//!
//! let config = DeviceConfig::new("braccio1", "", "braccio1", 80);
//! let plan = BootstrapPlan::prepare(&config)?;
//! assert_eq!(plan.join.security, Security::Open);
//!
//! let unconfigured = DeviceConfig::new("<YOUR-SSID>", "", "braccio1", 80);
//! assert!(BootstrapPlan::prepare(&unconfigured).unwrap_err().is_unconfigured());
//! # Ok::<(), braccio_bootstrap::BootstrapError>(())
//! ```

pub mod preflight;
pub mod summary;

pub use preflight::{BootstrapError, BootstrapPlan, JoinParameters, Security};
pub use summary::ConfigSummary;
