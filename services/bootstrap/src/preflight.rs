//! Network bootstrap preflight
//!
//! Turns a loaded [`DeviceConfig`] into the parameters the WiFi driver and
//! HTTP server need. A plan is only produced for a configuration that passed
//! validation, so placeholder credentials never reach the radio.

use braccio_config::{ConfigError, ConfigValidator, DeviceConfig, Secret, ValidationReport};
use serde::Serialize;
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot bind HTTP server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, BootstrapError::Config(e) if e.is_unconfigured())
    }
}

/// WiFi security mode implied by the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Security {
    Open,
    Wpa2Personal,
}

/// Parameters handed to the radio driver's join call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinParameters {
    pub ssid: String,
    pub passphrase: Secret,
    pub security: Security,
}

/// Everything the bootstrap sequence needs, in order of use
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub join: JoinParameters,
    pub hostname: String,
    pub http_bind: SocketAddr,
    pub report: ValidationReport,
}

impl BootstrapPlan {
    /// Validate `config` and build the plan. Fails fast on placeholders.
    pub fn prepare(config: &DeviceConfig) -> Result<Self, BootstrapError> {
        let report = ConfigValidator::new(config).validate_all()?;

        let security = if config.wifi.password.is_empty() {
            Security::Open
        } else {
            Security::Wpa2Personal
        };

        let plan = Self {
            join: JoinParameters {
                ssid: config.wifi.ssid.clone(),
                passphrase: config.wifi.password.clone(),
                security,
            },
            hostname: config.server.hostname.clone(),
            http_bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.http_port)),
            report,
        };

        info!(
            ssid = %plan.join.ssid,
            hostname = %plan.hostname,
            bind = %plan.http_bind,
            security = ?plan.join.security,
            "Bootstrap plan ready"
        );
        Ok(plan)
    }

    /// Bind and release the HTTP listener address.
    pub fn probe_bind(&self) -> Result<SocketAddr, BootstrapError> {
        self.probe_bind_on(self.http_bind)
    }

    /// Like [`Self::probe_bind`] on another address with the same port.
    pub fn probe_bind_on(&self, addr: SocketAddr) -> Result<SocketAddr, BootstrapError> {
        let listener =
            TcpListener::bind(addr).map_err(|source| BootstrapError::Bind { addr, source })?;
        let bound = listener
            .local_addr()
            .map_err(|source| BootstrapError::Bind { addr, source })?;
        debug!("Bind probe succeeded on {}", bound);
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_network_plan() {
        let config = DeviceConfig::new("braccio1", "", "braccio1", 80);
        let plan = BootstrapPlan::prepare(&config).unwrap();

        assert_eq!(plan.join.ssid, "braccio1");
        assert_eq!(plan.join.passphrase.expose(), "");
        assert_eq!(plan.join.security, Security::Open);
        assert_eq!(plan.hostname, "braccio1");
        assert_eq!(plan.http_bind, "0.0.0.0:80".parse().unwrap());
    }

    #[test]
    fn test_wpa2_plan() {
        let config = DeviceConfig::new("lab", "hunter22", "arm-2", 8080);
        let plan = BootstrapPlan::prepare(&config).unwrap();

        assert_eq!(plan.join.security, Security::Wpa2Personal);
        assert_eq!(plan.http_bind.port(), 8080);
    }

    #[test]
    fn test_placeholder_fails_fast() {
        let config = DeviceConfig::new("<YOUR-SSID>", "", "braccio1", 80);
        let err = BootstrapPlan::prepare(&config).unwrap_err();
        assert!(err.is_unconfigured());
    }

    #[test]
    fn test_probe_bind_on_ephemeral_port() {
        let config = DeviceConfig::new("lab", "hunter22", "braccio1", 0);
        let plan = BootstrapPlan::prepare(&config).unwrap();

        let bound = plan
            .probe_bind_on(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .unwrap();
        assert_ne!(bound.port(), 0);
    }

    #[test]
    fn test_probe_bind_reports_port_in_use() {
        let held = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = held.local_addr().unwrap().port();

        let config = DeviceConfig::new("lab", "hunter22", "braccio1", port);
        let plan = BootstrapPlan::prepare(&config).unwrap();
        let err = plan
            .probe_bind_on(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Bind { .. }));
        assert!(!err.is_unconfigured());
    }
}
