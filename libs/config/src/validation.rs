//! Configuration Validation
//!
//! Detects placeholder ("unconfigured") values and checks the remaining
//! values before any network connection is attempted.

use crate::constants::{PLACEHOLDER_PASSWORD, PLACEHOLDER_SSID};
use crate::device_config::DeviceConfig;
use crate::error::{ConfigError, Result};
use crate::hostname::check_hostname;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, info, warn};

/// Longest SSID an 802.11 access point can advertise
pub const MAX_SSID_LEN: usize = 32;

/// Placeholders shipped by common firmware templates
const KNOWN_PLACEHOLDERS: &[&str] = &[
    PLACEHOLDER_SSID,
    PLACEHOLDER_PASSWORD,
    "YOUR_WIFI_SSID",
    "YOUR_WIFI_PASSWORD",
    "YOUR-SSID",
    "YOUR-CREDENTIALS",
];

/// One of the four configuration options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ssid,
    Password,
    Hostname,
    HttpPort,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Ssid, Field::Password, Field::Hostname, Field::HttpPort];

    /// Dotted key used in TOML files
    pub fn key(self) -> &'static str {
        match self {
            Field::Ssid => "wifi.ssid",
            Field::Password => "wifi.password",
            Field::Hostname => "server.hostname",
            Field::HttpPort => "server.http_port",
        }
    }

    /// Runtime environment variable overriding this field
    pub fn env_var(self) -> &'static str {
        match self {
            Field::Ssid => "BRACCIO_WIFI__SSID",
            Field::Password => "BRACCIO_WIFI__PASSWORD",
            Field::Hostname => "BRACCIO_SERVER__HOSTNAME",
            Field::HttpPort => "BRACCIO_SERVER__HTTP_PORT",
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// True if `value` is a sentinel left for the deployer to replace.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.len() > 2 && trimmed.starts_with('<') && trimmed.ends_with('>') {
        return true;
    }
    KNOWN_PLACEHOLDERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(trimmed))
}

/// Which fields of `config` still hold placeholder values
pub fn unconfigured_fields(config: &DeviceConfig) -> Vec<Field> {
    let mut fields = Vec::new();
    if is_placeholder(&config.wifi.ssid) {
        fields.push(Field::Ssid);
    }
    if is_placeholder(config.wifi.password.expose()) {
        fields.push(Field::Password);
    }
    if is_placeholder(&config.server.hostname) {
        fields.push(Field::Hostname);
    }
    fields
}

/// Device configuration validator
pub struct ConfigValidator<'a> {
    config: &'a DeviceConfig,
}

impl<'a> ConfigValidator<'a> {
    pub fn new(config: &'a DeviceConfig) -> Self {
        Self { config }
    }

    /// Run all validation checks
    pub fn validate_all(&self) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();

        self.validate_placeholders(&mut report);
        self.validate_wifi(&mut report);
        self.validate_server(&mut report);

        report.log();

        if !report.unconfigured().is_empty() {
            Err(ConfigError::Unconfigured {
                fields: report.unconfigured().to_vec(),
            })
        } else if report.has_errors() {
            Err(ConfigError::Validation {
                message: format!(
                    "Validation failed with {} errors: {}",
                    report.error_count(),
                    report.errors().join("; ")
                ),
            })
        } else {
            Ok(report)
        }
    }

    fn validate_placeholders(&self, report: &mut ValidationReport) {
        for field in unconfigured_fields(self.config) {
            report.add_error(format!(
                "{} holds a placeholder; set it in the config file or {}",
                field,
                field.env_var()
            ));
            report.unconfigured.push(field);
        }
    }

    fn validate_wifi(&self, report: &mut ValidationReport) {
        let wifi = &self.config.wifi;

        if wifi.ssid.is_empty() {
            report.add_error(format!("{} is empty", Field::Ssid));
        } else if wifi.ssid.len() > MAX_SSID_LEN {
            report.add_warning(format!(
                "{} is {} bytes; access points advertise at most {}",
                Field::Ssid,
                wifi.ssid.len(),
                MAX_SSID_LEN
            ));
        }

        if wifi.password.is_empty() {
            report.add_warning(format!(
                "{} is empty; joining '{}' as an open network",
                Field::Password,
                wifi.ssid
            ));
        }
    }

    fn validate_server(&self, report: &mut ValidationReport) {
        let server = &self.config.server;

        // Placeholder hostnames are already reported as unconfigured
        if !report.unconfigured.contains(&Field::Hostname) {
            if let Err(e) = check_hostname(&server.hostname) {
                report.add_error(format!("{} '{}': {}", Field::Hostname, server.hostname, e));
            }
        }

        match server.http_port {
            0 => report.add_warning(format!(
                "{} is 0; the OS will pick an ephemeral port",
                Field::HttpPort
            )),
            80 => report.add_info(format!(
                "{} is 80, the conventional unencrypted HTTP port",
                Field::HttpPort
            )),
            _ => {}
        }
    }
}

/// Outcome of a validation pass
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
    info: Vec<String>,
    unconfigured: Vec<Field>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn add_info(&mut self, message: String) {
        self.info.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn info_count(&self) -> usize {
        self.info.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    pub fn unconfigured(&self) -> &[Field] {
        &self.unconfigured
    }

    fn log(&self) {
        for message in &self.errors {
            warn!("config error: {}", message);
        }
        for message in &self.warnings {
            warn!("config warning: {}", message);
        }
        for message in &self.info {
            debug!("config: {}", message);
        }
        info!(
            errors = self.error_count(),
            warnings = self.warning_count(),
            "Configuration validated"
        );
    }
}
