//! Redacted view of a device configuration for logs and CLI output

use braccio_config::validation::unconfigured_fields;
use braccio_config::{DeviceConfig, Field};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub ssid: String,
    pub password_set: bool,
    pub hostname: String,
    pub http_port: u16,
    pub unconfigured: Vec<Field>,
}

impl From<&DeviceConfig> for ConfigSummary {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            ssid: config.wifi.ssid.clone(),
            password_set: !config.wifi.password.is_empty(),
            hostname: config.server.hostname.clone(),
            http_port: config.server.http_port,
            unconfigured: unconfigured_fields(config),
        }
    }
}

impl ConfigSummary {
    pub fn is_configured(&self) -> bool {
        self.unconfigured.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ConfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ssid:      {}", self.ssid)?;
        writeln!(
            f,
            "password:  {}",
            if self.password_set { "(set)" } else { "(empty)" }
        )?;
        writeln!(f, "hostname:  {}", self.hostname)?;
        writeln!(f, "http_port: {}", self.http_port)?;
        if self.is_configured() {
            write!(f, "status:    configured")
        } else {
            let keys: Vec<_> = self.unconfigured.iter().map(|field| field.key()).collect();
            write!(f, "status:    UNCONFIGURED ({})", keys.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_never_contains_password() {
        let config = DeviceConfig::new("lab", "hunter22", "braccio1", 80);
        let summary = ConfigSummary::from(&config);

        assert!(summary.password_set);
        assert!(!summary.to_string().contains("hunter22"));
        assert!(!summary.to_json().unwrap().contains("hunter22"));
    }

    #[test]
    fn test_summary_lists_placeholders() {
        let config = DeviceConfig::new("<YOUR-SSID>", "<YOUR-CREDENTIALS>", "braccio1", 80);
        let summary = ConfigSummary::from(&config);

        assert!(!summary.is_configured());
        assert_eq!(summary.unconfigured, vec![Field::Ssid, Field::Password]);
        assert!(summary
            .to_string()
            .ends_with("UNCONFIGURED (wifi.ssid, wifi.password)"));
    }

    #[test]
    fn test_summary_json_shape() {
        let config = DeviceConfig::new("braccio1", "", "braccio1", 80);
        let value: serde_json::Value =
            serde_json::from_str(&ConfigSummary::from(&config).to_json().unwrap()).unwrap();

        assert_eq!(value["ssid"], "braccio1");
        assert_eq!(value["password_set"], false);
        assert_eq!(value["http_port"], 80);
        assert_eq!(value["unconfigured"], serde_json::json!([]));
    }

    #[test]
    fn test_summary_json_lists_placeholder_keys() {
        let config = DeviceConfig::new("<YOUR-SSID>", "", "<HOST>", 80);
        let value: serde_json::Value =
            serde_json::from_str(&ConfigSummary::from(&config).to_json().unwrap()).unwrap();

        assert_eq!(
            value["unconfigured"],
            serde_json::json!(["wifi.ssid", "server.hostname"])
        );
    }
}
