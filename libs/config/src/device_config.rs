//! Device Configuration Module
//!
//! Provides the immutable configuration value consumed by the WiFi and HTTP
//! bootstrap. Values are layered, lowest precedence first:
//!
//! 1. compiled constants from [`crate::constants`]
//! 2. a TOML file (`config/device.toml` by default)
//! 3. an environment overlay `environments/<env>.toml` next to that file
//! 4. `BRACCIO_` environment variables, e.g. `BRACCIO_WIFI__SSID`

use crate::constants::{
    HOSTNAME, HTTP_SERVER_PORT, PLACEHOLDER_PASSWORD, WLAN_PASSWORD, WLAN_SSID,
};
use crate::error::{ConfigError, Result};
use config::{Config, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the device configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/device.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "BRACCIO";

static COMPILED: Lazy<DeviceConfig> = Lazy::new(|| DeviceConfig {
    wifi: WifiConfig {
        ssid: WLAN_SSID.to_string(),
        password: Secret::new(WLAN_PASSWORD),
    },
    server: ServerConfig {
        hostname: HOSTNAME.to_string(),
        http_port: HTTP_SERVER_PORT,
    },
});

/// Complete device configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// WPA settings
    pub wifi: WifiConfig,

    /// Server settings
    pub server: ServerConfig,
}

/// WiFi network credentials
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: Secret,
}

/// Network identity and HTTP listener
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub hostname: String,
    pub http_port: u16,
}

/// Pre-shared key. `Debug` never shows the value.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw credential, for handing to the radio driver
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(***)")
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::compiled().clone()
    }
}

impl DeviceConfig {
    /// Configuration built from the compiled constants, shared process-wide
    pub fn compiled() -> &'static DeviceConfig {
        &COMPILED
    }

    pub fn new(
        ssid: impl Into<String>,
        password: impl Into<String>,
        hostname: impl Into<String>,
        http_port: u16,
    ) -> Self {
        Self {
            wifi: WifiConfig {
                ssid: ssid.into(),
                password: Secret::new(password),
            },
            server: ServerConfig {
                hostname: hostname.into(),
                http_port,
            },
        }
    }

    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = base_path {
            loader = loader.file(path);
        }
        if let Some(env) = environment {
            loader = loader.environment(env);
        }
        loader.load()
    }

    /// Replace values written as a single `${NAME}` reference with the
    /// variable's value. Anything else, `$` included, is kept byte-for-byte.
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.wifi.ssid = expand("wifi.ssid", &self.wifi.ssid)?;
        self.wifi.password =
            Secret::new(expand("wifi.password", self.wifi.password.expose())?);
        self.server.hostname = expand("server.hostname", &self.server.hostname)?;
        Ok(())
    }

    /// Copy safe to publish: the password is replaced by the sentinel
    pub fn to_template(&self) -> Self {
        let mut template = self.clone();
        template.wifi.password = Secret::new(PLACEHOLDER_PASSWORD);
        template
    }

    /// Render as a TOML document suitable for `config/device.toml`
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write [`Self::to_toml`] to `path`, creating parent directories
    pub fn write_template(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        info!("Wrote configuration template: {:?}", path);
        Ok(())
    }
}

fn expand(field: &'static str, value: &str) -> Result<String> {
    if !is_env_reference(value) {
        return Ok(value.to_string());
    }
    shellexpand::env(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| ConfigError::Expand {
            field,
            message: e.to_string(),
        })
}

/// True for `${NAME}` where NAME is a shell variable name
fn is_env_reference(value: &str) -> bool {
    let Some(name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) else {
        return false;
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builder for layered configuration loading
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
    environment: Option<String>,
    env_prefix: String,
    env_vars: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            base_path: None,
            environment: None,
            env_prefix: ENV_PREFIX.to_string(),
            env_vars: None,
        }
    }

    /// Explicit base file. Unlike the default path it must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    pub fn load(&self) -> Result<DeviceConfig> {
        let compiled = DeviceConfig::compiled();
        let mut builder = Config::builder()
            .set_default("wifi.ssid", compiled.wifi.ssid.as_str())?
            .set_default("wifi.password", compiled.wifi.password.expose())?
            .set_default("server.hostname", compiled.server.hostname.as_str())?
            .set_default("server.http_port", i64::from(compiled.server.http_port))?;

        let (base, required) = match &self.base_path {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        debug!("Loading device config: {:?} (required={})", base, required);
        builder = builder.add_source(File::from(base.as_path()).required(required));

        // Add environment-specific overrides if specified
        if let Some(env) = &self.environment {
            let env_file = base
                .parent()
                .unwrap_or(Path::new("."))
                .join("environments")
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file.as_path()));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (BRACCIO_WIFI__SSID, ...)
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .source(self.env_vars.clone()),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<DeviceConfig> {
    let mut config = DeviceConfig::load(None, environment)?;
    config.expand_env_vars()?;
    Ok(config)
}
