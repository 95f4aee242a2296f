//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `switchboard.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values. Vendor API keys, the device registry and the debug
//! email flag all live here — none of them are derived from inbound events.

use serde::Deserialize;

use switchboard_domain::device::DeviceDescriptor;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Debug email settings.
    pub debug: DebugConfig,
    /// Vendor API credentials and endpoints.
    pub vendors: VendorsConfig,
    /// Device registry entries.
    pub devices: Vec<DeviceDescriptor>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Debug email configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Whether the trace flushes into the debug email step.
    pub email_enabled: bool,
    /// Recipient handed to the host's email step.
    pub recipient: String,
}

/// Vendor credentials and downstream endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VendorsConfig {
    /// LIFX HTTP API bearer token.
    pub lifx_api_key: String,
    /// Govee developer API key.
    pub govee_api_key: String,
    /// Base URL of the downstream Wyze plug webhook integration.
    pub wyze_webhook_url: String,
}

impl Config {
    /// Load configuration from `switchboard.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("switchboard.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SWITCHBOARD_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_LIFX_API_KEY") {
            self.vendors.lifx_api_key = val;
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_GOVEE_API_KEY") {
            self.vendors.govee_api_key = val;
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_WYZE_WEBHOOK_URL") {
            self.vendors.wyze_webhook_url = val;
        }
        if let Ok(val) = std::env::var("SWITCHBOARD_DEBUG_EMAIL") {
            self.debug.email_enabled = true;
            self.debug.recipient = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.debug.email_enabled && self.debug.recipient.is_empty() {
            return Err(ConfigError::Validation(
                "debug email is enabled but no recipient is set".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration file")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration file")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use switchboard_domain::device::Vendor;

    use super::*;

    #[test]
    fn should_default_every_field_so_the_file_is_optional() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.logging.filter, "info");
        assert!(!config.debug.email_enabled);
        assert!(config.devices.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [debug]
            email_enabled = true
            recipient = "home@example.com"

            [vendors]
            lifx_api_key = "lifx-key"
            govee_api_key = "govee-key"
            wyze_webhook_url = "https://hooks.example.com/wyze"

            [[devices]]
            id = "light_back_deck"
            vendor = "lifx"
            address = { kind = "label", label = "Back Deck" }

            [[devices]]
            id = "plug_front_porch1"
            vendor = "wyze"
            address = { kind = "plug_slot", slot = "plug1" }
            related_ids = ["plug_front_porch2"]

            [[devices]]
            id = "plug_front_porch2"
            vendor = "wyze"
            address = { kind = "plug_slot", slot = "plug2" }
            related_ids = ["plug_front_porch1"]
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.devices.len(), 3);
        assert_eq!(config.devices[0].vendor, Vendor::Lifx);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_zero_port() {
        let config: Config = toml::from_str("[server]\nport = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_debug_email_without_recipient() {
        let config: Config = toml::from_str("[debug]\nemail_enabled = true\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
