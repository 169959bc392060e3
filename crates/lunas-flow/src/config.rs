//! # Flow Configuration
//!
//! Configuration for the submission flow.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LUNAS_GATEWAY_URL=https://api.example.com                          │
//! │     LUNAS_REDIRECT_DELAY_MS=500                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/lunas/flow.toml (Linux)                                  │
//! │     ~/Library/Application Support/id.lunas.checkout/flow.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # flow.toml
//! [gateway]
//! base_url = "https://api.example.com"
//! connect_timeout_secs = 10
//!
//! [checkout]
//! redirect_delay_ms = 1500
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{FlowError, FlowResult};

// =============================================================================
// Gateway Settings
// =============================================================================

/// Settings for the gateway implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Base URL of the commerce API. Port implementations resolve their
    /// endpoints against it; `None` means the host wires URLs itself.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for GatewaySettings {
    fn default() -> Self {
        GatewaySettings {
            base_url: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Settings for checkout behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Pause between a successful submission and the payment redirect
    /// (milliseconds). UX pacing only: gives the storefront a beat to
    /// show the success state before the page goes away.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay() -> u64 {
    1500
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

// =============================================================================
// Main Flow Configuration
// =============================================================================

/// Complete flow configuration.
///
/// ## Example Config File
/// ```toml
/// [gateway]
/// base_url = "https://api.example.com"
/// connect_timeout_secs = 10
///
/// [checkout]
/// redirect_delay_ms = 1500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Gateway settings.
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Checkout behavior settings.
    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl FlowConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (flow.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> FlowResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading flow config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load flow config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> FlowResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| FlowError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Flow config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FlowResult<()> {
        // If a base URL is set, it must be http(s)
        if let Some(ref url) = self.gateway.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FlowError::InvalidConfig(format!(
                    "Gateway URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }

        if self.gateway.connect_timeout_secs == 0 {
            return Err(FlowError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        // Pacing is cosmetic; anything past 10s would read as a hang
        if self.checkout.redirect_delay_ms > 10_000 {
            return Err(FlowError::InvalidConfig(format!(
                "redirect_delay_ms must be at most 10000, got: {}",
                self.checkout.redirect_delay_ms
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LUNAS_GATEWAY_URL") {
            debug!(url = %url, "Overriding gateway URL from environment");
            self.gateway.base_url = Some(url);
        }

        if let Ok(timeout) = std::env::var("LUNAS_GATEWAY_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.gateway.connect_timeout_secs = secs;
            }
        }

        if let Ok(delay) = std::env::var("LUNAS_REDIRECT_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                debug!(delay_ms = ms, "Overriding redirect delay from environment");
                self.checkout.redirect_delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "lunas", "checkout").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("flow.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the pre-redirect pacing delay.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.redirect_delay_ms)
    }

    /// Returns the gateway connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.connect_timeout_secs)
    }

    /// Returns the gateway base URL if configured.
    pub fn gateway_url(&self) -> Option<&str> {
        self.gateway.base_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FlowConfig::default();
        assert_eq!(config.checkout.redirect_delay_ms, 1500);
        assert_eq!(config.gateway.connect_timeout_secs, 10);
        assert!(config.gateway.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FlowConfig::default();

        // Bad URL scheme should fail
        config.gateway.base_url = Some("ftp://files.example.com".to_string());
        assert!(config.validate().is_err());

        // Proper https URL should pass
        config.gateway.base_url = Some("https://api.example.com".to_string());
        assert!(config.validate().is_ok());

        // Absurd pacing delay should fail
        config.checkout.redirect_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = FlowConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[gateway]"));
        assert!(toml_str.contains("[checkout]"));

        let parsed: FlowConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.checkout.redirect_delay_ms, 1500);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: FlowConfig = toml::from_str("[gateway]\nconnect_timeout_secs = 30\n").unwrap();
        assert_eq!(parsed.gateway.connect_timeout_secs, 30);
        assert_eq!(parsed.checkout.redirect_delay_ms, 1500);
    }
}
