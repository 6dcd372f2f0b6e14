//! Configuration management.
//!
//! Settings are layered, later layers winning: built-in defaults, the
//! optional `sales-buddy.toml`, environment variables (including `.env`,
//! loaded by `main`), then command-line flags.

/// API connection settings and client profiles
pub mod api;

/// Configuration file loading from sales-buddy.toml
pub mod file;

pub use api::{ApiConfig, ClientProfile};

use crate::errors::{Error, Result};
use std::{path::Path, time::Duration};
use tracing::{debug, info};

/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "SALES_API_URL";
/// Environment variable selecting the client profile
pub const ENV_PROFILE: &str = "SALES_PROFILE";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SALES_TIMEOUT_SECS";

/// Fully resolved application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub profile: Option<ClientProfile>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Applies the `[api]` table of a configuration file.
    pub fn apply_file(&mut self, file: file::FileConfig) {
        let section = file.api;
        if let Some(base_url) = section.base_url {
            self.api.base_url = base_url;
        }
        if let Some(profile) = section.profile {
            self.api.profile = profile;
        }
        if let Some(secs) = section.timeout_secs {
            self.api.timeout = Some(Duration::from_secs(secs));
        }
        if section.page_limit.is_some() {
            self.api.page_limit = section.page_limit;
        }
    }

    /// Applies environment variables read through `lookup`.
    ///
    /// # Errors
    /// Returns an error when a variable is set but cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_PROFILE) {
            self.api.profile = raw.parse().map_err(|message| Error::Config { message })?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds: {e}"),
            })?;
            self.api.timeout = Some(Duration::from_secs(secs));
        }
        Ok(())
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(base_url) = &overrides.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(profile) = overrides.profile {
            self.api.profile = profile;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.api.timeout = Some(Duration::from_secs(secs));
        }
    }

    fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| Error::Config {
            message: format!("Invalid API base URL '{}': {e}", self.api.base_url),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("API base URL must use http or https, got '{}'", parsed.scheme()),
            });
        }
        if self.api.timeout == Some(Duration::ZERO) {
            return Err(Error::Config {
                message: "Timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads the main application configuration.
///
/// An explicitly given `config_path` must exist; otherwise the default file
/// is read only when present.
///
/// # Errors
/// Returns an error when a file cannot be read or parsed, an environment
/// variable is malformed, or the resulting base URL is invalid.
pub fn load_app_configuration(config_path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    match config_path {
        Some(path) => config.apply_file(file::load_config(path)?),
        None => {
            let default_path = Path::new(file::DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                config.apply_file(file::load_config(default_path)?);
            } else {
                debug!("No {} found, using defaults", file::DEFAULT_CONFIG_FILE);
            }
        }
    }

    config.apply_env(|key| std::env::var(key).ok())?;
    config.apply_overrides(overrides);
    config.validate()?;

    info!(
        base_url = %config.api.base_url,
        profile = %config.api.profile,
        timeout = ?config.api.effective_timeout(),
        "Configuration loaded"
    );
    Ok(config)
}
