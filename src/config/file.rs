//! Configuration file loading from sales-buddy.toml
//!
//! The file is optional. Every key in it is optional as well; anything left
//! out keeps its built-in default or is filled from the environment.
//!
//! ```toml
//! [api]
//! base_url = "https://example.ngrok-free.app"
//! profile = "mobile"
//! timeout_secs = 15
//! page_limit = 25
//! ```

use super::api::ClientProfile;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sales-buddy.toml";

/// Configuration structure representing the entire sales-buddy.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
}

/// The `[api]` table
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub profile: Option<ClientProfile>,
    pub timeout_secs: Option<u64>,
    pub page_limit: Option<u32>,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or contains unknown keys
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Parses configuration text.
///
/// # Errors
/// Returns the TOML error when the text is invalid.
pub fn parse_config(contents: &str) -> std::result::Result<FileConfig, toml::de::Error> {
    toml::from_str(contents)
}
