//! API connection settings.
//!
//! The two deployments the API was built for behave differently: the web
//! dashboard talks to it directly with no timeout, while the mobile app goes
//! through an ngrok tunnel, needs the tunnel's browser-warning bypass header,
//! and gives up after 30 seconds. [`ClientProfile`] captures that difference.

use crate::entities::JenisKelamin;
use serde::Deserialize;
use std::{fmt, str::FromStr, time::Duration};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Timeout applied by the mobile profile.
pub const MOBILE_TIMEOUT: Duration = Duration::from_secs(30);

/// Which client's transport behaviour to reproduce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClientProfile {
    /// Direct connection, `Content-Type` only, no timeout
    #[default]
    Web,
    /// Tunnelled connection with `Accept`, the ngrok bypass header, and a 30 s timeout
    Mobile,
}

impl ClientProfile {
    /// Timeout used when none is configured explicitly.
    #[must_use]
    pub const fn default_timeout(self) -> Option<Duration> {
        match self {
            Self::Web => None,
            Self::Mobile => Some(MOBILE_TIMEOUT),
        }
    }

    /// Whether requests carry `Accept` and `ngrok-skip-browser-warning`.
    #[must_use]
    pub const fn sends_tunnel_headers(self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Spelling of a gender this profile's server stores.
    #[must_use]
    pub const fn jenis_kelamin_wire(self, jenis_kelamin: JenisKelamin) -> &'static str {
        match (self, jenis_kelamin) {
            (Self::Web, JenisKelamin::Pria) => "pria",
            (Self::Web, JenisKelamin::Wanita) => "wanita",
            (Self::Mobile, JenisKelamin::Pria) => "Pria",
            (Self::Mobile, JenisKelamin::Wanita) => "Wanita",
        }
    }
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web => f.write_str("web"),
            Self::Mobile => f.write_str("mobile"),
        }
    }
}

impl FromStr for ClientProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            other => Err(format!("unknown client profile '{other}' (expected web or mobile)")),
        }
    }
}

/// Resolved connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Server root, without the `/api` prefix
    pub base_url: String,
    pub profile: ClientProfile,
    /// Explicit timeout; `None` falls back to the profile's default
    pub timeout: Option<Duration>,
    /// Page size used by list commands when paging is requested
    pub page_limit: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: ClientProfile::default(),
            timeout: None,
            page_limit: None,
        }
    }
}

impl ApiConfig {
    /// Timeout actually applied to requests.
    #[must_use]
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.or_else(|| self.profile.default_timeout())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_profile_timeouts() {
        let web = ApiConfig::default();
        assert_eq!(web.effective_timeout(), None);

        let mobile = ApiConfig {
            profile: ClientProfile::Mobile,
            ..ApiConfig::default()
        };
        assert_eq!(mobile.effective_timeout(), Some(Duration::from_secs(30)));

        let explicit = ApiConfig {
            timeout: Some(Duration::from_secs(5)),
            ..mobile
        };
        assert_eq!(explicit.effective_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("Mobile".parse::<ClientProfile>().unwrap(), ClientProfile::Mobile);
        assert_eq!(" web ".parse::<ClientProfile>().unwrap(), ClientProfile::Web);
        assert!("desktop".parse::<ClientProfile>().is_err());
        assert!(ClientProfile::Mobile.sends_tunnel_headers());
        assert!(!ClientProfile::Web.sends_tunnel_headers());
    }
}
