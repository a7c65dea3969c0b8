//! # Ledger Configuration
//!
//! Configuration for the expense ledger HTTP client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MATESPLIT_API_BASE_URL=https://ledger.example.com                  │
//! │     MATESPLIT_MEMBER_ID=17                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/matesplit/ledger.toml (Linux)                            │
//! │     ~/Library/Application Support/com.matesplit.app/... (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, 30s timeout, no session                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # ledger.toml
//! [api]
//! base_url = "https://ledger.example.com"
//! timeout_secs = 30
//!
//! [session]
//! member_id = "17"
//! group_id = "3"
//! ```
//!
//! ## Session
//! The old front-end kept the signed-in member and active group in browser
//! localStorage and read them ad hoc. Here they are explicit, typed, and
//! travel with the config instead of being ambient globals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use matesplit_core::types::MemberId;

use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Api Config
// =============================================================================

/// Where the ledger backend lives and how long we wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The signed-in member and their active group.
///
/// Both are optional: feeds and submission need them, but the calculator and
/// client construction do not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in group member.
    #[serde(default)]
    pub member_id: Option<MemberId>,

    /// The currently active group.
    #[serde(default)]
    pub group_id: Option<String>,
}

impl Session {
    /// Returns the member id, or a config error when signed out.
    pub fn require_member(&self) -> LedgerResult<&MemberId> {
        self.member_id
            .as_ref()
            .ok_or_else(|| LedgerError::InvalidConfig("no signed-in member in session".into()))
    }

    /// Returns the group id, or a config error when no group is active.
    pub fn require_group(&self) -> LedgerResult<&str> {
        self.group_id
            .as_deref()
            .ok_or_else(|| LedgerError::InvalidConfig("no active group in session".into()))
    }
}

// =============================================================================
// Ledger Config
// =============================================================================

/// Complete ledger client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Signed-in member and active group.
    #[serde(default)]
    pub session: Session,
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ledger.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LedgerResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ledger config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load ledger config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> LedgerResult<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(LedgerError::InvalidUrl(format!(
                "base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(LedgerError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MATESPLIT_API_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.api.base_url = url;
        }

        if let Ok(secs) = std::env::var("MATESPLIT_API_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.api.timeout_secs = s;
            }
        }

        if let Ok(id) = std::env::var("MATESPLIT_MEMBER_ID") {
            debug!(member_id = %id, "Overriding session member from environment");
            self.session.member_id = Some(MemberId::new(id));
        }

        if let Ok(id) = std::env::var("MATESPLIT_GROUP_ID") {
            self.session.group_id = Some(id);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "matesplit", "app")
            .map(|dirs| dirs.config_dir().join("ledger.toml"))
    }

    /// Backend base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.session.member_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: LedgerConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://ledger.example.com"

            [session]
            member_id = "17"
            group_id = "3"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://ledger.example.com");
        // Omitted keys fall back to defaults.
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.member_id, Some(MemberId::new("17")));
        assert_eq!(config.session.group_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = LedgerConfig::default();
        config.api.base_url = "ftp://nope".to_string();
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = LedgerConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let mut config = LedgerConfig::default();
        config.api.base_url = "https://ledger.example.com/".to_string();
        assert_eq!(config.base_url(), "https://ledger.example.com");
    }

    #[test]
    fn test_session_requirements() {
        let session = Session::default();
        assert!(session.require_member().is_err());
        assert!(session.require_group().is_err());

        let session = Session {
            member_id: Some(MemberId::new("17")),
            group_id: Some("3".to_string()),
        };
        assert_eq!(session.require_member().unwrap(), &MemberId::new("17"));
        assert_eq!(session.require_group().unwrap(), "3");
    }
}
