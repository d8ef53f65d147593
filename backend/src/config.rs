//! Panel settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a configuration file or a
//! `PANEL_`-prefixed environment variable (for example `PANEL_API_URL`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{AuthMode, PlatformUserId, PlatformUserValidationError, RestrictedAccount};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_API_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum PanelSettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid admin API URL '{value}': {source}")]
    AdminApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid platform account id: {0}")]
    PlatformAccount(#[from] PlatformUserValidationError),
}

/// Deployment settings for the admin panel.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANEL")]
#[serde(default)]
pub struct PanelSettings {
    /// Public platform API URL used for default avatar links.
    pub api_url: Option<String>,
    /// Public chat client URL linked from the login page.
    pub app_url: Option<String>,
    /// `none` disables operator login.
    pub auth_type: Option<String>,
    /// The platform's own account, which cannot be suspended.
    pub platform_account_id: Option<String>,
    /// Base URL of the platform admin API. Unset selects fixture adapters.
    pub admin_api_url: Option<String>,
    /// Shared secret sent to the admin API as `X-Admin-Token`.
    pub admin_api_token: Option<String>,
    /// Admin API request timeout in seconds.
    #[ortho_config(default = 10)]
    pub admin_api_timeout_secs: u64,
    /// JSON file listing operator accounts.
    pub operators_file: Option<PathBuf>,
    /// Listen address.
    pub bind_addr: Option<String>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            app_url: None,
            auth_type: None,
            platform_account_id: None,
            admin_api_url: None,
            admin_api_token: None,
            admin_api_timeout_secs: DEFAULT_ADMIN_API_TIMEOUT_SECS,
            operators_file: None,
            bind_addr: None,
        }
    }
}

impl PanelSettings {
    pub fn auth_mode(&self) -> AuthMode {
        AuthMode::from_setting(self.auth_type.as_deref())
    }

    /// Parse the listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, PanelSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| PanelSettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parse the admin API base URL, if configured.
    pub fn admin_api_url(&self) -> Result<Option<Url>, PanelSettingsError> {
        self.admin_api_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                Url::parse(value).map_err(|source| PanelSettingsError::AdminApiUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn admin_api_timeout(&self) -> Duration {
        Duration::from_secs(self.admin_api_timeout_secs)
    }

    /// The restricted platform account; blank values count as unset.
    pub fn restricted_account(&self) -> Result<RestrictedAccount, PanelSettingsError> {
        let account = self
            .platform_account_id
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(PlatformUserId::new)
            .transpose()?;
        Ok(RestrictedAccount::new(account))
    }
}
