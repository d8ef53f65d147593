//! Builders turning panel settings into port adapters and page context.

use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, bail};
use tracing::{info, warn};

use admin_panel::config::PanelSettings;
use admin_panel::domain::UserModerationService;
use admin_panel::domain::ports::{FixtureLoginService, LoginService};
use admin_panel::inbound::http::health::PlatformBackend;
use admin_panel::inbound::http::session_config::BuildMode;
use admin_panel::inbound::http::state::{HttpStatePorts, PanelContext};
use admin_panel::outbound::operators::ConfiguredLoginService;
use admin_panel::outbound::platform::{PlatformHttpClient, PlatformHttpIdentity};

/// Build the deployment context shared by handlers and pages.
///
/// # Errors
///
/// Returns an error when the configured platform account id is malformed.
pub fn build_panel_context(settings: &PanelSettings) -> Result<PanelContext> {
    let restricted = settings
        .restricted_account()
        .wrap_err("PANEL_PLATFORM_ACCOUNT_ID is invalid")?;
    Ok(PanelContext {
        auth_mode: settings.auth_mode(),
        api_url: settings.api_url.clone(),
        app_url: settings.app_url.clone(),
        restricted,
    })
}

/// Which backend [`build_ports`] wires for these settings.
///
/// # Errors
///
/// Returns an error when the admin API URL is malformed.
pub fn platform_backend(settings: &PanelSettings) -> Result<PlatformBackend> {
    let configured = settings
        .admin_api_url()
        .wrap_err("PANEL_ADMIN_API_URL is invalid")?
        .is_some();
    Ok(if configured {
        PlatformBackend::AdminApi
    } else {
        PlatformBackend::Fixtures
    })
}

/// Select port adapters from settings.
///
/// The platform client is used when an admin API URL is configured. Debug
/// builds without one fall back to fixtures that answer lookups and accept
/// suspensions; release builds refuse to start.
///
/// # Errors
///
/// Returns an error when the admin API URL or the operators file is invalid,
/// or when a release build has no admin API URL.
pub fn build_ports(settings: &PanelSettings, mode: BuildMode) -> Result<HttpStatePorts> {
    let login = build_login_service(settings.operators_file.as_deref(), mode)?;

    let Some(base_url) = settings
        .admin_api_url()
        .wrap_err("PANEL_ADMIN_API_URL is invalid")?
    else {
        if mode == BuildMode::Release {
            bail!("PANEL_ADMIN_API_URL must be set in release builds");
        }
        warn!("no platform admin API configured; serving fixture users");
        return Ok(HttpStatePorts {
            login,
            ..HttpStatePorts::fixtures()
        });
    };

    info!(%base_url, "using platform admin API");
    let client = Arc::new(
        PlatformHttpClient::new(
            base_url,
            settings.admin_api_timeout(),
            PlatformHttpIdentity {
                admin_token: settings.admin_api_token.clone(),
                ..PlatformHttpIdentity::default()
            },
        )
        .wrap_err("failed to build platform admin API client")?,
    );
    let moderation = Arc::new(UserModerationService::new(client.clone(), client));
    Ok(HttpStatePorts {
        login,
        users: moderation.clone(),
        suspensions: moderation,
    })
}

fn build_login_service(path: Option<&Path>, mode: BuildMode) -> Result<Arc<dyn LoginService>> {
    match (path, mode) {
        (Some(path), _) => {
            let service = ConfiguredLoginService::load(path)
                .wrap_err_with(|| format!("failed to load operators from {}", path.display()))?;
            info!(path = %path.display(), operators = service.len(), "loaded operators");
            Ok(Arc::new(service))
        }
        (None, BuildMode::Debug) => {
            warn!("no operators file configured; using the development operator");
            Ok(Arc::new(FixtureLoginService))
        }
        (None, BuildMode::Release) => {
            warn!("no operators file configured; operator login is disabled");
            Ok(Arc::new(ConfiguredLoginService::default()))
        }
    }
}
