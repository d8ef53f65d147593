//! Admin panel entry-point: loads settings, wires adapters and serves the
//! pages, JSON API and OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admin_panel::config::PanelSettings;
use admin_panel::inbound::http::health::HealthState;
use admin_panel::inbound::http::session_config::{BuildMode, session_settings_from_env};

use server::{ServerConfig, build_panel_context, build_ports, create_server, platform_backend};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PanelSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load panel settings")?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .wrap_err("invalid session configuration")?;
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    )
    .with_ports(build_ports(&settings, mode)?)
    .with_panel(build_panel_context(&settings)?);

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new(platform_backend(&settings)?));
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, auth_mode = ?settings.auth_mode(), "admin panel listening");
    server.await.wrap_err("server terminated with an error")
}
