//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;

use admin_panel::inbound::http::state::{HttpStatePorts, PanelContext};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
    pub(crate) panel: PanelContext,
}

impl ServerConfig {
    /// Construct a server configuration backed by fixture ports.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            ports: HttpStatePorts::fixtures(),
            panel: PanelContext::default(),
        }
    }

    /// Replace the port adapters used by handlers.
    #[must_use]
    pub fn with_ports(mut self, ports: HttpStatePorts) -> Self {
        self.ports = ports;
        self
    }

    /// Attach deployment context (auth mode, public URLs, restricted account).
    #[must_use]
    pub fn with_panel(mut self, panel: PanelContext) -> Self {
        self.panel = panel;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
