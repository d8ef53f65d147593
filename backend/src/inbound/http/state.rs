//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLoginService, FixturePlatformProcedures, FixturePlatformUserRepository, LoginService,
    UserLookupQuery, UserSuspensionCommand,
};
use crate::domain::{AuthMode, RestrictedAccount, UserModerationService};

/// Deployment values the handlers and pages need at request time.
#[derive(Debug, Clone)]
pub struct PanelContext {
    /// Whether operators log in or everyone acts as the instance owner.
    pub auth_mode: AuthMode,
    /// Public platform API URL, used for default avatars.
    pub api_url: Option<String>,
    /// Public chat client URL linked from the login page.
    pub app_url: Option<String>,
    /// The platform's own account.
    pub restricted: RestrictedAccount,
}

impl Default for PanelContext {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::Session,
            api_url: None,
            app_url: None,
            restricted: RestrictedAccount::default(),
        }
    }
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserLookupQuery>,
    pub suspensions: Arc<dyn UserSuspensionCommand>,
}

impl HttpStatePorts {
    /// Ports backed entirely by in-memory fixtures.
    pub fn fixtures() -> Self {
        let moderation = Arc::new(UserModerationService::new(
            Arc::new(FixturePlatformUserRepository),
            Arc::new(FixturePlatformProcedures),
        ));
        Self {
            login: Arc::new(FixtureLoginService),
            users: moderation.clone(),
            suspensions: moderation,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserLookupQuery>,
    pub suspensions: Arc<dyn UserSuspensionCommand>,
    pub panel: PanelContext,
}

impl HttpState {
    /// Construct state from a ports bundle and deployment context.
    ///
    /// # Examples
    /// ```
    /// use admin_panel::inbound::http::state::{HttpState, HttpStatePorts, PanelContext};
    ///
    /// let state = HttpState::new(HttpStatePorts::fixtures(), PanelContext::default());
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, panel: PanelContext) -> Self {
        let HttpStatePorts {
            login,
            users,
            suspensions,
        } = ports;
        Self {
            login,
            users,
            suspensions,
            panel,
        }
    }
}
