//! Server-rendered login and dashboard pages.
//!
//! ```text
//! GET  /        login screen
//! POST /login   form login, 303 to /panel
//! POST /logout  clear session, 303 to /
//! GET  /panel   dashboard
//! ```

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, post, web};
use minijinja::{Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::{AuthorisedUser, Error, ErrorCode, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::resolve_authorised_user;
use crate::inbound::http::login::{establish_session, map_login_validation_error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const LOGIN_TITLE: &str = "Stoat Admin Panel";
const PANEL_TITLE: &str = "Stoat Dashboard";
const PANEL_DESCRIPTION: &str = "Integrated RBAC and content moderation tool for Stoat.";
const PROJECT_URL: &str = "https://github.com/revoltchat/admin-panel";
const SOURCE_URL: &str = "https://git.is.horse/revolt/research-development/swiss-army-knife";

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("templates/base.html")),
    ("login.html", include_str!("templates/login.html")),
    ("panel.html", include_str!("templates/panel.html")),
];

/// Compiled page templates.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Compile the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns the template syntax error, if any.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, context: S) -> ApiResult<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|err| {
                error!(template = name, error = %err, "page render failed");
                Error::internal(format!("failed to render {name}: {err}"))
            })
    }
}

#[derive(Debug, Serialize)]
struct AppLink {
    href: String,
    label: String,
}

/// Link to the chat client shown on the login page.
///
/// The label drops a leading `http://` or `https://`; without a configured
/// URL the link reads "Home" and points at the panel root.
fn app_link(app_url: Option<&str>) -> AppLink {
    match app_url {
        Some(url) => {
            let label = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url);
            AppLink {
                href: url.to_owned(),
                label: label.to_owned(),
            }
        }
        None => AppLink {
            href: "/".to_owned(),
            label: "Home".to_owned(),
        },
    }
}

#[derive(Debug, Serialize)]
struct LoginPage<'a> {
    title: &'static str,
    description: Option<&'static str>,
    operator: Option<AuthorisedUser>,
    error: Option<&'a str>,
    email: &'a str,
    app_link: AppLink,
    project_url: &'static str,
}

#[derive(Debug, Serialize)]
struct PanelPage {
    title: &'static str,
    description: Option<&'static str>,
    operator: AuthorisedUser,
    version: &'static str,
    source_url: &'static str,
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(header::ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn render_login(
    pages: &PageRenderer,
    state: &HttpState,
    operator: Option<AuthorisedUser>,
    failure: Option<(&str, &str)>,
) -> ApiResult<String> {
    let (error, email) = failure.unwrap_or_default();
    pages.render(
        "login.html",
        LoginPage {
            title: LOGIN_TITLE,
            description: None,
            operator,
            error: (!error.is_empty()).then_some(error),
            email,
            app_link: app_link(state.panel.app_url.as_deref()),
            project_url: PROJECT_URL,
        },
    )
}

/// Login screen.
#[get("/")]
pub async fn login_page(
    state: web::Data<HttpState>,
    pages: web::Data<PageRenderer>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let operator = resolve_authorised_user(&state, &session, true);
    let body = render_login(&pages, &state, operator, None)?;
    Ok(html(StatusCode::OK, body))
}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Form login. Rejected credentials re-render the login page.
#[post("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    pages: web::Data<PageRenderer>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let attempt = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => establish_session(&state, &session, &credentials).await,
        Err(err) => Err(map_login_validation_error(err)),
    };

    match attempt {
        Ok(_) => Ok(see_other("/panel")),
        Err(err) if matches!(err.code(), ErrorCode::InvalidRequest | ErrorCode::Unauthorized) => {
            let status = if err.code() == ErrorCode::Unauthorized {
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::BAD_REQUEST
            };
            let message = if err.code() == ErrorCode::Unauthorized {
                "Incorrect email or password."
            } else {
                err.message()
            };
            let body = render_login(&pages, &state, None, Some((message, form.email.trim())))?;
            Ok(html(status, body))
        }
        Err(err) => Err(err),
    }
}

/// Clear the session and return to the login screen.
#[post("/logout")]
pub async fn logout_form(session: SessionContext) -> HttpResponse {
    session.clear();
    info!("operator logged out");
    see_other("/")
}

/// Dashboard shell.
#[get("/panel")]
pub async fn panel_page(
    state: web::Data<HttpState>,
    pages: web::Data<PageRenderer>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(operator) = resolve_authorised_user(&state, &session, true) else {
        return Ok(see_other("/"));
    };
    let body = pages.render(
        "panel.html",
        PanelPage {
            title: PANEL_TITLE,
            description: Some(PANEL_DESCRIPTION),
            operator,
            version: env!("CARGO_PKG_VERSION"),
            source_url: SOURCE_URL,
        },
    )?;
    Ok(html(StatusCode::OK, body))
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
