//! HTTP inbound adapter: pages, JSON endpoints and session plumbing.

pub mod auth;
pub mod error;
pub mod health;
pub mod login;
pub mod pages;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;

fn rejected_input(message: &str, reason: impl ToString) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "reason": reason.to_string() }))
        .into()
}

/// JSON extractor configuration returning domain error payloads for bodies
/// that fail to decode.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        rejected_input("request body is not valid JSON for this endpoint", err)
    })
}

/// Query-string extractor configuration, e.g. for `?allowNull=1`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        rejected_input("query string is not valid for this endpoint", err)
    })
}

/// Form extractor configuration for the login page.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err: UrlencodedError, _req: &HttpRequest| {
        rejected_input("form body is not valid for this endpoint", err)
    })
}

/// Register the JSON API under `/api/v1`.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(login::login)
        .service(login::logout)
        .service(login::session_user)
        .service(users::fetch_user)
        .service(users::suspend_user)
}

/// Register the HTML pages and health probes at the root.
pub fn configure_root(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::login_page)
        .service(pages::login_form)
        .service(pages::logout_form)
        .service(pages::panel_page)
        .service(health::ready)
        .service(health::live);
}
