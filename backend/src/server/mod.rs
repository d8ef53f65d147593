//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{build_panel_context, build_ports, platform_backend};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use admin_panel::Trace;
#[cfg(debug_assertions)]
use admin_panel::doc::ApiDoc;
use admin_panel::inbound::http::health::HealthState;
use admin_panel::inbound::http::pages::PageRenderer;
use admin_panel::inbound::http::session_config::SESSION_COOKIE_NAME;
use admin_panel::inbound::http::state::HttpState;
use admin_panel::inbound::http::{api_scope, configure_root, form_config, json_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    pages: web::Data<PageRenderer>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        pages,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(pages)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(form_config())
        .wrap(session)
        .wrap(Trace)
        .service(api_scope())
        .configure(configure_root);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The readiness probe flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when the templates fail to compile or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let pages = web::Data::new(PageRenderer::new().map_err(std::io::Error::other)?);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ports,
        panel,
    } = config;
    let http_state = web::Data::new(HttpState::new(ports, panel));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            pages: pages.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use admin_panel::inbound::http::health::PlatformBackend;
    use admin_panel::inbound::http::state::{HttpStatePorts, PanelContext};
    use serde_json::json;

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new(PlatformBackend::Fixtures)),
            http_state: web::Data::new(HttpState::new(
                HttpStatePorts::fixtures(),
                PanelContext::default(),
            )),
            pages: web::Data::new(PageRenderer::new().expect("templates compile")),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn login_sets_panel_session_cookie_and_trace_header() {
        let app = test::init_service(build_app(deps())).await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": "admin@example.com", "password": "password" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("trace-id"));
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[actix_web::test]
    async fn session_survives_between_api_calls() {
        let app = test::init_service(build_app(deps())).await;
        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": "admin@example.com", "password": "password" }))
                .to_request(),
        )
        .await;
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie")
            .into_owned();

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/session/user?allowNull=true")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["email"], "admin@example.com");
    }

    #[actix_web::test]
    async fn health_and_pages_are_mounted_at_root() {
        let app = test::init_service(build_app(deps())).await;
        for uri in ["/health/live", "/"] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn malformed_query_and_form_input_get_error_payloads() {
        let app = test::init_service(build_app(deps())).await;
        let requests = [
            test::TestRequest::get()
                .uri("/api/v1/session/user?allowNull=1")
                .to_request(),
            test::TestRequest::post()
                .uri("/login")
                .insert_header(("content-type", "text/plain"))
                .set_payload("email=admin@example.com")
                .to_request(),
        ];
        for request in requests {
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(response.headers().contains_key("trace-id"));
            let body: serde_json::Value = test::read_body_json(response).await;
            assert_eq!(body["code"], "invalid_request");
            assert!(body["traceId"].is_string());
        }
    }
}
