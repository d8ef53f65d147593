//! Tests for login, logout and session user handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::MockLoginService;
use crate::domain::{AuthMode, ErrorCode, OperatorProfile};
use crate::inbound::http::state::{HttpStatePorts, PanelContext};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

fn state_with(
    login_service: Arc<dyn crate::domain::ports::LoginService>,
    auth_mode: AuthMode,
) -> HttpState {
    let mut ports = HttpStatePorts::fixtures();
    ports.login = login_service;
    HttpState::new(
        ports,
        PanelContext {
            auth_mode,
            api_url: Some("https://api.stoat.chat".into()),
            ..PanelContext::default()
        },
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(crate::inbound::http::query_config())
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(logout)
                .service(session_user),
        )
}

fn fixture_state() -> HttpState {
    HttpState::new(
        HttpStatePorts::fixtures(),
        PanelContext {
            api_url: Some("https://api.stoat.chat".into()),
            ..PanelContext::default()
        },
    )
}

fn login_request(email: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: email.into(),
            password: password.into(),
        })
}

#[rstest]
#[case("   ", "password", "email must not be empty", "email", "empty_email")]
#[case("admin@example.com", "", "password must not be empty", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] email: &str,
    #[case] password: &str,
    #[case] message: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let response = actix_test::call_service(&app, login_request(email, password).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["message"], message);
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn login_with_bad_credentials_is_unauthorised() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let response =
        actix_test::call_service(&app, login_request("admin@example.com", "wrong").to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "unauthorized");
}

#[actix_web::test]
async fn login_passes_normalised_credentials_to_the_port() {
    let mut service = MockLoginService::new();
    service
        .expect_authenticate()
        .withf(|creds| creds.email() == "mod@stoat.chat" && creds.password() == "hunter2")
        .times(1)
        .returning(|_| {
            Ok(OperatorProfile::new("mod@stoat.chat")
                .expect("profile")
                .with_name("Moderator")
                .with_image("https://cdn.stoat.chat/mod.png"))
        });

    let app =
        actix_test::init_service(test_app(state_with(Arc::new(service), AuthMode::Session))).await;
    let response =
        actix_test::call_service(&app, login_request(" Mod@Stoat.chat ", "hunter2").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let user: AuthorisedUser = actix_test::read_body_json(response).await;
    assert_eq!(user.name, "Moderator");
    assert_eq!(user.email, "mod@stoat.chat");
    assert_eq!(user.image, "https://cdn.stoat.chat/mod.png");
    assert!(user.using_session_auth);
}

#[actix_web::test]
async fn login_port_errors_are_surfaced() {
    let mut service = MockLoginService::new();
    service
        .expect_authenticate()
        .returning(|_| Err(Error::service_unavailable("operator directory offline")));

    let app =
        actix_test::init_service(test_app(state_with(Arc::new(service), AuthMode::Session))).await;
    let response = actix_test::call_service(&app, login_request("mod@stoat.chat", "x").to_request()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn session_user_follows_login_and_logout() {
    let app = actix_test::init_service(test_app(fixture_state())).await;

    let login_res =
        actix_test::call_service(&app, login_request("admin@example.com", "password").to_request()).await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res);

    let user_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/session/user")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(user_res.status(), StatusCode::OK);
    let user: AuthorisedUser = actix_test::read_body_json(user_res).await;
    assert_eq!(user.name, "Panel Admin");

    let logout_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&logout_res);

    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/session/user?allowNull=true")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case("/api/v1/session/user", StatusCode::OK)]
#[case("/api/v1/session/user?allowNull=false", StatusCode::OK)]
#[case("/api/v1/session/user?allowNull=true", StatusCode::NO_CONTENT)]
#[actix_web::test]
async fn anonymous_session_user_respects_allow_null(
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), expected);
    if expected == StatusCode::OK {
        let user: AuthorisedUser = actix_test::read_body_json(response).await;
        assert_eq!(user.name, "Fetching user...");
        assert_eq!(user.email, "first.last@example.com");
        assert!(!user.is_resolved());
    }
}

#[rstest]
#[case("/api/v1/session/user?allowNull=1")]
#[case("/api/v1/session/user?allowNull=maybe")]
#[actix_web::test]
async fn malformed_query_is_a_json_invalid_request(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(body["details"]["reason"].is_string());
}

#[actix_web::test]
async fn no_auth_mode_reports_instance_owner() {
    let app = actix_test::init_service(test_app(state_with(
        Arc::new(crate::domain::ports::FixtureLoginService),
        AuthMode::NoAuth,
    )))
    .await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/session/user?allowNull=true")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let user: AuthorisedUser = actix_test::read_body_json(response).await;
    assert_eq!(user.name, "Instance Owner");
    assert!(!user.using_session_auth);
}

#[test]
fn blank_login_maps_to_domain_code() {
    let err = map_login_validation_error(LoginValidationError::EmptyEmail);
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
