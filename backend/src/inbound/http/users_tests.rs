//! Tests for the user moderation handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FIXTURE_PLATFORM_USER_ID, MockUserLookupQuery, MockUserSuspensionCommand,
    fixture_platform_user,
};
use crate::domain::{AuthMode, RestrictedAccount};
use crate::inbound::http::json_config;
use crate::inbound::http::state::{HttpStatePorts, PanelContext};
use crate::inbound::http::test_utils::test_session_middleware;

const PLATFORM_ACCOUNT: &str = "01PLATFORM0000000000000000";

fn panel(auth_mode: AuthMode) -> PanelContext {
    PanelContext {
        auth_mode,
        restricted: RestrictedAccount::new(Some(
            PlatformUserId::new(PLATFORM_ACCOUNT).expect("id"),
        )),
        ..PanelContext::default()
    }
}

fn test_app(
    ports: HttpStatePorts,
    auth_mode: AuthMode,
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
        .app_data(web::Data::new(HttpState::new(ports, panel(auth_mode))))
        .app_data(json_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(fetch_user).service(suspend_user))
}

fn ports_with(
    users: MockUserLookupQuery,
    suspensions: MockUserSuspensionCommand,
) -> HttpStatePorts {
    let mut ports = HttpStatePorts::fixtures();
    ports.users = Arc::new(users);
    ports.suspensions = Arc::new(suspensions);
    ports
}

fn suspend_request(id: &str, body: Value) -> actix_web::test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/users/{id}/suspend"))
        .set_json(body)
}

#[actix_web::test]
async fn lookup_returns_info_projection() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures(), AuthMode::NoAuth)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{FIXTURE_PLATFORM_USER_ID}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["_id"], FIXTURE_PLATFORM_USER_ID);
    assert_eq!(body["relations"], json!({ "friends": 1 }));
    assert_eq!(body["restricted"], false);
}

#[actix_web::test]
async fn lookup_flags_the_platform_account() {
    let mut users = MockUserLookupQuery::new();
    users.expect_fetch_user_by_id().returning(|id| {
        Ok(Some(crate::domain::PlatformUser::new(id.clone(), "stoat")))
    });
    let app = actix_test::init_service(test_app(
        ports_with(users, MockUserSuspensionCommand::new()),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{PLATFORM_ACCOUNT}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["restricted"], true);
    assert_eq!(body["relations"]["friends"], 0);
}

#[rstest]
#[case(Ok(None), StatusCode::NOT_FOUND)]
#[case(Err(Error::service_unavailable("platform down")), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Err(Error::internal("decode")), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn lookup_maps_port_outcomes(
    #[case] outcome: Result<Option<crate::domain::PlatformUser>, Error>,
    #[case] expected: StatusCode,
) {
    let mut users = MockUserLookupQuery::new();
    users.expect_fetch_user_by_id().return_once(move |_| outcome);
    let app = actix_test::init_service(test_app(
        ports_with(users, MockUserSuspensionCommand::new()),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/01MISSING").to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn routes_require_an_operator_when_sessions_are_enabled() {
    let mut users = MockUserLookupQuery::new();
    users.expect_fetch_user_by_id().never();
    let mut suspensions = MockUserSuspensionCommand::new();
    suspensions.expect_suspend_user().never();
    let app = actix_test::init_service(test_app(
        ports_with(users, suspensions),
        AuthMode::Session,
    ))
    .await;

    let lookup = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{FIXTURE_PLATFORM_USER_ID}"))
            .to_request(),
    )
    .await;
    assert_eq!(lookup.status(), StatusCode::UNAUTHORIZED);

    let suspend = actix_test::call_service(
        &app,
        suspend_request(FIXTURE_PLATFORM_USER_ID, json!({ "duration": 1, "reasons": [] }))
            .to_request(),
    )
    .await;
    assert_eq!(suspend.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn suspend_forwards_request_to_port() {
    let mut suspensions = MockUserSuspensionCommand::new();
    suspensions
        .expect_suspend_user()
        .with(eq(SuspensionRequest {
            user_id: PlatformUserId::new(FIXTURE_PLATFORM_USER_ID).expect("id"),
            duration: SuspensionDuration::days(7),
            reasons: SuspensionReasons::new(vec!["spam".into(), "raiding".into()]),
        }))
        .times(1)
        .returning(|_| Ok(()));
    let app = actix_test::init_service(test_app(
        ports_with(MockUserLookupQuery::new(), suspensions),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        suspend_request(
            FIXTURE_PLATFORM_USER_ID,
            json!({ "duration": 7, "reasons": ["spam", "raiding"] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn suspend_refuses_the_platform_account() {
    let mut suspensions = MockUserSuspensionCommand::new();
    suspensions.expect_suspend_user().never();
    let app = actix_test::init_service(test_app(
        ports_with(MockUserLookupQuery::new(), suspensions),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        suspend_request(PLATFORM_ACCOUNT, json!({ "duration": 0, "reasons": ["test"] }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case(json!({ "duration": -1, "reasons": [] }))]
#[case(json!({ "duration": "seven" }))]
#[case(json!({ "reasons": ["spam"] }))]
#[actix_web::test]
async fn suspend_rejects_undecodable_bodies(#[case] body: Value) {
    let mut suspensions = MockUserSuspensionCommand::new();
    suspensions.expect_suspend_user().never();
    let app = actix_test::init_service(test_app(
        ports_with(MockUserLookupQuery::new(), suspensions),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        suspend_request(FIXTURE_PLATFORM_USER_ID, body).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["code"], "invalid_request");
}

#[actix_web::test]
async fn suspend_surfaces_missing_users() {
    let mut suspensions = MockUserSuspensionCommand::new();
    suspensions
        .expect_suspend_user()
        .returning(|request| Err(Error::not_found(format!("user {} not found", request.user_id))));
    let app = actix_test::init_service(test_app(
        ports_with(MockUserLookupQuery::new(), suspensions),
        AuthMode::NoAuth,
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        suspend_request("01GONE", json!({ "duration": 1, "reasons": [] })).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn fixture_user_serialises_through_lookup_response() {
    let response = UserLookupResponse {
        user: fixture_platform_user(&PlatformUserId::new(FIXTURE_PLATFORM_USER_ID).expect("id"))
            .expect("fixture user")
            .into_info(),
        restricted: false,
    };
    let value = serde_json::to_value(response).expect("serialises");
    assert!(value.get("username").is_some());
    assert!(value["relations"].get("friends").is_some());
}
