//! Integration tests for the platform admin API adapter against a mock
//! HTTP server.

use std::time::Duration;

use admin_panel::domain::ports::{PlatformApiError, PlatformProcedures, PlatformUserRepository};
use admin_panel::domain::{PlatformUser, PlatformUserId, SuspensionDuration};
use admin_panel::outbound::platform::{PlatformHttpClient, PlatformHttpIdentity};
use rstest::rstest;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "01FD58YK5W7QRV5H3D64KTQYX3";

fn user_id() -> PlatformUserId {
    PlatformUserId::new(USER_ID).expect("valid id")
}

fn client_for(server: &MockServer, admin_token: Option<&str>) -> PlatformHttpClient {
    let base = Url::parse(&format!("{}/admin/", server.uri())).expect("mock server url");
    PlatformHttpClient::new(
        base,
        Duration::from_secs(2),
        PlatformHttpIdentity {
            admin_token: admin_token.map(str::to_owned),
            ..PlatformHttpIdentity::default()
        },
    )
    .expect("client builds")
}

#[tokio::test]
async fn fetches_user_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/admin/users/{USER_ID}")))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": USER_ID,
            "username": "alice",
            "discriminator": "1234",
            "relations": [{ "_id": "01OTHER", "status": "Friend" }],
            "badges": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server, None)
        .find_by_id(&user_id())
        .await
        .expect("lookup succeeds")
        .expect("user present");
    assert_eq!(user.username(), "alice");
    assert_eq!(user.id(), &user_id());
}

#[tokio::test]
async fn missing_users_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "type": "NotFound" })),
        )
        .mount(&server)
        .await;

    let user = client_for(&server, None)
        .fetch_user(&user_id())
        .await
        .expect("404 is not an error");
    assert!(user.is_none());
}

#[rstest]
#[case(500, r#"{"type":"DatabaseError"}"#, "DatabaseError")]
#[case(401, "denied", "denied")]
#[tokio::test]
async fn failure_statuses_are_rejections(
    #[case] status: u16,
    #[case] body: &str,
    #[case] expected_message: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let error = client_for(&server, None)
        .find_by_id(&user_id())
        .await
        .expect_err("failure status");
    match error {
        PlatformApiError::Rejected {
            status: got,
            message,
        } => {
            assert_eq!(got, status);
            assert_eq!(message, expected_message);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_payloads_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "no id" })))
        .mount(&server)
        .await;

    let error = client_for(&server, None)
        .find_by_id(&user_id())
        .await
        .expect_err("decode failure");
    assert!(matches!(error, PlatformApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_platform_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    let client = PlatformHttpClient::new(
        Url::parse(&format!("http://{addr}/admin/")).expect("url"),
        Duration::from_secs(2),
        PlatformHttpIdentity::default(),
    )
    .expect("client builds");

    let error = client
        .find_by_id(&user_id())
        .await
        .expect_err("nothing listens on the port");
    assert!(matches!(error, PlatformApiError::Connection { .. }));
}

#[tokio::test]
async fn suspend_posts_user_duration_and_reason_with_admin_token() {
    let server = MockServer::start().await;
    let user = PlatformUser::new(user_id(), "alice");
    Mock::given(method("POST"))
        .and(path(format!("/admin/users/{USER_ID}/suspend")))
        .and(header("x-admin-token", "s3cret"))
        .and(body_json(json!({
            "user": { "_id": USER_ID, "username": "alice", "privileged": false },
            "duration": 7,
            "reason": "spam|raiding"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, Some("s3cret"))
        .suspend_user(&user, SuspensionDuration::days(7), "spam|raiding")
        .await
        .expect("suspension accepted");
}

#[tokio::test]
async fn suspend_surfaces_platform_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "type": "NotPrivileged" })))
        .mount(&server)
        .await;

    let error = client_for(&server, None)
        .suspend_user(
            &PlatformUser::new(user_id(), "alice"),
            SuspensionDuration::INDEFINITE,
            "",
        )
        .await
        .expect_err("rejected");
    assert!(matches!(
        error,
        PlatformApiError::Rejected { status: 403, .. }
    ));
}
