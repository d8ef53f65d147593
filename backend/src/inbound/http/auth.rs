//! Authorised-user resolution for HTTP handlers.
//!
//! Combines the configured [`AuthMode`](crate::domain::AuthMode) with the
//! operator profile in the session cookie. Handlers that act on the platform
//! take an [`AuthorisedOperator`] argument, which rejects requests without a
//! logged-in operator before the handler body runs.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthorisedUser, Error, authorised_user};

use super::session::SessionContext;
use super::state::HttpState;

/// Resolve the authorised user for the current request.
///
/// See [`authorised_user`] for the `allow_null` contract.
pub fn resolve_authorised_user(
    state: &HttpState,
    session: &SessionContext,
    allow_null: bool,
) -> Option<AuthorisedUser> {
    let profile = session.operator();
    authorised_user(
        state.panel.auth_mode,
        profile.as_ref(),
        state.panel.api_url.as_deref(),
        allow_null,
    )
}

/// Extractor yielding the operator allowed to act on the platform.
///
/// Fails with `401 Unauthorized` when sessions are enabled and nobody is
/// logged in.
#[derive(Debug, Clone)]
pub struct AuthorisedOperator(pub AuthorisedUser);

impl FromRequest for AuthorisedOperator {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let session = session.await?;
            resolve_authorised_user(&state, &session, true)
                .map(AuthorisedOperator)
                .ok_or_else(|| Error::unauthorized("login required").into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthMode, OperatorProfile};
    use crate::inbound::http::state::{HttpStatePorts, PanelContext};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    fn state(auth_mode: AuthMode) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            HttpStatePorts::fixtures(),
            PanelContext {
                auth_mode,
                api_url: Some("https://api.stoat.chat".into()),
                ..PanelContext::default()
            },
        ))
    }

    async fn whoami(operator: AuthorisedOperator) -> HttpResponse {
        HttpResponse::Ok().json(operator.0)
    }

    async fn login(session: SessionContext) -> Result<HttpResponse, Error> {
        let profile = OperatorProfile::new("mod@stoat.chat").map_err(|err| Error::internal(err.to_string()))?;
        session.persist_operator(&profile)?;
        Ok(HttpResponse::Ok().finish())
    }

    #[rstest]
    #[case(AuthMode::Session, StatusCode::UNAUTHORIZED)]
    #[case(AuthMode::NoAuth, StatusCode::OK)]
    #[actix_web::test]
    async fn anonymous_requests_depend_on_auth_mode(
        #[case] mode: AuthMode,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(state(mode))
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn logged_in_operator_is_authorised() {
        let app = test::init_service(
            App::new()
                .app_data(state(AuthMode::Session))
                .wrap(test_session_middleware())
                .route("/login", web::get().to(login))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let login_res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&login_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let user: AuthorisedUser = test::read_body_json(res).await;
        assert_eq!(user.email, "mod@stoat.chat");
        assert_eq!(user.name, "mod@stoat.chat");
        assert_eq!(user.image, "https://api.stoat.chat/users/0/default_avatar");
        assert!(user.using_session_auth);
    }

    #[actix_web::test]
    async fn missing_state_is_an_internal_error() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
