//! Operator login, logout and session user endpoints.
//!
//! ```text
//! POST /api/v1/login {"email":"mod@stoat.chat","password":"hunter2"}
//! POST /api/v1/logout
//! GET  /api/v1/session/user?allowNull=true
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{AuthorisedUser, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::resolve_authorised_user;
use crate::inbound::http::schemas::{AuthorisedUserSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "mod@stoat.chat")]
    pub email: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Check credentials with the login port and store the operator in the
/// session. Shared by the JSON endpoint and the HTML form.
pub(crate) async fn establish_session(
    state: &HttpState,
    session: &SessionContext,
    credentials: &LoginCredentials,
) -> ApiResult<AuthorisedUser> {
    let profile = state.login.authenticate(credentials).await?;
    session.persist_operator(&profile)?;
    info!(email = credentials.email(), "operator logged in");
    resolve_authorised_user(state, session, false)
        .ok_or_else(|| Error::internal("session did not retain the operator"))
}

/// Authenticate an operator and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthorisedUserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthorisedUser>> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    establish_session(&state, &session, &credentials)
        .await
        .map(web::Json)
}

/// Forget the logged-in operator.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Query for `GET /api/v1/session/user`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SessionUserQuery {
    /// Return `204` instead of a placeholder when nobody is logged in.
    #[serde(default)]
    pub allow_null: bool,
}

/// The authorised user for the current request.
#[utoipa::path(
    get,
    path = "/api/v1/session/user",
    params(SessionUserQuery),
    responses(
        (status = 200, description = "Authorised user", body = AuthorisedUserSchema),
        (status = 204, description = "No operator logged in and allowNull set")
    ),
    tags = ["session"],
    operation_id = "sessionUser",
    security([])
)]
#[get("/session/user")]
pub async fn session_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SessionUserQuery>,
) -> HttpResponse {
    match resolve_authorised_user(&state, &session, query.allow_null) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NoContent().finish(),
    }
}

#[cfg(test)]
#[path = "login_tests.rs"]
mod tests;
