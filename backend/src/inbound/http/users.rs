//! Platform user moderation handlers.
//!
//! ```text
//! GET  /api/v1/users/{id}
//! POST /api/v1/users/{id}/suspend {"duration":7,"reasons":["spam"]}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{
    Error, PlatformUserId, PlatformUserInfo, SuspensionDuration, SuspensionReasons,
    SuspensionRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthorisedOperator;
use crate::inbound::http::schemas::{ErrorSchema, UserLookupResponseSchema};
use crate::inbound::http::state::HttpState;

/// Response body for `GET /api/v1/users/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserLookupResponse {
    #[serde(flatten)]
    pub user: PlatformUserInfo,
    /// Whether this is the platform's own account.
    pub restricted: bool,
}

/// Request body for `POST /api/v1/users/{id}/suspend`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SuspendUserRequest {
    /// Days to suspend for; `0` suspends indefinitely.
    #[schema(example = 7)]
    pub duration: u32,
    /// Reasons recorded by the platform, in order.
    #[serde(default)]
    #[schema(example = json!(["spam", "raiding"]))]
    pub reasons: Vec<String>,
}

fn parse_user_id(raw: String) -> ApiResult<PlatformUserId> {
    PlatformUserId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "id" }))
    })
}

/// Look up a platform user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Platform user id")),
    responses(
        (status = 200, description = "User found", body = UserLookupResponseSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 503, description = "Platform unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "fetchUser"
)]
#[get("/users/{id}")]
pub async fn fetch_user(
    state: web::Data<HttpState>,
    _operator: AuthorisedOperator,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserLookupResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state
        .users
        .fetch_user_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
    let restricted = state.panel.restricted.is_restricted_user(&user);
    Ok(web::Json(UserLookupResponse {
        user: user.into_info(),
        restricted,
    }))
}

/// Suspend a platform user.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/suspend",
    params(("id" = String, Path, description = "Platform user id")),
    request_body = SuspendUserRequest,
    responses(
        (status = 204, description = "Suspension issued"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Restricted account", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 503, description = "Platform unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "suspendUser"
)]
#[post("/users/{id}/suspend")]
pub async fn suspend_user(
    state: web::Data<HttpState>,
    operator: AuthorisedOperator,
    path: web::Path<String>,
    payload: web::Json<SuspendUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    if state.panel.restricted.is_restricted(&id) {
        warn!(user_id = %id, operator = %operator.0.email, "refused suspension of restricted account");
        return Err(Error::forbidden("the platform account cannot be suspended"));
    }

    let SuspendUserRequest { duration, reasons } = payload.into_inner();
    let request = SuspensionRequest {
        user_id: id.clone(),
        duration: SuspensionDuration::days(duration),
        reasons: SuspensionReasons::new(reasons),
    };
    state.suspensions.suspend_user(request).await?;
    info!(user_id = %id, operator = %operator.0.email, "suspension requested");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
