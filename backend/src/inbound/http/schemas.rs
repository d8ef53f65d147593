//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa; these wrappers mirror their JSON shape
//! so the generated document can reference them by name.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The target is the platform's own account.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The platform admin API could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error response payload.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "user 01FD58YK5W7QRV5H3D64KTQYX3 not found")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Operator identity shown in the panel chrome.
#[derive(ToSchema)]
#[schema(as = AuthorisedUser)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AuthorisedUserSchema {
    #[schema(example = "Moderator")]
    name: String,
    #[schema(example = "mod@stoat.chat")]
    email: String,
    #[schema(example = "https://api.stoat.chat/users/0/default_avatar")]
    image: String,
    /// False when authentication is disabled for this deployment.
    #[schema(rename = "usingSessionAuth")]
    using_session_auth: bool,
}

/// Relationship counts reported instead of the full relationship list.
#[derive(ToSchema)]
#[schema(as = FriendSummary)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FriendSummarySchema {
    #[schema(example = 12)]
    friends: u64,
}

/// Platform user with relationships collapsed to counts.
///
/// Fields the platform reports beyond these are passed through unchanged.
#[derive(ToSchema)]
#[schema(as = UserLookupResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserLookupResponseSchema {
    #[schema(rename = "_id", example = "01FD58YK5W7QRV5H3D64KTQYX3")]
    id: String,
    #[schema(example = "alice")]
    username: String,
    #[schema(example = "0001")]
    discriminator: Option<String>,
    display_name: Option<String>,
    relations: FriendSummarySchema,
    flags: Option<u32>,
    privileged: bool,
    /// Whether this is the platform's own account.
    restricted: bool,
}
