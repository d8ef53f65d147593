//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the JSON endpoints under `/api/v1`, the health probes
//! and the schema wrappers from [`crate::inbound::http::schemas`]. Server
//! rendered pages are not part of the document.
//!
//! The generated specification is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::login::LoginRequest;
use crate::inbound::http::schemas::{
    AuthorisedUserSchema, ErrorCodeSchema, ErrorSchema, FriendSummarySchema,
    UserLookupResponseSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::users::SuspendUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the admin panel API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Stoat admin panel API",
        description = "Operator sessions, user lookup and suspension for the Stoat platform."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::login::logout,
        crate::inbound::http::login::session_user,
        crate::inbound::http::users::fetch_user,
        crate::inbound::http::users::suspend_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AuthorisedUserSchema,
        FriendSummarySchema,
        UserLookupResponseSchema,
        LoginRequest,
        SuspendUserRequest
    )),
    tags(
        (name = "session", description = "Operator login and session state"),
        (name = "users", description = "Platform user lookup and moderation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "traceId")]
    #[case("Error", "code")]
    #[case("AuthorisedUser", "usingSessionAuth")]
    #[case("LoginRequest", "password")]
    #[case("SuspendUserRequest", "duration")]
    fn registered_schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas
            .get(schema)
            .unwrap_or_else(|| panic!("{schema} schema registered"));
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/logout")]
    #[case("/api/v1/session/user")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/users/{id}/suspend")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_json_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn session_cookie_scheme_uses_panel_cookie_name() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("serialise document");
        assert!(json.contains(SESSION_COOKIE_NAME));
    }
}
