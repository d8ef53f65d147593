//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed values used by the HTTP adapter and the
//! platform adapters. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - PlatformUser / PlatformUserInfo — platform user record and its
//!   smaller projection.
//! - SuspensionRequest — validated suspension command.
//! - AuthorisedUser — per-request view of who is operating the panel.

pub mod auth;
pub mod error;
pub mod moderation_service;
pub mod platform_user;
pub mod ports;
pub mod suspension;
pub mod trace_id;

pub use self::auth::{
    AuthMode, AuthorisedUser, LoginCredentials, LoginValidationError, OperatorProfile,
    OperatorProfileValidationError, authorised_user, default_avatar_url,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::moderation_service::UserModerationService;
pub use self::platform_user::{
    FriendSummary, PlatformUser, PlatformUserId, PlatformUserInfo, PlatformUserValidationError,
    Relationship, RelationshipStatus, RestrictedAccount,
};
pub use self::suspension::{SuspensionDuration, SuspensionReasons, SuspensionRequest};
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
